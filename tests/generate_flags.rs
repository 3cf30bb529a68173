use std::fs;

use fwflags::config::load_document;
use fwflags::emit::{emit, ensure_output_dir, EmitMode};
use fwflags::flags::FlagLine;
use fwflags::generate::plan;
use tempfile::TempDir;

const BOARDS: &str = r#"{
  "hw_configuration_list": [
    {
      "hw_flags": { "BOARD": "nucleo_f401re", "FPU": true, "HSE_MHZ": 8 },
      "sw_configuration_list": [
        { "sw_flags": { "LOG_LEVEL": 3 } },
        { "sw_flags": { "LOG_LEVEL": 0, "FPU": false } },
        { "name": "Bootloader", "sw_flags": { "APP_OFFSET": "0x8000", "TRACE": null } }
      ]
    },
    { "hw_flags": { "BOARD": "disco_l476", "EXTRA": { "ignored": true } } },
    "not-an-entry"
  ]
}"#;

#[test]
fn generates_one_file_per_hardware_software_pair() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("boards.json");
    fs::write(&input, BOARDS).unwrap();
    let outdir = dir.path().join("out").join("flags");

    let doc = load_document(&input).unwrap();
    let plan = plan(&doc);
    ensure_output_dir(&outdir).unwrap();
    let report = emit(&plan, &outdir, EmitMode::Write);

    assert_eq!(report.written, 4);
    assert_eq!(report.failed, 0);

    let mut names: Vec<String> = fs::read_dir(&outdir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "disco-l476.txt",
            "nucleo-f401re_on_8.txt",
            "nucleo-f401re_on_8_bootloader.txt",
            "nucleo-f401re_on_8_sw-conf1.txt",
        ]
    );

    assert_eq!(
        fs::read_to_string(outdir.join("nucleo-f401re_on_8.txt")).unwrap(),
        "-DBOARD=nucleo_f401re\n-DFPU=ON\n-DHSE_MHZ=8\n-DLOG_LEVEL=3\n"
    );
    assert_eq!(
        fs::read_to_string(outdir.join("nucleo-f401re_on_8_sw-conf1.txt")).unwrap(),
        "-DBOARD=nucleo_f401re\n-DFPU=OFF\n-DHSE_MHZ=8\n-DLOG_LEVEL=0\n"
    );
    assert_eq!(
        fs::read_to_string(outdir.join("nucleo-f401re_on_8_bootloader.txt")).unwrap(),
        "-DBOARD=nucleo_f401re\n-DFPU=ON\n-DHSE_MHZ=8\n-DAPP_OFFSET=0x8000\n-DTRACE\n"
    );
    assert_eq!(
        fs::read_to_string(outdir.join("disco-l476.txt")).unwrap(),
        "-DBOARD=disco_l476\n"
    );
}

#[test]
fn every_written_line_parses_back() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("boards.json");
    fs::write(&input, BOARDS).unwrap();

    let plan = plan(&load_document(&input).unwrap());
    for file in &plan.files {
        let content = file.content();
        assert!(content.ends_with('\n'));
        for line in content.lines() {
            let parsed = FlagLine::parse(line).unwrap_or_else(|| panic!("bad line {line:?}"));
            let expected = file.flags.get(&parsed.key).expect("key from map");
            match parsed.value {
                None => assert!(expected.is_empty()),
                Some(value) => assert_eq!(value.to_string(), expected.to_string()),
            }
        }
    }
}

#[test]
fn dry_run_reports_every_file_without_writing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("boards.json");
    fs::write(&input, BOARDS).unwrap();
    let outdir = dir.path().join("out");

    let plan = plan(&load_document(&input).unwrap());
    let report = emit(&plan, &outdir, EmitMode::DryRun);

    assert_eq!(report.items.len(), plan.files.len());
    assert_eq!(report.written, 0);
    assert!(!outdir.exists());
}

#[test]
fn colliding_names_overwrite_and_are_reported() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("dupes.json");
    fs::write(
        &input,
        r#"{"hw_configuration_list": [
            {"hw_flags": {"BOARD": "Same"}},
            {"hw_flags": {"BOARD": "same"}, "sw_configuration_list": [{"sw_flags": {"SECOND": 1}}]}
        ]}"#,
    )
    .unwrap();

    let plan = plan(&load_document(&input).unwrap());
    let report = emit(&plan, dir.path(), EmitMode::Write);

    assert_eq!(report.collisions, vec!["same.txt".to_string()]);
    assert_eq!(
        fs::read_to_string(dir.path().join("same.txt")).unwrap(),
        "-DBOARD=same\n-DSECOND=1\n"
    );
}
