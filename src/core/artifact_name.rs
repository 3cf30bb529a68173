//! Release artifact naming.
//!
//! Artifact names have the shape `<project>_<config parts...>` with the
//! release tag inserted right after the hardware part of the configuration
//! (the first part starting with `hw`), or right after the project when the
//! configuration names no hardware.

const CONFIG_SEPARATOR: char = '_';
const HARDWARE_PREFIX: &str = "hw";

/// Replace dots with hyphens and lowercase.
pub fn sanitize_name_part(s: &str) -> String {
    s.replace('.', "-").to_lowercase()
}

/// Build the artifact name for a project, build configuration and tag.
///
/// ```
/// use fwflags::artifact_name::build_artifact_name;
///
/// assert_eq!(
///     build_artifact_name("My.Proj", "hw_board_debug", "v1.2.3"),
///     "my-proj_hw_v1-2-3_board_debug"
/// );
/// ```
pub fn build_artifact_name(project: &str, configuration: &str, tag: &str) -> String {
    let project = sanitize_name_part(project);
    let tag = sanitize_name_part(tag);

    let mut parts: Vec<String> = if configuration.is_empty() {
        Vec::new()
    } else {
        configuration
            .split(CONFIG_SEPARATOR)
            .map(sanitize_name_part)
            .collect()
    };

    let insert_at = match parts.iter().position(|p| p.starts_with(HARDWARE_PREFIX)) {
        Some(marker) => marker + 1,
        None => 0,
    };
    parts.insert(insert_at, tag);

    let mut name = project;
    for part in &parts {
        name.push(CONFIG_SEPARATOR);
        name.push_str(part);
    }
    name
}
