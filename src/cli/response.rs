//! CLI response formatting and output.
//!
//! Provides the JSON envelope, human-readable error rendering, and exit code
//! mapping shared by the command-line tools.

use serde::Serialize;

use crate::error::{DirCreateDetails, Hint};
use crate::{Error, ErrorCode, Result};

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Hint>>,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize response".to_string()))
        })
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
                details: err.details.clone(),
                hints: if err.hints.is_empty() {
                    None
                } else {
                    Some(err.hints.clone())
                },
            }),
        }
    }
}

fn print_response<T: Serialize>(response: &CliResponse<T>) -> Result<()> {
    use std::io::{self, Write};

    let payload = response.to_json()?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", payload) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(()); // Exit gracefully on SIGPIPE
        }
        return Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        ));
    }
    Ok(())
}

pub fn print_json_result<T: Serialize>(result: &Result<T>) -> Result<()> {
    match result {
        Ok(data) => print_response(&CliResponse::success(data)),
        Err(err) => print_response(&CliResponse::<()>::from_error(err)),
    }
}

/// Lines printed to stderr for an error in human mode.
pub fn human_error_lines(err: &Error) -> Vec<String> {
    let mut lines = vec![format!("Error: {}", err.message)];

    if err.code == ErrorCode::OutputDirCreateFailed {
        if let Ok(details) = serde_json::from_value::<DirCreateDetails>(err.details.clone()) {
            if let Some(cwd) = details.cwd {
                lines.push(format!("CWD: {}", cwd));
            }
            if let Some(parent) = details.parent {
                let mut line = format!("Parent dir: {}", parent.path);
                if let (Some(mode), Some(uid), Some(gid)) = (parent.mode, parent.uid, parent.gid) {
                    line.push_str(&format!(" mode={:#o} uid={} gid={}", mode, uid, gid));
                }
                lines.push(line);
            }
        }
    }

    for hint in &err.hints {
        lines.push(format!("Hint: {}", hint.message));
    }
    lines
}

pub fn print_human_error(err: &Error) {
    for line in human_error_lines(err) {
        eprintln!("{}", line);
    }
}

pub fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::InputNotFound
        | ErrorCode::InputReadFailed
        | ErrorCode::ConfigMissingKey
        | ErrorCode::ConfigInvalidJson
        | ErrorCode::ConfigInvalidValue
        | ErrorCode::ValidationInvalidArgument => 2,

        ErrorCode::OutputDirCreateFailed => 3,

        ErrorCode::OutputWriteFailed
        | ErrorCode::InternalIoError
        | ErrorCode::InternalJsonError => 1,
    }
}

pub fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
