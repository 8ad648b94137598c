use crate::error::{NotewiseError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// Clipboard programs tried in order; the first that can be spawned wins.
#[cfg(target_os = "macos")]
const CANDIDATES: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const CANDIDATES: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CANDIDATES: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Copies text to the system clipboard by piping it into a platform tool.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut last_error = None;
    for (program, args) in CANDIDATES {
        match Command::new(program)
            .args(*args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => return pipe_into(program, child, text),
            Err(e) => last_error = Some(format!("{}: {}", program, e)),
        }
    }

    let tried: Vec<&str> = CANDIDATES.iter().map(|(program, _)| *program).collect();
    Err(NotewiseError::Unsupported(format!(
        "No clipboard tool available (tried {}){}",
        tried.join(", "),
        last_error.map(|e| format!(": {}", e)).unwrap_or_default()
    )))
}

fn pipe_into(program: &str, mut child: std::process::Child, text: &str) -> Result<()> {
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| NotewiseError::Api(format!("Failed to write to {}: {}", program, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| NotewiseError::Api(format!("Failed to wait for {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(NotewiseError::Api(format!("{} exited with error", program)))
    }
}
