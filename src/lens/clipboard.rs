//! Clipboard glue
//!
//! Pipes text into the first clipboard tool found on `PATH`.
//! Detection order: pbcopy (macOS) → wl-copy (Wayland) → xclip (X11) → xsel (X11 fallback)

use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use super::LensError;

const CLIPBOARD_TOOLS: &[&[&str]] = &[
    &["pbcopy"],
    &["wl-copy"],
    &["xclip", "-selection", "clipboard"],
    &["xsel", "--clipboard", "--input"],
];

/// Copy text to the system clipboard and wait for the tool to exit
pub fn copy_to_clipboard(text: &str) -> Result<(), LensError> {
    let cwd = std::env::current_dir().unwrap_or_default();
    let Some(tool) = find_tool(std::env::var_os("PATH"), &cwd) else {
        return Err(LensError::Clipboard(
            "No clipboard tool found (install pbcopy, wl-copy, xclip or xsel)".to_string(),
        ));
    };
    let program = tool[0];

    let mut child = Command::new(program)
        .args(&tool[1..])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| LensError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| LensError::Clipboard(format!("writing to {}: {}", program, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| LensError::Clipboard(format!("waiting for {}: {}", program, e)))?;

    if status.success() {
        tracing::debug!(program, bytes = text.len(), "copied to clipboard");
        Ok(())
    } else {
        Err(LensError::Clipboard(format!("{} exited with {}", program, status)))
    }
}

/// First clipboard tool with an executable on `paths`
fn find_tool(paths: Option<impl AsRef<OsStr>>, cwd: &Path) -> Option<&'static [&'static str]> {
    let paths = paths?;
    CLIPBOARD_TOOLS
        .iter()
        .copied()
        .find(|tool| which::which_in(tool[0], Some(paths.as_ref()), cwd).is_ok())
}
