//! Process launching glue
//!
//! Everything started from here is detached: own process group, no
//! inherited stdio, and its exit status is never looked at.

use std::process::{Command, Stdio};

use super::LensError;

/// Platform opener for paths and URLs
#[cfg(target_os = "macos")]
pub const OPENER: &str = "open";
#[cfg(not(target_os = "macos"))]
pub const OPENER: &str = "xdg-open";

/// Shell used for configured command lines
pub const SHELL: &str = "sh";

/// Run a command line through `sh -c`
pub fn spawn_shell(command: &str) -> Result<(), LensError> {
    spawn_detached(SHELL, &["-c", command])
}

/// Open a path or URL with the platform opener
pub fn open(target: &str) -> Result<(), LensError> {
    spawn_detached(OPENER, &[target])
}

/// Start `program` detached from the terminal
///
/// Only spawn failures are reported. A reaper thread collects the child
/// so finished processes do not linger as zombies.
pub fn spawn_detached(program: &str, args: &[&str]) -> Result<(), LensError> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let mut child = cmd.spawn().map_err(|source| LensError::Spawn {
        program: program.to_string(),
        source,
    })?;

    tracing::info!(program, ?args, pid = child.id(), "spawned");

    let reaper = std::thread::Builder::new()
        .name("lantern-reaper".to_string())
        .spawn(move || {
            let _ = child.wait();
        });
    if let Err(e) = reaper {
        tracing::debug!(error = %e, "could not start reaper thread");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_missing_program_is_spawn_error() {
        let err = spawn_detached("lantern-no-such-program", &[]).unwrap_err();
        match err {
            LensError::Spawn { program, .. } => assert_eq!(program, "lantern-no-such-program"),
            other => panic!("Expected Spawn error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_spawn_shell_true_succeeds() {
        assert!(spawn_shell("true").is_ok());
    }
}
