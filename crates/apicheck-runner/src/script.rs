//! Setup and cleanup scripts

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

const SHELL: &str = "/bin/bash";

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("unable to execute script {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("script {} did not complete successfully: {status}", .path.display())]
    Failed { path: PathBuf, status: ExitStatus },
}

/// Run `path` with `/bin/bash`. An empty path does nothing.
///
/// With `mute`, the script's stdout and stderr are discarded; otherwise
/// they are inherited.
///
/// # Errors
///
/// Returns error if bash cannot be started or the script exits non-zero.
pub fn run_script(path: &str, mute: bool) -> Result<(), ScriptError> {
    run_with_shell(Path::new(SHELL), path, mute)
}

fn run_with_shell(shell: &Path, path: &str, mute: bool) -> Result<(), ScriptError> {
    if path.is_empty() {
        return Ok(());
    }
    tracing::info!(script = path, "running script");

    let mut cmd = Command::new(shell);
    cmd.arg(path);
    if mute {
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
    }

    let status = cmd.status().map_err(|source| ScriptError::Spawn {
        path: PathBuf::from(path),
        source,
    })?;
    if !status.success() {
        return Err(ScriptError::Failed {
            path: PathBuf::from(path),
            status,
        });
    }
    Ok(())
}
