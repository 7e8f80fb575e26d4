//! Interactive shell glue.
//!
//! Launches the configured shell command with the project (and, when a
//! target is selected, that target's version and host) exposed through
//! `FIXPORT_*` environment variables. With a one-off command, the text is
//! passed after `-c` and the shell exits when it finishes. Authentication
//! against a remote deployment is the shell command's own business.

use std::process::Command;

use anyhow::{bail, Context};

use crate::config::ProjectConfig;
use crate::target::DeployTarget;

/// Run the configured shell, interactively or for a single command.
pub fn run_shell(
    config: &ProjectConfig,
    target: Option<&DeployTarget>,
    cmd: Option<&str>,
) -> anyhow::Result<()> {
    let mut parts = config.shell.command.iter();
    let Some(program) = parts.next() else {
        bail!("shell command is empty; set [shell] command in the config");
    };

    let mut command = Command::new(program);
    command.args(parts);
    command.env("FIXPORT_APPLICATION", &config.project.application);
    match target {
        Some(target) => {
            command.env("FIXPORT_VERSION", &target.version);
            command.env("FIXPORT_HOST", &target.host);
        }
        None => {
            command.env("FIXPORT_VERSION", &config.project.version);
        }
    }
    if let Some(cmd) = cmd {
        tracing::info!(cmd, "running shell command");
        command.args(["-c", cmd]);
    }

    let status = command
        .status()
        .with_context(|| format!("spawning shell {program:?}"))?;
    if !status.success() {
        bail!("shell {program:?} exited with {status}");
    }
    Ok(())
}
