//! Deployment glue: git export clones and the external packaging tool.

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context};
use tempfile::TempDir;

/// Short revision of the working directory's git HEAD.
pub fn git_short_revision() -> anyhow::Result<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .context("running git rev-parse")?;
    if !output.status.success() {
        bail!(
            "git rev-parse failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    let revision = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if revision.is_empty() {
        bail!("git rev-parse produced no revision");
    }
    Ok(revision)
}

/// Clone the working directory into a fresh temp dir, check out submodules,
/// and strip all git metadata, producing a clean tree to deploy from.
///
/// The directory is removed when the returned handle drops.
pub fn export_clean_clone(application: &str) -> anyhow::Result<TempDir> {
    let dir = tempfile::Builder::new()
        .prefix(application)
        .tempdir()
        .context("creating export directory")?;
    tracing::info!(path = %dir.path().display(), "exporting clean clone");

    run_checked(Command::new("git").arg("clone").arg(".").arg(dir.path()))?;
    run_checked(
        Command::new("git")
            .current_dir(dir.path())
            .args(["submodule", "update", "--init", "--recursive"]),
    )?;
    strip_git_metadata(dir.path())?;
    Ok(dir)
}

/// Invoke the external packaging/upload tool:
/// `<tool> -A <application> -V <version> update <src>`.
pub fn run_packaging_tool(
    tool: &str,
    application: &str,
    version: &str,
    src: &Path,
) -> anyhow::Result<()> {
    tracing::info!(tool, application, version, src = %src.display(), "running packaging tool");
    let status = Command::new(tool)
        .args(["-A", application, "-V", version, "update"])
        .arg(src)
        .status()
        .with_context(|| format!("running packaging tool {tool:?}"))?;
    if !status.success() {
        bail!("packaging tool {tool:?} exited with {status}");
    }
    Ok(())
}

/// Remove every `.git*` file and directory under `root`.
fn strip_git_metadata(root: &Path) -> anyhow::Result<()> {
    let mut doomed = Vec::new();
    let mut walker = walkdir::WalkDir::new(root).into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry.context("walking export clone")?;
        let name = entry.file_name().to_string_lossy();
        if name.starts_with(".git") {
            if entry.file_type().is_dir() {
                // Don't descend into a tree we're about to remove.
                walker.skip_current_dir();
            }
            doomed.push((entry.path().to_path_buf(), entry.file_type().is_dir()));
        }
    }
    for (path, is_dir) in doomed {
        if is_dir {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        }
        .with_context(|| format!("removing {}", path.display()))?;
    }
    Ok(())
}

fn run_checked(command: &mut Command) -> anyhow::Result<()> {
    let status = command
        .status()
        .with_context(|| format!("spawning {:?}", command.get_program()))?;
    if !status.success() {
        bail!("{:?} exited with {status}", command.get_program());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_git_metadata_removes_git_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".git/objects")).unwrap();
        fs::create_dir_all(dir.path().join("sub/.git")).unwrap();
        fs::write(dir.path().join(".gitignore"), "target\n").unwrap();
        fs::write(dir.path().join("sub/.gitmodules"), "").unwrap();
        fs::write(dir.path().join("keep.rs"), "fn main() {}\n").unwrap();

        strip_git_metadata(dir.path()).unwrap();

        assert!(!dir.path().join(".git").exists());
        assert!(!dir.path().join(".gitignore").exists());
        assert!(!dir.path().join("sub/.git").exists());
        assert!(!dir.path().join("sub/.gitmodules").exists());
        assert!(dir.path().join("keep.rs").exists());
    }

    #[test]
    fn strip_git_metadata_on_clean_tree_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.rs"), "").unwrap();
        strip_git_metadata(dir.path()).unwrap();
        assert!(dir.path().join("main.rs").exists());
    }
}
