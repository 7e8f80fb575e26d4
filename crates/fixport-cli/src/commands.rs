use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail};
use colored::Colorize;

use fixport_fixtures::{dump_entities, load_fixtures, LocalDatastore};

use crate::cli::*;
use crate::config::ProjectConfig;
use crate::deploy;
use crate::shell::run_shell;
use crate::target::{resolve_target, DeployTarget};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = ProjectConfig::load(&cli.config)?;
    let target = cli
        .target
        .map(|kind| resolve_target(kind, cli.target_version.as_deref(), &config));

    match cli.command {
        Command::Deploy(args) => cmd_deploy(&config, target.as_ref(), args.tag, args.export),
        Command::Livedeploy(args) => cmd_livedeploy(&config, target.as_ref(), args.export),
        Command::Loaddata(args) => cmd_loaddata(&config, target.as_ref(), args),
        Command::Dumpjson(args) => cmd_dumpjson(&config, target.as_ref(), args),
        Command::Memcache(args) => cmd_memcache(&config, target.as_ref(), args),
        Command::Shell(args) => cmd_shell(&config, target.as_ref(), args),
    }
}

fn require_target<'t>(target: Option<&'t DeployTarget>) -> anyhow::Result<&'t DeployTarget> {
    target.ok_or_else(|| anyhow!("a deployment target is required; pass --target staging|production"))
}

fn cmd_deploy(
    config: &ProjectConfig,
    target: Option<&DeployTarget>,
    tag: bool,
    export: bool,
) -> anyhow::Result<()> {
    let target = require_target(target)?;
    let mut version = target.version.clone();
    if tag {
        version = format!("{version}-{}", deploy::git_short_revision()?);
    }
    deploy_once(config, &version, export)
}

fn cmd_livedeploy(
    config: &ProjectConfig,
    target: Option<&DeployTarget>,
    export: bool,
) -> anyhow::Result<()> {
    let target = require_target(target)?;
    // First pass records the exact git revision under a tagged version...
    let tagged = format!("{}-{}", target.version, deploy::git_short_revision()?);
    deploy_once(config, &tagged, export)?;
    // ...then the live site gets the configured base version.
    deploy_once(config, &config.project.version, export)
}

fn deploy_once(config: &ProjectConfig, version: &str, export: bool) -> anyhow::Result<()> {
    // Keep the clone handle alive until the tool has run; dropping it
    // removes the directory.
    let clone = if export {
        Some(deploy::export_clean_clone(&config.project.application)?)
    } else {
        None
    };
    let src: PathBuf = match &clone {
        Some(dir) => dir.path().to_path_buf(),
        None => PathBuf::from("."),
    };

    deploy::run_packaging_tool(&config.deploy.tool, &config.project.application, version, &src)?;
    println!(
        "{} Deployed {} version {}",
        "✓".green().bold(),
        config.project.application.bold(),
        version.yellow()
    );
    Ok(())
}

fn cmd_loaddata(
    config: &ProjectConfig,
    target: Option<&DeployTarget>,
    args: LoaddataArgs,
) -> anyhow::Result<()> {
    reject_remote_data_op(target, "loaddata")?;
    let registry = config.schema_registry()?;
    let store = LocalDatastore::open(&config.project.datastore)?;
    let count = load_fixtures(Path::new(&args.path), &registry, &store)?;
    println!(
        "{} Loaded {} fixtures from {}",
        "✓".green().bold(),
        count.to_string().bold(),
        args.path
    );
    Ok(())
}

fn cmd_dumpjson(
    config: &ProjectConfig,
    target: Option<&DeployTarget>,
    args: DumpjsonArgs,
) -> anyhow::Result<()> {
    reject_remote_data_op(target, "dumpjson")?;
    let registry = config.schema_registry()?;
    let store = LocalDatastore::open(&config.project.datastore)?;
    for identifier in args.kinds.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        println!("{}", dump_entities(identifier, &registry, &store)?);
    }
    Ok(())
}

fn reject_remote_data_op(target: Option<&DeployTarget>, task: &str) -> anyhow::Result<()> {
    if target.is_some() {
        bail!(
            "{task} operates on the local datastore only; \
             run it on the deployment host to touch remote data"
        );
    }
    Ok(())
}

fn cmd_memcache(
    config: &ProjectConfig,
    target: Option<&DeployTarget>,
    args: MemcacheArgs,
) -> anyhow::Result<()> {
    let target = require_target(target)?;
    let Some(remote_cmd) = memcache_remote_command(&args.action) else {
        bail!("invalid memcache command {:?}; valid commands: stats, flush, clear", args.action);
    };
    run_shell(config, Some(target), Some(remote_cmd))
}

/// Map a memcache action to the command the remote shell runs.
/// `clear` is an alias for `flush`.
fn memcache_remote_command(action: &str) -> Option<&'static str> {
    match action {
        "stats" => Some("memcache stats"),
        "flush" | "clear" => Some("memcache flush"),
        _ => None,
    }
}

fn cmd_shell(
    config: &ProjectConfig,
    target: Option<&DeployTarget>,
    args: ShellArgs,
) -> anyhow::Result<()> {
    match target {
        Some(target) => println!(
            "Remote shell for {} ({})",
            config.project.application.bold(),
            target.host.cyan()
        ),
        None => println!("Local shell for {}", config.project.application.bold()),
    }
    run_shell(config, target, args.cmd.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memcache_action_mapping() {
        assert_eq!(memcache_remote_command("stats"), Some("memcache stats"));
        assert_eq!(memcache_remote_command("flush"), Some("memcache flush"));
        assert_eq!(memcache_remote_command("clear"), Some("memcache flush"));
        assert_eq!(memcache_remote_command("nuke"), None);
    }

    #[test]
    fn require_target_rejects_none() {
        assert!(require_target(None).is_err());
    }

    #[test]
    fn remote_data_ops_are_rejected() {
        let config: ProjectConfig = toml::from_str(
            r#"
            [project]
            application = "app"
            version = "1"
        "#,
        )
        .unwrap();
        let target = resolve_target(TargetKind::Staging, None, &config);
        assert!(reject_remote_data_op(Some(&target), "loaddata").is_err());
        assert!(reject_remote_data_op(None, "loaddata").is_ok());
    }
}
