use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fixport",
    about = "Deployment and datastore fixture tasks",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Deployment target for tasks that operate on a deployment
    #[arg(long, global = true, value_enum)]
    pub target: Option<TargetKind>,

    /// Non-default version for the selected target
    #[arg(long, global = true)]
    pub target_version: Option<String>,

    /// Path to the project config file
    #[arg(long, global = true, default_value = "fixport.toml")]
    pub config: String,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum TargetKind {
    Staging,
    Production,
}

#[derive(Subcommand)]
pub enum Command {
    /// Deploy the project to the selected target via the packaging tool
    Deploy(DeployArgs),
    /// Deploy twice: once git-tagged, once on the configured base version
    Livedeploy(LivedeployArgs),
    /// Load JSON fixtures into the local datastore
    Loaddata(LoaddataArgs),
    /// Dump kinds from the local datastore as JSON on stdout
    Dumpjson(DumpjsonArgs),
    /// Operate a deployment's cache: stats, flush, or clear
    Memcache(MemcacheArgs),
    /// Launch an interactive shell, local or against a target
    Shell(ShellArgs),
}

#[derive(Args)]
pub struct DeployArgs {
    /// Append the current git revision to the version string
    #[arg(long)]
    pub tag: bool,
    /// Deploy from a clean clone instead of the working directory
    #[arg(long)]
    pub export: bool,
}

#[derive(Args)]
pub struct LivedeployArgs {
    /// Deploy from a clean clone instead of the working directory
    #[arg(long)]
    pub export: bool,
}

#[derive(Args)]
pub struct LoaddataArgs {
    /// Path to the fixture file to load
    pub path: String,
}

#[derive(Args)]
pub struct DumpjsonArgs {
    /// Comma-separated schema identifiers, e.g. `app.models.Widget`
    pub kinds: String,
}

#[derive(Args)]
pub struct MemcacheArgs {
    /// Action to take: stats, flush, or clear
    #[arg(default_value = "stats")]
    pub action: String,
}

#[derive(Args)]
pub struct ShellArgs {
    /// Run this one command in the shell and exit
    #[arg(long)]
    pub cmd: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_deploy() {
        let cli = Cli::try_parse_from(["fixport", "--target", "staging", "deploy"]).unwrap();
        assert_eq!(cli.target, Some(TargetKind::Staging));
        assert!(matches!(cli.command, Command::Deploy(_)));
    }

    #[test]
    fn parse_deploy_tag_export() {
        let cli = Cli::try_parse_from([
            "fixport", "--target", "production", "deploy", "--tag", "--export",
        ])
        .unwrap();
        if let Command::Deploy(args) = cli.command {
            assert!(args.tag);
            assert!(args.export);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_target_version() {
        let cli = Cli::try_parse_from([
            "fixport", "--target", "staging", "--target-version", "rc1", "deploy",
        ])
        .unwrap();
        assert_eq!(cli.target_version, Some("rc1".into()));
    }

    #[test]
    fn parse_loaddata() {
        let cli = Cli::try_parse_from(["fixport", "loaddata", "fixtures/widgets.json"]).unwrap();
        if let Command::Loaddata(args) = cli.command {
            assert_eq!(args.path, "fixtures/widgets.json");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_dumpjson() {
        let cli =
            Cli::try_parse_from(["fixport", "dumpjson", "app.models.Widget,app.models.Shelf"])
                .unwrap();
        if let Command::Dumpjson(args) = cli.command {
            assert_eq!(args.kinds, "app.models.Widget,app.models.Shelf");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_memcache_defaults_to_stats() {
        let cli = Cli::try_parse_from(["fixport", "memcache"]).unwrap();
        if let Command::Memcache(args) = cli.command {
            assert_eq!(args.action, "stats");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_shell_cmd() {
        let cli = Cli::try_parse_from(["fixport", "shell", "--cmd", "stats()"]).unwrap();
        if let Command::Shell(args) = cli.command {
            assert_eq!(args.cmd, Some("stats()".into()));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_custom_config_path() {
        let cli = Cli::try_parse_from(["fixport", "--config", "other.toml", "shell"]).unwrap();
        assert_eq!(cli.config, "other.toml");
    }

    #[test]
    fn no_target_parses() {
        let cli = Cli::try_parse_from(["fixport", "shell"]).unwrap();
        assert!(cli.target.is_none());
    }
}
