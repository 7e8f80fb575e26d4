//! Project configuration, read from `fixport.toml`.
//!
//! ```toml
//! [project]
//! application = "key-auth"
//! version = "1"
//! domain = "appspot.com"
//! datastore = ".fixport/datastore.json"
//!
//! [deploy]
//! tool = "appcfg"
//!
//! [shell]
//! command = ["python"]
//!
//! [schema."app.models.Widget"]
//! kind = "Widget"
//! fields = ["name", "count", "payload"]
//! ```
//!
//! The `[schema.*]` tables populate the registry `loaddata` and `dumpjson`
//! resolve identifiers against.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use fixport_store::{Schema, SchemaRegistry};

#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    pub project: ProjectSection,
    #[serde(default)]
    pub deploy: DeploySection,
    #[serde(default)]
    pub shell: ShellSection,
    #[serde(default)]
    pub schema: BTreeMap<String, SchemaSection>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectSection {
    /// Application id the packaging tool deploys under.
    pub application: String,
    /// Base version string, normally what the live site runs.
    pub version: String,
    /// Domain used to build target hostnames.
    #[serde(default = "default_domain")]
    pub domain: String,
    /// Where the local datastore file lives.
    #[serde(default = "default_datastore")]
    pub datastore: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DeploySection {
    /// External packaging/upload command.
    pub tool: String,
}

impl Default for DeploySection {
    fn default() -> Self {
        Self {
            tool: "appcfg".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ShellSection {
    /// Interactive shell command line; `--cmd` text is appended after `-c`.
    pub command: Vec<String>,
}

impl Default for ShellSection {
    fn default() -> Self {
        Self {
            command: vec!["python".into()],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SchemaSection {
    pub kind: String,
    pub fields: Vec<String>,
}

impl ProjectConfig {
    /// Load and parse the config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("cannot parse {}", path.display()))
    }

    /// Build the schema registry from the `[schema.*]` tables.
    pub fn schema_registry(&self) -> anyhow::Result<SchemaRegistry> {
        let mut registry = SchemaRegistry::new();
        for (identifier, section) in &self.schema {
            registry
                .register(Schema::new(
                    identifier.clone(),
                    section.kind.clone(),
                    section.fields.clone(),
                ))
                .with_context(|| format!("registering schema {identifier}"))?;
        }
        Ok(registry)
    }
}

fn default_domain() -> String {
    "appspot.com".into()
}

fn default_datastore() -> PathBuf {
    PathBuf::from(".fixport/datastore.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [project]
        application = "key-auth"
        version = "1"
    "#;

    #[test]
    fn minimal_config_uses_defaults() {
        let config: ProjectConfig = toml::from_str(MINIMAL).unwrap();
        assert_eq!(config.project.application, "key-auth");
        assert_eq!(config.project.domain, "appspot.com");
        assert_eq!(
            config.project.datastore,
            PathBuf::from(".fixport/datastore.json")
        );
        assert_eq!(config.deploy.tool, "appcfg");
        assert_eq!(config.shell.command, vec!["python"]);
        assert!(config.schema.is_empty());
    }

    #[test]
    fn schema_tables_build_registry() {
        let text = r#"
            [project]
            application = "app"
            version = "1"

            [schema."app.models.Widget"]
            kind = "Widget"
            fields = ["name", "count"]

            [schema."app.models.Shelf"]
            kind = "Shelf"
            fields = ["label"]
        "#;
        let config: ProjectConfig = toml::from_str(text).unwrap();
        let registry = config.schema_registry().unwrap();
        assert_eq!(registry.len(), 2);
        let schema = registry.resolve("app.models.Widget").unwrap();
        assert_eq!(schema.kind, "Widget");
        assert_eq!(schema.fields, vec!["name", "count"]);
    }

    #[test]
    fn missing_project_section_is_error() {
        assert!(toml::from_str::<ProjectConfig>("[deploy]\ntool = \"x\"").is_err());
    }

    #[test]
    fn overridden_sections_parse() {
        let text = r#"
            [project]
            application = "app"
            version = "2"
            domain = "example.com"
            datastore = "var/data.json"

            [deploy]
            tool = "pkgtool"

            [shell]
            command = ["ipython", "--no-banner"]
        "#;
        let config: ProjectConfig = toml::from_str(text).unwrap();
        assert_eq!(config.project.domain, "example.com");
        assert_eq!(config.deploy.tool, "pkgtool");
        assert_eq!(config.shell.command, vec!["ipython", "--no-banner"]);
    }
}
