//! # Runtime Configuration Module
//!
//! Settings that shape how requests are normalized and where the route table
//! comes from. Values come from an optional YAML file, then environment
//! variables override them.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `MICROROUTE_ROUTES` | `config/routes.yaml` | Route table file |
//! | `MICROROUTE_SCRIPT_NAME` | `/index.php` | Script/base prefix stripped from request URIs |
//! | `MICROROUTE_STRICT_PATHS` | `false` | Use the fixpoint path normalizer |
//! | `MICROROUTE_HOT_RELOAD` | `false` | Recompile routes when the route file changes |
//! | `MICROROUTE_LOGIN_ROUTE` | `login` | Route used for session login redirects |
//!
//! Boolean variables accept `1`, `true`, `yes` and `on` (any case).
//!
//! ## Usage
//!
//! ```rust
//! use microroute::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("routes from {}", config.routes_path.display());
//! ```
//!
//! ## Example Configuration File
//!
//! ```yaml
//! routes_path: config/routes.yaml
//! script_name: /shop/index.php
//! strict_paths: true
//! ```

use crate::context::DEFAULT_LOGIN_ROUTE;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Runtime configuration for an [`Application`](crate::app::Application).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Route table file (YAML or JSON)
    pub routes_path: PathBuf,
    /// Script/base prefix stripped from request URIs
    pub script_name: String,
    /// Use [`normalize_strict`](crate::path::normalize_strict) instead of the single-pass normalizer
    pub strict_paths: bool,
    /// Watch the route file and recompile on change
    pub hot_reload: bool,
    /// Route login redirects point at
    pub login_route: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            routes_path: PathBuf::from("config/routes.yaml"),
            script_name: "/index.php".to_string(),
            strict_paths: false,
            hot_reload: false,
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl RuntimeConfig {
    /// Defaults overridden by environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// YAML file overridden by environment variables. Keys missing from the
    /// file keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self::read_file(path.as_ref())?.with_env_overrides())
    }

    fn read_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Apply `MICROROUTE_*` variables on top of the current values.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(routes) = lookup("MICROROUTE_ROUTES") {
            self.routes_path = PathBuf::from(routes);
        }
        if let Some(script) = lookup("MICROROUTE_SCRIPT_NAME") {
            self.script_name = script;
        }
        if let Some(strict) = lookup("MICROROUTE_STRICT_PATHS").as_deref().and_then(parse_bool) {
            self.strict_paths = strict;
        }
        if let Some(reload) = lookup("MICROROUTE_HOT_RELOAD").as_deref().and_then(parse_bool) {
            self.hot_reload = reload;
        }
        if let Some(login) = lookup("MICROROUTE_LOGIN_ROUTE") {
            self.login_route = login;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.script_name, "/index.php");
        assert!(!config.strict_paths);
        assert_eq!(config.routes_path, PathBuf::from("config/routes.yaml"));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MICROROUTE_SCRIPT_NAME", "/app/index.php"),
            ("MICROROUTE_STRICT_PATHS", "YES"),
            ("MICROROUTE_HOT_RELOAD", "garbage"),
        ]
        .into_iter()
        .collect();
        let config = RuntimeConfig::default()
            .with_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.script_name, "/app/index.php");
        assert!(config.strict_paths);
        assert!(!config.hot_reload);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: RuntimeConfig = serde_yaml::from_str("strict_paths: true\n").unwrap();
        assert!(config.strict_paths);
        assert_eq!(config.login_route, "login");
    }

    #[test]
    fn test_file_values_then_env_overrides() {
        let file = config_file(
            "routes_path: /etc/microroute/routes.json\nscript_name: /shop/index.php\nlogin_route: auth/signin\n",
        );
        let config = RuntimeConfig::read_file(file.path()).unwrap();
        assert_eq!(config.routes_path, PathBuf::from("/etc/microroute/routes.json"));
        assert_eq!(config.script_name, "/shop/index.php");
        assert_eq!(config.login_route, "auth/signin");
        assert!(!config.hot_reload);

        let config = config.with_overrides(|key| {
            (key == "MICROROUTE_SCRIPT_NAME").then(|| "/app/index.php".to_string())
        });
        assert_eq!(config.script_name, "/app/index.php");
        assert_eq!(config.login_route, "auth/signin");
    }

    #[test]
    fn test_from_file_errors_name_the_path() {
        let err = RuntimeConfig::from_file("/no/such/microroute.yaml").unwrap_err();
        assert!(format!("{err:#}").contains("/no/such/microroute.yaml"));

        let file = config_file("strict_paths: [not, a, bool]\n");
        let err = RuntimeConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse config"));
    }
}
