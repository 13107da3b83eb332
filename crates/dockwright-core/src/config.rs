use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File name looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "dockwright.toml";

/// dockwright.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockwrightConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub dockerfile: DockerfileConfig,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Container engine CLI (docker, podman, ...)
    #[serde(default = "default_engine_binary")]
    pub binary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockerfileConfig {
    /// Where `serialize` writes the rendered Dockerfile
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Build context directory passed to `<engine> build`
    #[serde(default = "default_context")]
    pub context: PathBuf,
    /// Extra `<engine> build` flags. An empty value emits the flag alone.
    #[serde(default)]
    pub args: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    /// Extra `<engine> run` flags. An empty value emits the flag alone.
    #[serde(default)]
    pub args: BTreeMap<String, String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: default_engine_binary(),
        }
    }
}

impl Default for DockerfileConfig {
    fn default() -> Self {
        Self {
            output_file: default_output_file(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            context: default_context(),
            args: BTreeMap::new(),
        }
    }
}

impl DockwrightConfig {
    /// Load from dockwright.toml in the given directory, or return defaults if not found.
    pub fn load(project_dir: &Path) -> crate::Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                path: config_path.clone(),
                source: e,
            })?;
        let config = toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
            path: config_path.clone(),
            source: e,
        })?;
        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }
}

fn default_engine_binary() -> String {
    "docker".to_owned()
}

fn default_output_file() -> PathBuf {
    PathBuf::from("./Dockerfile")
}

fn default_context() -> PathBuf {
    PathBuf::from(".")
}
