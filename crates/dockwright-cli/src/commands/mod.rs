mod hello_world;
mod whalesay;

use std::path::PathBuf;

use dockwright::{BuildOptions, DockwrightConfig, RunOptions, SerializeOptions};

pub use hello_world::hello_world;
pub use whalesay::whalesay;

/// Arguments shared by the example image definitions.
pub struct Example {
    pub config_dir: PathBuf,
    pub tag: Option<String>,
    pub dockerfile_only: bool,
}

impl Example {
    pub(crate) fn load_config(&self) -> anyhow::Result<DockwrightConfig> {
        let config = DockwrightConfig::load(&self.config_dir)?;
        tracing::debug!(dir = %self.config_dir.display(), binary = %config.engine.binary, "config loaded");
        Ok(config)
    }

    pub(crate) fn tag_or(&self, default: &str) -> String {
        match &self.tag {
            Some(tag) => tag.clone(),
            None => default.to_owned(),
        }
    }
}

/// Serialize, build and run options resolved from dockwright.toml.
pub(crate) fn options(config: &DockwrightConfig) -> (SerializeOptions, BuildOptions, RunOptions) {
    (
        SerializeOptions::from_config(&config.dockerfile),
        BuildOptions::from_config(&config.build),
        RunOptions::from_config(&config.run),
    )
}
