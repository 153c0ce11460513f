//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use bookshelf_commerce::backend::StorefrontApi;
use bookshelf_commerce::session::StorefrontSession;
use bookshelf_commerce::UserId;
use bookshelf_data::{FetchClient, TimeoutConfig};

use crate::config::CliConfig;
use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["bookshelf.toml", ".bookshelf.toml", "bookshelf.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
}

impl Context {
    /// Load context from an explicit config file, or search for one.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let config = match config_path {
            Some(path) => CliConfig::load(Path::new(path))?,
            None => {
                let cwd = std::env::current_dir().context("Failed to get current directory")?;
                match find_config(&cwd) {
                    Some(path) => {
                        output.debug(&format!("Using config {}", path.display()));
                        CliConfig::load(&path)?
                    }
                    None => CliConfig::default(),
                }
            }
        };

        Ok(Self { config, output })
    }

    /// Build the HTTP client for the configured API.
    pub fn api(&self) -> Result<Arc<StorefrontApi>> {
        let client = FetchClient::http(TimeoutConfig::from_total(self.config.api.timeout()))
            .context("Failed to build HTTP client")?
            .with_base_url(self.config.api.base_url.clone());
        Ok(Arc::new(StorefrontApi::new(client)))
    }

    /// Start a shopping session against the configured API.
    pub fn session(&self) -> Result<StorefrontSession> {
        let user_id = UserId::new(self.config.session.user_id.clone());
        Ok(StorefrontSession::over_api(user_id, self.api()?))
    }
}

/// Walk up from `start` looking for a config file.
fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
