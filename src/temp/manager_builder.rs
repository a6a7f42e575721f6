/*!
 * Temp Manager Builder
 * Builder pattern for TempManager construction
 */

use super::cleanup::CleanupEngine;
use super::factory::ResourceFactory;
use super::manager::TempManager;
use super::naming::{NameGenerator, RandomTokens, TokenSource};
use super::registry::TrackingRegistry;
use crate::core::config::TempConfig;
use crate::core::errors::Result;
use crate::vfs::{FileSystem, LocalFS};
use std::sync::Arc;
use tracing::debug;

/// Builder for TempManager
pub struct TempManagerBuilder {
    config: TempConfig,
    fs: Option<Arc<dyn FileSystem>>,
    registry: Option<Arc<TrackingRegistry>>,
    tokens: Option<Arc<dyn TokenSource>>,
}

impl TempManagerBuilder {
    /// Create a new TempManager builder
    pub fn new() -> Self {
        Self {
            config: TempConfig::default(),
            fs: None,
            registry: None,
            tokens: None,
        }
    }

    /// Use the given configuration
    pub fn with_config(mut self, config: TempConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a specific filesystem backend (default: host filesystem)
    pub fn with_filesystem(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = Some(fs);
        self
    }

    /// Share an existing registry instead of creating a fresh one
    pub fn with_registry(mut self, registry: Arc<TrackingRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Replace the random part of generated names
    pub fn with_token_source(mut self, tokens: Arc<dyn TokenSource>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Build the TempManager
    ///
    /// Fails with `Configuration` when the config would produce names
    /// outside their parent directory or can never allocate.
    pub fn build(self) -> Result<TempManager> {
        self.config.validate()?;
        Ok(self.assemble())
    }

    /// Wire the components without validating the config
    pub(super) fn assemble(self) -> TempManager {
        let fs = self
            .fs
            .unwrap_or_else(|| Arc::new(LocalFS::system()) as Arc<dyn FileSystem>);
        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(TrackingRegistry::new()));
        let tokens = self
            .tokens
            .unwrap_or_else(|| Arc::new(RandomTokens) as Arc<dyn TokenSource>);

        if self.config.track {
            registry.set_tracking(true);
        }

        let root = self.config.root.clone().unwrap_or_else(|| fs.temp_root());
        debug!(
            backend = fs.name(),
            root = %root.display(),
            max_attempts = self.config.max_attempts,
            track = self.config.track,
            "Building temp manager"
        );

        let names = NameGenerator::with_tokens(
            root,
            self.config.file_prefix,
            self.config.dir_prefix,
            tokens,
        );
        let factory = ResourceFactory::new(
            Arc::clone(&fs),
            names,
            Arc::clone(&registry),
            self.config.max_attempts,
        );
        let cleanup = CleanupEngine::new(fs, Arc::clone(&registry));

        TempManager {
            registry,
            factory,
            cleanup,
        }
    }
}

impl Default for TempManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
