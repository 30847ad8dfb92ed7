/// Script loading trait and implementations
///
/// Choice scripts are referred to by name (for example `NewGameScript`). This
/// module provides an async trait for fetching a script's source, with
/// filesystem-backed and in-memory implementations.
use async_trait::async_trait;
use std::collections::HashMap;
#[cfg(feature = "tokio-runtime")]
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

/// File extension tried first by [`FolderLoader`]
pub const SCRIPT_EXTENSION: &str = "choice";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("script not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("invalid script name: {0}")]
    InvalidPath(String),
}

/// Async trait for loading script sources by name
#[async_trait]
pub trait ScriptLoader: Send + Sync {
    /// Load a script's text by its name
    async fn load(&self, name: &str) -> Result<String, LoadError>;
}

/// Loads scripts from a directory. Names are file names, with or without the
/// `.choice` extension.
///
/// Only available with the `tokio-runtime` feature.
#[cfg(feature = "tokio-runtime")]
pub struct FolderLoader {
    base_path: PathBuf,
}

#[cfg(feature = "tokio-runtime")]
impl FolderLoader {
    /// # Example
    /// ```no_run
    /// use choice_tree::loader::FolderLoader;
    /// use std::path::PathBuf;
    ///
    /// let loader = FolderLoader::new(PathBuf::from("./scripts"));
    /// ```
    pub fn new(base_path: PathBuf) -> Self {
        FolderLoader { base_path }
    }
}

#[cfg(feature = "tokio-runtime")]
#[async_trait]
impl ScriptLoader for FolderLoader {
    async fn load(&self, name: &str) -> Result<String, LoadError> {
        // Names must stay inside base_path
        let sanitized = name.replace("..", "").replace(['/', '\\'], "");

        if sanitized.is_empty() {
            return Err(LoadError::InvalidPath(name.to_string()));
        }

        let paths = [
            self.base_path
                .join(format!("{}.{}", sanitized, SCRIPT_EXTENSION)),
            self.base_path.join(&sanitized),
        ];

        for path in paths {
            match tokio::fs::read_to_string(&path).await {
                Ok(content) => {
                    log::debug!("loaded script '{}' from {}", name, path.display());
                    return Ok(content);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(LoadError::IoError(e.to_string())),
            }
        }

        Err(LoadError::NotFound(name.to_string()))
    }
}

/// Scripts held in memory, shared between clones
#[derive(Clone, Default)]
pub struct InMemoryLoader {
    scripts: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a script
    ///
    /// # Example
    /// ```
    /// use choice_tree::loader::InMemoryLoader;
    ///
    /// let loader = InMemoryLoader::new();
    /// loader.add("Intro", "Welcome aboard.\n> Look around\n");
    /// assert!(loader.contains("Intro"));
    /// ```
    pub fn add(&self, name: impl Into<String>, source: impl Into<String>) {
        let mut scripts = self.scripts.write().unwrap_or_else(PoisonError::into_inner);
        scripts.insert(name.into(), source.into());
    }

    /// Returns `true` if the script was present
    pub fn remove(&self, name: &str) -> bool {
        let mut scripts = self.scripts.write().unwrap_or_else(PoisonError::into_inner);
        scripts.remove(name).is_some()
    }

    pub fn clear(&self) {
        let mut scripts = self.scripts.write().unwrap_or_else(PoisonError::into_inner);
        scripts.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        let scripts = self.scripts.read().unwrap_or_else(PoisonError::into_inner);
        scripts.contains_key(name)
    }
}

#[async_trait]
impl ScriptLoader for InMemoryLoader {
    async fn load(&self, name: &str) -> Result<String, LoadError> {
        let scripts = self.scripts.read().unwrap_or_else(PoisonError::into_inner);
        scripts
            .get(name)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(name.to_string()))
    }
}

/// Tries loaders in order until one finds the script. Errors other than
/// `NotFound` stop the search.
#[derive(Clone, Default)]
pub struct ChainLoader {
    loaders: Vec<Arc<dyn ScriptLoader>>,
}

impl ChainLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Example
    /// ```
    /// use choice_tree::loader::{ChainLoader, InMemoryLoader};
    /// use std::sync::Arc;
    ///
    /// let chain = ChainLoader::new().with_loader(Arc::new(InMemoryLoader::new()));
    /// ```
    pub fn with_loader(mut self, loader: Arc<dyn ScriptLoader>) -> Self {
        self.loaders.push(loader);
        self
    }
}

#[async_trait]
impl ScriptLoader for ChainLoader {
    async fn load(&self, name: &str) -> Result<String, LoadError> {
        for loader in &self.loaders {
            match loader.load(name).await {
                Ok(source) => return Ok(source),
                Err(LoadError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(LoadError::NotFound(name.to_string()))
    }
}
