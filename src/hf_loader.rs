//! Downloads to Path: "~/.cache/huggingface/hub/" unless `HF_HOME` or `cache_dir` say otherwise.
use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
    time::{Duration, SystemTime},
};

use bon::Builder;
use dotenvy::dotenv;
use hf_hub::{
    api::sync::{Api, ApiBuilder, ApiError},
    Cache,
};
use secrecy::{ExposeSecret, SecretString};

use crate::selectors::PretrainedSource;

/// Default name of the environment variable consulted for a token.
pub const DEFAULT_ENV_VAR: &str = "HUGGING_FACE_TOKEN";

// hf-hub lock files older than this are left over from a crashed download.
const STALE_LOCK_AGE: Duration = Duration::from_secs(2 * 60 * 60);

/// Configuration for a [`HuggingFaceLoader`].
#[derive(Builder, Debug)]
#[builder(on(String, into))]
pub struct HfLoaderConfig {
    /// Explicit token. If `None`, the loader reads [`HfLoaderConfig::token_env_var`].
    pub token: Option<SecretString>,

    /// Name of the environment variable used when `token` is `None`.
    #[builder(default = DEFAULT_ENV_VAR.to_string())]
    pub token_env_var: String,

    /// Overrides the hf-hub cache directory.
    pub cache_dir: Option<PathBuf>,

    /// Custom endpoint (useful for on-prem mirrors).
    pub endpoint: Option<String>,

    /// Emit progress bars during downloads.
    #[builder(default)]
    pub progress: bool,
}

impl Default for HfLoaderConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Fetches tokenizer files from the Hugging Face Hub.
///
/// The hub client is built on first use, so constructing a loader never touches the
/// network or the environment.
#[derive(Debug, Default)]
pub struct HuggingFaceLoader {
    config: HfLoaderConfig,
    hf_api: OnceLock<Api>,
}

impl HuggingFaceLoader {
    pub fn new(config: HfLoaderConfig) -> Self {
        Self {
            config,
            hf_api: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &HfLoaderConfig {
        &self.config
    }

    pub fn hf_api(&self) -> crate::Result<&Api> {
        if let Some(api) = self.hf_api.get() {
            return Ok(api);
        }
        let api = self.build_api()?;
        Ok(self.hf_api.get_or_init(|| api))
    }

    fn build_api(&self) -> Result<Api, ApiError> {
        let cache = match &self.config.cache_dir {
            Some(cache_dir) => Cache::new(cache_dir.clone()),
            None => Cache::from_env(),
        };
        let mut builder = ApiBuilder::from_cache(cache)
            .with_progress(self.config.progress)
            .with_token(self.load_hf_token());
        if let Some(endpoint) = &self.config.endpoint {
            builder = builder.with_endpoint(endpoint.to_string());
        }
        builder.build()
    }

    fn load_hf_token(&self) -> Option<String> {
        if let Some(hf_token) = &self.config.token {
            crate::trace!("Using hf_token from config");
            return Some(hf_token.expose_secret().to_owned());
        }

        dotenv().ok();

        match dotenvy::var(&self.config.token_env_var) {
            Ok(hf_token) => Some(hf_token),
            Err(_) => {
                crate::trace!(
                    "{} not found in dotenv, nor was it set manually",
                    self.config.token_env_var
                );
                None
            }
        }
    }

    /// Resolves `file_name` from `source` to a local path, downloading it if needed.
    pub fn load_file(&self, source: &PretrainedSource, file_name: &str) -> crate::Result<PathBuf> {
        let repo_id = source.repo_id.to_string();
        let file_path = source.file_path(file_name);
        crate::debug!(%repo_id, %file_path, "Loading file from Hugging Face Hub");

        let api = self.hf_api()?;
        match api.model(repo_id.clone()).get(&file_path) {
            Ok(path) => Ok(path),
            Err(ApiError::LockAcquisition(lock_path)) if Self::is_lock_stale(&lock_path) => {
                crate::warn!(?lock_path, "Removing stale hf-hub lock file");
                std::fs::remove_file(&lock_path)?;
                Ok(api.model(repo_id).get(&file_path)?)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn is_lock_stale(lock_path: &Path) -> bool {
        std::fs::metadata(lock_path)
            .and_then(|metadata| metadata.modified())
            .ok()
            .and_then(|modified| SystemTime::now().duration_since(modified).ok())
            .is_some_and(|age| age > STALE_LOCK_AGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = HfLoaderConfig::default();
        assert!(config.token.is_none());
        assert_eq!(config.token_env_var, DEFAULT_ENV_VAR);
        assert!(config.cache_dir.is_none());
        assert!(!config.progress);
    }

    #[test]
    fn explicit_token_wins_over_env() {
        let loader = HuggingFaceLoader::new(
            HfLoaderConfig::builder()
                .token(SecretString::from("hf_explicit".to_string()))
                .token_env_var("CLIP_TOKEN_COUNT_TEST_UNSET_VAR")
                .build(),
        );
        assert_eq!(loader.load_hf_token().as_deref(), Some("hf_explicit"));
    }

    #[test]
    fn missing_env_var_is_anonymous() {
        let loader = HuggingFaceLoader::new(
            HfLoaderConfig::builder()
                .token_env_var("CLIP_TOKEN_COUNT_TEST_UNSET_VAR")
                .build(),
        );
        assert_eq!(loader.load_hf_token(), None);
    }

    #[test]
    fn fresh_lock_is_not_stale() {
        let lock = tempfile::NamedTempFile::new().unwrap();
        assert!(!HuggingFaceLoader::is_lock_stale(lock.path()));
        assert!(!HuggingFaceLoader::is_lock_stale(Path::new(
            "/definitely/not/a/lock/file.lock"
        )));
    }
}
