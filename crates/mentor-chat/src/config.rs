//! Startup configuration read from the `api_info.env` file.

use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::path::{Path, PathBuf};

use mentor_chat_openai_model::{OpenAIConfig, OpenAIConfigBuilder};

/// Name of the environment file holding the API secret.
pub const ENV_FILE_NAME: &str = "api_info.env";
/// Key of the API secret.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Key of the optional API root override.
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
/// Key of the optional model override.
pub const MODEL_VAR: &str = "OPENAI_MODEL";

/// Returned when the environment file exists but cannot be read.
#[derive(Debug)]
pub struct ConfigError {
    path: PathBuf,
    source: dotenvy::Error,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "failed to read {}: {}", self.path.display(), self.source)
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Settings for reaching the completion API.
///
/// Values from the environment file win over the process environment.
/// The file is read once and the process environment is left untouched.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ChatConfig {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    env_file: Option<PathBuf>,
}

impl ChatConfig {
    /// Loads the configuration, looking for [`ENV_FILE_NAME`] next to the
    /// executable first and then in the working directory.
    pub fn load() -> Result<Self, ConfigError> {
        let env_file = find_env_file(candidate_dirs());
        Self::from_sources(env_file.as_deref(), |key| env::var(key).ok())
    }

    /// Builds the configuration from an optional environment file and a
    /// fallback lookup for keys the file does not define.
    pub fn from_sources(
        env_file: Option<&Path>,
        fallback: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut file_vars = HashMap::new();
        if let Some(path) = env_file {
            let to_error = |source| ConfigError {
                path: path.to_path_buf(),
                source,
            };
            for item in dotenvy::from_path_iter(path).map_err(to_error)? {
                let (key, value) = item.map_err(to_error)?;
                file_vars.insert(key, value);
            }
            debug!(path = %path.display(), keys = file_vars.len(), "read env file");
        }

        let lookup = |key: &str| {
            file_vars
                .get(key)
                .cloned()
                .or_else(|| fallback(key))
                .filter(|value| !value.trim().is_empty())
        };
        Ok(Self {
            api_key: lookup(API_KEY_VAR),
            base_url: lookup(BASE_URL_VAR),
            model: lookup(MODEL_VAR),
            env_file: env_file.map(Path::to_path_buf),
        })
    }

    /// Returns `true` if an API secret was found.
    #[inline]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// The environment file that was read, if any.
    #[inline]
    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }

    /// Converts into the provider configuration.
    ///
    /// A missing secret is not an error here: the first request fails
    /// with an authentication error instead.
    pub fn openai_config(&self) -> OpenAIConfig {
        if self.api_key.is_none() {
            warn!("{API_KEY_VAR} is not set, requests will not authenticate");
        }
        let mut builder = OpenAIConfigBuilder::with_api_key(
            self.api_key.clone().unwrap_or_default(),
        );
        if let Some(base_url) = &self.base_url {
            builder = builder.with_base_url(base_url);
        }
        if let Some(model) = &self.model {
            builder = builder.with_model(model);
        }
        builder.build()
    }
}

impl Debug for ChatConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("env_file", &self.env_file)
            .finish()
    }
}

fn candidate_dirs() -> Vec<PathBuf> {
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    exe_dir.into_iter().chain(env::current_dir().ok()).collect()
}

fn find_env_file<I: IntoIterator<Item = PathBuf>>(dirs: I) -> Option<PathBuf> {
    dirs.into_iter()
        .map(|dir| dir.join(ENV_FILE_NAME))
        .find(|path| path.is_file())
}
