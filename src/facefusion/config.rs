use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::FusionError;

pub const ENV_SECRET_ID: &str = "FFCMD_FACEFUSION_SECRET_ID";
pub const ENV_SECRET_KEY: &str = "FFCMD_FACEFUSION_SECRET_KEY";

/// Credentials and model selection for one face-fusion client.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FaceFusionConfig {
    pub secret_id: String,
    pub secret_key: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_project_id")]
    pub project_id: String,
    #[serde(default = "default_model_id")]
    pub model_id: String,
}

fn default_region() -> String {
    "ap-beijing".to_string()
}

fn default_endpoint() -> String {
    "facefusion.tencentcloudapi.com".to_string()
}

fn default_project_id() -> String {
    "303269".to_string()
}

fn default_model_id() -> String {
    "qc_303269_330150_8".to_string()
}

impl FaceFusionConfig {
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
            region: default_region(),
            endpoint: default_endpoint(),
            project_id: default_project_id(),
            model_id: default_model_id(),
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self, FusionError> {
        let config: Self = serde_json::from_str(&fs::read_to_string(path)?)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, FusionError> {
        let read = |name: &str| {
            std::env::var(name).map_err(|_| FusionError::Config(format!("{name} is not set")))
        };
        let config = Self::new(read(ENV_SECRET_ID)?, read(ENV_SECRET_KEY)?);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), FusionError> {
        if self.secret_id.trim().is_empty() || self.secret_key.trim().is_empty() {
            return Err(FusionError::Config("secret id and key must not be empty".to_string()));
        }
        if self.endpoint.trim().is_empty() {
            return Err(FusionError::Config("endpoint must not be empty".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for FaceFusionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaceFusionConfig")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"<redacted>")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("model_id", &self.model_id)
            .finish()
    }
}
