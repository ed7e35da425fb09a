use std::path::{Path, PathBuf};

use dotenvy::dotenv;
use serde::Deserialize;

use crate::error::{FcmBatchError, Result};

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub service_json_base_path: String,

    #[serde(default = "default_sound")]
    pub sound: String,

    #[serde(default = "default_temp_folder")]
    pub temp_folder: String,
    #[serde(default = "default_storage_root")]
    pub storage_root: String,

    #[serde(default)]
    pub project_id: Option<String>,

    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_batch_url")]
    pub batch_url: String,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

fn default_sound() -> String {
    "default".to_string()
}

fn default_temp_folder() -> String {
    "firebase/".to_string()
}

fn default_storage_root() -> String {
    "storage/app".to_string()
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_batch_url() -> String {
    "https://fcm.googleapis.com/batch".to_string()
}

fn default_request_timeout_seconds() -> u64 {
    30
}

impl Config {
    /// Reads `FCMB_*` variables, picking up a `.env` file when one is present.
    pub fn load() -> Result<Self> {
        dotenv().ok();

        Self::from_vars(std::env::vars())
    }

    /// Builds a config from `(name, value)` pairs; only `FCMB_*` names are read.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed("FCMB_").from_iter(vars).map_err(|e| {
            FcmBatchError::Config(format!("Invalid or missing environmental variable: {}", e))
        })
    }

    /// Configuration with every optional setting at its default.
    pub fn with_credentials(service_json_base_path: impl Into<String>) -> Self {
        Self {
            service_json_base_path: service_json_base_path.into(),
            sound: default_sound(),
            temp_folder: default_temp_folder(),
            storage_root: default_storage_root(),
            project_id: None,
            token_url: default_token_url(),
            batch_url: default_batch_url(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }

    pub fn credential_path(&self) -> &Path {
        Path::new(&self.service_json_base_path)
    }

    /// Location of a batch file relative to the storage root.
    pub fn temp_file_path(&self, file_name: &str) -> PathBuf {
        Path::new(&self.temp_folder).join(file_name)
    }
}
