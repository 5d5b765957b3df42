use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;
use souk_sdk::types::Address;

#[derive(Debug, Deserialize)]
pub struct Settings {
    /// RUST_LOG compatible settings string. Default "info".
    #[serde(default = "default_log")]
    pub log: String,

    /// Gateway JSON-RPC URL.
    #[serde(default = "default_url")]
    pub url: String,

    /// Address of the deployed marketplace contract.
    #[serde(default = "default_contract")]
    pub contract: Address,
}

fn default_log() -> String {
    "info".to_string()
}

fn default_url() -> String {
    "http://127.0.0.1:8545".to_string()
}

fn default_contract() -> Address {
    "0xFBE161a3AF6B705720A3EceeA8659d24b4607C28"
        .parse()
        .expect("valid address constant")
}

impl Settings {
    /// Load Settings from a given path. Settings are loaded from a given
    /// optional path and can be overriden with environment variables.
    ///
    /// Environment overrides have the same name as the entries in the
    /// settings file in uppercase and prefixed with "SOUK_". For example
    /// "SOUK_LOG" will override the log setting.
    pub fn new<P: AsRef<Path>>(path: Option<P>) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder();

        if let Some(file) = path {
            // Add optional settings file
            builder = builder
                .add_source(File::with_name(&file.as_ref().to_string_lossy()).required(false));
        }
        builder
            .add_source(Environment::with_prefix("SOUK").separator("__"))
            .build()
            .and_then(|config| config.try_deserialize())
    }
}
