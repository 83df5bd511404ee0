//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `FAIRMATCH_*` environment variables.
//! A missing dataset or model is not a configuration error: it is recorded at bootstrap and
//! reported as "not ready" by the service.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_CLASSIFIER_SEED, DEFAULT_DATA_PATH, DEFAULT_MAX_SEQ_LEN, GOOD_MATCH_THRESHOLD,
};

/// Origins allowed by CORS when `FAIRMATCH_CORS_ORIGINS` is not set.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost",
    "http://localhost:3000",
    "http://localhost:5173",
];

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `FAIRMATCH_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Reference dataset CSV. Default: `./data/resume_job_match_with_gender.csv`.
    pub data_path: PathBuf,

    /// Sentence-encoder model directory (`config.json`, `model.safetensors`, `tokenizer.json`).
    pub model_path: Option<PathBuf>,

    /// Use the stub encoder when no model path is set. Default: `false`.
    pub encoder_stub: bool,

    /// Token cap per document. Default: `256`.
    pub max_seq_len: usize,

    /// Raw match score at or above which a reference row is a good match. Default: `4`.
    pub match_threshold: f64,

    /// Classifier seed. Default: `42`.
    pub seed: u64,

    /// Allowed CORS origins.
    pub cors_origins: Vec<String>,

    /// Serve the shortlist endpoints. Default: `true`.
    pub shortlist_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            model_path: None,
            encoder_stub: false,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            match_threshold: GOOD_MATCH_THRESHOLD,
            seed: DEFAULT_CLASSIFIER_SEED,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            shortlist_enabled: true,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "FAIRMATCH_PORT";
    const ENV_BIND_ADDR: &'static str = "FAIRMATCH_BIND_ADDR";
    const ENV_DATA_PATH: &'static str = "FAIRMATCH_DATA_PATH";
    const ENV_MODEL_PATH: &'static str = "FAIRMATCH_MODEL_PATH";
    const ENV_ENCODER_STUB: &'static str = "FAIRMATCH_ENCODER_STUB";
    const ENV_MAX_SEQ_LEN: &'static str = "FAIRMATCH_MAX_SEQ_LEN";
    const ENV_MATCH_THRESHOLD: &'static str = "FAIRMATCH_MATCH_THRESHOLD";
    const ENV_SEED: &'static str = "FAIRMATCH_SEED";
    const ENV_CORS_ORIGINS: &'static str = "FAIRMATCH_CORS_ORIGINS";
    const ENV_SHORTLIST_ENABLED: &'static str = "FAIRMATCH_SHORTLIST_ENABLED";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let data_path = Self::parse_path_from_env(Self::ENV_DATA_PATH, defaults.data_path);
        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let encoder_stub = Self::parse_bool_from_env(Self::ENV_ENCODER_STUB, defaults.encoder_stub)?;
        let max_seq_len = Self::parse_number_from_env(Self::ENV_MAX_SEQ_LEN, defaults.max_seq_len)?;
        let match_threshold =
            Self::parse_number_from_env(Self::ENV_MATCH_THRESHOLD, defaults.match_threshold)?;
        let seed = Self::parse_number_from_env(Self::ENV_SEED, defaults.seed)?;
        let cors_origins = Self::parse_list_from_env(Self::ENV_CORS_ORIGINS, defaults.cors_origins);
        let shortlist_enabled =
            Self::parse_bool_from_env(Self::ENV_SHORTLIST_ENABLED, defaults.shortlist_enabled)?;

        Ok(Self {
            port,
            bind_addr,
            data_path,
            model_path,
            encoder_stub,
            max_seq_len,
            match_threshold,
            seed,
            cors_origins,
            shortlist_enabled,
        })
    }

    /// Validates basic invariants (missing model/data files are left to bootstrap).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_path.exists() && !self.data_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.data_path.clone(),
            });
        }

        if let Some(ref path) = self.model_path
            && path.exists()
            && !path.is_dir()
        {
            return Err(ConfigError::NotADirectory { path: path.clone() });
        }

        if !self.match_threshold.is_finite() {
            return Err(ConfigError::InvalidNumber {
                name: Self::ENV_MATCH_THRESHOLD,
                value: self.match_threshold.to_string(),
            });
        }

        if self.max_seq_len == 0 {
            return Err(ConfigError::InvalidNumber {
                name: Self::ENV_MAX_SEQ_LEN,
                value: "0".to_string(),
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        match self.bind_addr {
            IpAddr::V4(addr) => format!("{}:{}", addr, self.port),
            IpAddr::V6(addr) => format!("[{}]:{}", addr, self.port),
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        Self::parse_optional_path_from_env(var_name).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_number_from_env<T: std::str::FromStr>(
        var_name: &'static str,
        default: T,
    ) -> Result<T, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(var_name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidBool {
                    name: var_name,
                    value,
                }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_list_from_env(var_name: &str, default: Vec<String>) -> Vec<String> {
        match env::var(var_name) {
            Ok(value) => value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            Err(_) => default,
        }
    }
}
