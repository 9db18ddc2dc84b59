use crate::llm::{LlmSettings, Provider};
use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Default endpoint: Google's OpenAI-compatible Gemini surface.
const DEFAULT_LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Default model served there.
const DEFAULT_LLM_MODEL: &str = "gemini-2.0-flash";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Interface to bind
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Directory holding the save slot
    #[arg(long, env = "DATA_DIR")]
    pub data_dir: Option<String>,

    /// Directory served at the site root
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<String>,

    /// Disable timeout middleware
    #[arg(long, env = "TIMEOUT_DISABLED")]
    pub timeout_disabled: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub resilience: ResilienceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding the save slot.
    pub data_dir: String,
    /// Directory served at the site root.
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResilienceConfig {
    pub timeout_disabled: bool,
}

impl AppConfig {
    /// Load configuration from process arguments and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when arguments cannot be parsed, a named config file
    /// cannot be read, or a value fails to deserialize.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    /// Load configuration from explicit arguments.
    ///
    /// Priority: CLI flag > env var > config file > defaults.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::load`].
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder();

        // 1. Defaults
        builder = builder
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("storage.data_dir", "data")?
            .set_default("storage.static_dir", "static")?
            .set_default("resilience.timeout_disabled", false)?;

        // 2. Config file: --config / CONFIG_FILE, else ./config.yaml when present
        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path));
        } else if Path::new("config.yaml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        // 3. Environment variables (prefixed with NIRD_)
        // E.g. NIRD_SERVER__PORT=8000
        builder = builder.add_source(Environment::with_prefix("NIRD").separator("__").try_parsing(true));

        // 4. CLI overrides (clap also resolves the per-flag env vars, so
        // PORT=8000 lands here too)
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(dir) = cli.data_dir {
            builder = builder.set_override("storage.data_dir", dir)?;
        }
        if let Some(dir) = cli.static_dir {
            builder = builder.set_override("storage.static_dir", dir)?;
        }
        if let Some(td) = cli.timeout_disabled {
            builder = builder.set_override("resilience.timeout_disabled", td)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }
}

/// Load LLM connection settings from the environment.
///
/// Unset variables fall back to the hosted Gemini defaults; explicitly
/// empty ones are configuration mistakes and rejected.
///
/// # Errors
///
/// Returns a message naming the offending variable.
pub fn load_llm_settings() -> Result<LlmSettings, String> {
    let base_url = match std::env::var("LLM_BASE_URL") {
        Ok(v) => {
            if v.trim().is_empty() {
                return Err("LLM_BASE_URL cannot be empty".to_string());
            }
            v
        }
        Err(_) => DEFAULT_LLM_BASE_URL.to_string(),
    };

    let model = match std::env::var("LLM_MODEL") {
        Ok(v) => {
            if v.trim().is_empty() {
                return Err("LLM_MODEL cannot be empty".to_string());
            }
            v
        }
        Err(_) => DEFAULT_LLM_MODEL.to_string(),
    };

    // LLM_API_KEY, falling back to the key name the Gemini tooling uses.
    let api_key = std::env::var("LLM_API_KEY")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| {
            std::env::var("GOOGLE_GENERATIVE_AI_API_KEY").ok().filter(|s| !s.trim().is_empty())
        });

    // Auto-detect provider from base URL
    let provider = Provider::detect_from_url(&base_url);

    Ok(LlmSettings { base_url, api_key, model, provider })
}
