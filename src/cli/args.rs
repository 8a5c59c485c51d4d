use crate::config::{
    Config, UpstreamConfig, DEFAULT_BASE_URL, DEFAULT_LOCATION_LIMIT, DEFAULT_LOOKUP_TIMEOUT,
    DEFAULT_MEASUREMENTS_TIMEOUT,
};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};
use std::net::IpAddr;
use std::path::PathBuf;

/// Output format of the stdout log layer.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Air quality dashboard API backed by OpenAQ with a sample data fallback
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// OpenAQ API key; without it only sample data is served
    #[arg(long, env = "OPENAQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Serve sample data even when an API key is configured
    #[arg(
        long,
        env = "USE_SAMPLE_DATA",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub use_sample_data: bool,

    /// Base URL of the OpenAQ v3 API
    #[arg(long, env = "OPENAQ_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Maximum number of locations requested per country
    #[arg(long, env = "OPENAQ_LOCATION_LIMIT", default_value_t = DEFAULT_LOCATION_LIMIT)]
    pub location_limit: u32,

    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Also write daily-rotated log files into this directory
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    pub fn to_config(&self) -> Config {
        Config {
            upstream: UpstreamConfig {
                api_key: self.api_key.clone().filter(|key| !key.trim().is_empty()),
                force_sample_data: self.use_sample_data,
                base_url: self.base_url.trim_end_matches('/').to_string(),
                location_limit: self.location_limit,
                lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
                measurements_timeout: DEFAULT_MEASUREMENTS_TIMEOUT,
            },
            host: self.host,
            port: self.port,
        }
    }
}
