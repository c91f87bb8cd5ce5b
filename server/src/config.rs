//! Command line and environment configuration

use std::net::SocketAddr;
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};

use crate::logging::LogFormat;

pub const DEFAULT_REPLAY_HOST: &str = "https://replay.pokemonshowdown.com";
pub const DEFAULT_MAX_LOG_BYTES: usize = 4 * 1024 * 1024;

/// Showdown replay analysis API server
#[derive(Parser, Debug, Clone)]
#[command(name = "vgccorner-server", author, version, about)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080", env = "VGCCORNER_BIND")]
    pub bind: SocketAddr,

    /// Base URL of the replay host
    #[arg(long, default_value = DEFAULT_REPLAY_HOST, env = "VGCCORNER_REPLAY_HOST")]
    pub replay_host: String,

    /// Seconds to wait for the replay host before giving up
    #[arg(long, default_value_t = 10, env = "VGCCORNER_FETCH_TIMEOUT")]
    pub fetch_timeout: u64,

    /// Largest raw log accepted, fetched or submitted
    #[arg(long, default_value_t = DEFAULT_MAX_LOG_BYTES, env = "VGCCORNER_MAX_LOG_BYTES")]
    pub max_log_bytes: usize,

    /// Log output format
    #[arg(long, default_value = "human", env = "VGCCORNER_LOG_FORMAT")]
    pub log_format: LogFormatArg,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl ServerConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Human,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Human => LogFormat::Human,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
