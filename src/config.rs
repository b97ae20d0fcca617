//! Command line and environment configuration

use crate::adapter::DEFAULT_ENDPOINT;
use clap::Parser;
use reqwest::Url;
use std::path::PathBuf;

pub const ENDPOINT_ENV: &str = "ADAPTER_CHAT_ENDPOINT";
pub const LOG_FILE_ENV: &str = "ADAPTER_CHAT_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "adapter-chat",
    version,
    about = "Terminal client for the universal adapter service"
)]
pub struct Cli {
    /// Chat endpoint of the adapter service
    #[arg(long, env = ENDPOINT_ENV, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: Url,

    /// Where structured logs go; the terminal belongs to the interface.
    /// Defaults to `$HOME/.adapter-chat/adapter-chat.log`.
    #[arg(long, env = LOG_FILE_ENV)]
    pub log_file: Option<PathBuf>,

    /// Start with artifact, error log and attempt sections expanded
    #[arg(long)]
    pub expand: bool,

    /// Send one query, print the rendered answer and exit
    #[arg(trailing_var_arg = true)]
    pub query: Vec<String>,
}

impl Cli {
    pub fn log_file(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(format!("{home}/.adapter-chat/adapter-chat.log"))
        })
    }

    /// The one-shot query, when words were given
    pub fn one_shot_query(&self) -> Option<String> {
        let query = self.query.join(" ");
        (!query.trim().is_empty()).then_some(query)
    }
}
