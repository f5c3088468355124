use std::path::PathBuf;
use std::time::Duration;

use chat_engine::{EndpointSettings, DEFAULT_ENDPOINT_URL};
use clap::Parser;

use super::logging::LogDestination;

#[derive(Parser, Debug)]
#[command(
    name = "chat",
    version,
    about = "Terminal chat client for a markdown completion endpoint"
)]
pub struct Args {
    /// Completion endpoint receiving the transcript as JSON.
    #[arg(long, default_value = DEFAULT_ENDPOINT_URL)]
    pub endpoint: String,

    #[arg(long, default_value_t = 10)]
    pub connect_timeout_secs: u64,

    /// Give up on a request after this many seconds. Waits indefinitely when unset.
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,

    /// Directory holding the preference file and the log file.
    #[arg(long, default_value = ".")]
    pub state_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,
}

impl Args {
    pub fn endpoint_settings(&self) -> EndpointSettings {
        EndpointSettings {
            url: self.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}
