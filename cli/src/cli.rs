use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "oc-gateway")]
/// OpenCitations gateway: read-only SPARQL endpoints and citation identifier resolution
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the gateway HTTP server
    Serve {
        /// JSON configuration file
        ///
        /// BASE_URL, SPARQL_ENDPOINT_INDEX, SPARQL_ENDPOINT_META and INDEX_BASE_URL from the
        /// environment take precedence over the values of the file.
        #[arg(short, long, default_value = "conf.json", value_hint = ValueHint::FilePath)]
        config: PathBuf,
        /// Host and port to listen to
        #[arg(short, long, default_value = "0.0.0.0:8080", value_hint = ValueHint::Hostname)]
        bind: String,
    },
}
