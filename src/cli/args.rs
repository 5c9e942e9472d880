//! Command-line argument definitions.

use clap::Parser;
use std::path::PathBuf;

/// Relay an iOS device's pcapd capture stream into a pcap file,
/// filtered to a single named process.
#[derive(Parser, Debug)]
#[command(name = "iosniff")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Forwarded pcapd endpoint to read capture frames from
    #[arg(short = 'c', long = "connect", value_name = "HOST:PORT")]
    pub connect: String,

    /// Process (executable) name to keep; prefix-matched against capture headers
    #[arg(short = 'p', long = "process", value_name = "NAME")]
    pub process: Option<String>,

    /// JSON application listing; prompts for a numeric selection
    #[arg(short = 'a', long = "apps", value_name = "FILE")]
    pub apps: Option<PathBuf>,

    /// Output capture file (defaults to <name>.pcap)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}
