use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cdma",
    about = "CDMA channel simulator — Walsh-code spreading over a shared channel",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with a `[codec]` table and fixture `messages`
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Walsh code length (power of two); overrides the config file
    #[arg(short = 'n', long, global = true)]
    pub size: Option<usize>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the Walsh code matrix
    Codes(CodesArgs),
    /// Spread messages onto one channel and print the chip stream
    Transmit(TransmitArgs),
    /// Decode stations from a saved chip stream
    Decode(DecodeArgs),
    /// Transmit, decode every station, and check the messages survive
    Roundtrip(RoundtripArgs),
}

#[derive(Args)]
pub struct CodesArgs {}

#[derive(Args)]
pub struct TransmitArgs {
    pub messages: Vec<String>,
    /// Write the chip stream as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct DecodeArgs {
    /// JSON chip stream written by `cdma transmit --output`
    pub input: PathBuf,
    #[arg(short, long, conflicts_with = "count")]
    pub station: Option<usize>,
    /// Decode stations 0..count. A saved stream does not record how many
    /// stations were registered, so the default is every code; stations that
    /// never transmitted decode as NUL text and log a warning
    #[arg(long, value_name = "COUNT")]
    pub count: Option<usize>,
}

#[derive(Args)]
pub struct RoundtripArgs {
    /// Messages to send; defaults to the configured fixtures
    pub messages: Vec<String>,
}
