use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use qentangle::StateFamily;

#[derive(Debug, Parser)]
#[command(
    name = "qentangle",
    about = "Classify the entanglement of four-qubit G_abcd / L_abc2 states",
    version
)]
pub struct Cli {
    /// Path to config (TOML); default: ~/.qentangle/config.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Directory for experiment records (overrides the config file)
    #[arg(long = "store", value_name = "DIR", global = true)]
    pub store: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `qentangle=trace`
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log: Option<String>,

    /// Print the report as JSON instead of text
    #[arg(long = "json", action = ArgAction::SetTrue, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a G_abcd state
    ///
    /// Example:
    ///   qentangle g-abcd 1 0 0 0
    #[command(name = "g-abcd")]
    GAbcd {
        #[arg(allow_negative_numbers = true)]
        a: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
        #[arg(allow_negative_numbers = true)]
        c: f64,
        #[arg(allow_negative_numbers = true)]
        d: f64,
    },
    /// Analyze an L_abc2 state
    ///
    /// Example:
    ///   qentangle l-abc2 0.5 -1 2
    #[command(name = "l-abc2")]
    LAbc2 {
        #[arg(allow_negative_numbers = true)]
        a: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
        #[arg(allow_negative_numbers = true)]
        c: f64,
    },
}

impl Command {
    pub fn family(&self) -> StateFamily {
        match *self {
            Command::GAbcd { a, b, c, d } => StateFamily::Gabcd { a, b, c, d },
            Command::LAbc2 { a, b, c } => StateFamily::Labc2 { a, b, c },
        }
    }
}
