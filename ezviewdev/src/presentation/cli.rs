use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "ezviewdev: inspect EZView2 serial captures", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Record tick unit; `auto` follows the header's device type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum TickArg {
    #[default]
    Auto,
    /// 0.1 ms ticks (EZ-Tap)
    TenthMs,
    /// 1 µs ticks (EZ-Tap Pro/Plus)
    Us,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print header fields and record statistics
    Info {
        capture: PathBuf,
        #[arg(long = "tick-unit", value_enum, default_value_t = TickArg::Auto)]
        tick_unit: TickArg,
    },

    /// Print records, one per line
    Dump {
        capture: PathBuf,
        /// first record index
        #[arg(long, default_value_t = 0)]
        start: usize,
        /// maximum number of records to print
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long = "tick-unit", value_enum, default_value_t = TickArg::Auto)]
        tick_unit: TickArg,
        /// print absolute UTC timestamps instead of relative time
        #[arg(long)]
        absolute: bool,
        /// append the raw record bytes in hex
        #[arg(long)]
        raw: bool,
    },

    /// Validate capture files; directories are searched for *.dat files
    Verify {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Decode and re-encode a capture in canonical form
    Rewrite { input: PathBuf, output: PathBuf },
}
