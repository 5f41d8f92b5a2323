pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use ezview_core::error::Result;
use clap::Parser;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Info { capture, tick_unit } => handlers::handle_info(capture, tick_unit),
        Commands::Dump {
            capture,
            start,
            limit,
            tick_unit,
            absolute,
            raw,
        } => handlers::handle_dump(capture, start, limit, tick_unit, absolute, raw),
        Commands::Verify { paths } => handlers::handle_verify(paths),
        Commands::Rewrite { input, output } => handlers::handle_rewrite(input, output),
    }
}
