//! sysgen: syscall interface compiler.
//!
//! Reads a `|`-delimited syscall table (and an errno table) and writes the C
//! headers, stubs and dispatch table that connect a C library to the kernel.
//!
//! Pipeline: load sysgen.toml → parse table → render artifacts → write files.

mod cli;
mod config;
mod generate;
mod logging;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    logging::init(logging::Verbosity::from_flags(cli.quiet, cli.verbose));

    match cli.command {
        cli::Command::Gen(ref args) => {
            let loaded = config::load(cli.config.as_deref())?;
            generate::cmd_gen(&loaded, args)
        }
        cli::Command::All => {
            let loaded = config::load(cli.config.as_deref())?;
            generate::cmd_all(&loaded)
        }
        cli::Command::Check(ref args) => generate::cmd_check(args),
    }
}
