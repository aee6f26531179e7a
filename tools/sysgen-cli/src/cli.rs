//! Command-line interface definitions for sysgen.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sysgen::Artifact;

/// Syscall interface compiler.
#[derive(Parser)]
#[command(name = "sysgen", version, about)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: nearest `sysgen.toml` upwards from the current directory).
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Suppress progress output; show only errors.
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Render one artifact from a table.
    Gen(GenArgs),
    /// Render every `[[output]]` listed in the configuration.
    All,
    /// Check tables for consistency without generating anything.
    Check(CheckArgs),
}

/// Arguments for the `gen` subcommand.
#[derive(Parser)]
pub struct GenArgs {
    /// Artifact to render (numbers, kernel-header, dispatch, caller-header,
    /// caller-stubs, errno-header, strerror).
    pub artifact: Artifact,

    /// Input table.
    pub input: PathBuf,

    /// Write to this file instead of stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Arguments for the `check` subcommand.
#[derive(Parser)]
pub struct CheckArgs {
    /// Syscall table.
    pub syscalls: PathBuf,

    /// Errno table to check as well.
    #[arg(long)]
    pub errno: Option<PathBuf>,
}
