//! The `gen`, `all` and `check` commands.
//!
//! Every artifact is rendered in memory first; files are only written once
//! all of them rendered cleanly, so a bad table never leaves half a build.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use sysgen::emit;
use sysgen::validate::{validate_errnos, validate_syscalls};
use sysgen::{Artifact, parse_errnos, parse_syscalls};
use tracing::{debug, error, info};

use crate::cli::{CheckArgs, GenArgs};
use crate::config::Loaded;
use crate::logging::dprintln;

/// A rendered artifact waiting to be written.
struct Rendered {
    artifact: Artifact,
    path: PathBuf,
    text: String,
}

fn read_table(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn render(artifact: Artifact, input: &Path, loaded: &Loaded) -> Result<String> {
    let source = read_table(input)?;
    emit::render(artifact, &source, &loaded.config)
        .with_context(|| format!("Failed to generate {artifact} from {}", input.display()))
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(path = %path.display(), bytes = text.len(), "wrote artifact");
    Ok(())
}

/// `sysgen gen`: render one artifact to a file or stdout.
pub fn cmd_gen(loaded: &Loaded, args: &GenArgs) -> Result<()> {
    let text = render(args.artifact, &args.input, loaded)?;
    match &args.output {
        Some(path) => {
            dprintln!("Generating {}...", args.artifact);
            write_output(path, &text)?;
            dprintln!("  -> {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// `sysgen all`: render every configured output, then write them.
pub fn cmd_all(loaded: &Loaded) -> Result<()> {
    if loaded.config.outputs.is_empty() {
        match &loaded.path {
            Some(path) => bail!("{} has no [[output]] entries", path.display()),
            None => bail!("no sysgen.toml found; `sysgen all` needs [[output]] entries"),
        }
    }

    let mut rendered = Vec::with_capacity(loaded.config.outputs.len());
    for output in &loaded.config.outputs {
        let input = loaded.resolve(&output.input);
        rendered.push(Rendered {
            artifact: output.artifact,
            path: loaded.resolve(&output.path),
            text: render(output.artifact, &input, loaded)?,
        });
    }

    for item in &rendered {
        dprintln!("Generating {}...", item.artifact);
        write_output(&item.path, &item.text)?;
        dprintln!("  -> {}", item.path.display());
    }

    dprintln!("Generated {} file(s).", rendered.len());
    Ok(())
}

/// `sysgen check`: validate tables and report every problem.
pub fn cmd_check(args: &CheckArgs) -> Result<()> {
    let mut problems = 0;

    let source = read_table(&args.syscalls)?;
    let table = parse_syscalls(&source)
        .with_context(|| format!("Failed to parse {}", args.syscalls.display()))?;
    if let Err(errors) = validate_syscalls(&table) {
        for err in &errors {
            error!("{}: {err}", args.syscalls.display());
        }
        problems += errors.len();
    }
    info!(entries = table.entries.len(), "checked {}", args.syscalls.display());

    if let Some(path) = &args.errno {
        let source = read_table(path)?;
        let table =
            parse_errnos(&source).with_context(|| format!("Failed to parse {}", path.display()))?;
        if let Err(errors) = validate_errnos(&table) {
            for err in &errors {
                error!("{}: {err}", path.display());
            }
            problems += errors.len();
        }
        info!(entries = table.entries.len(), "checked {}", path.display());
    }

    if problems > 0 {
        bail!("{problems} problem(s) found");
    }
    dprintln!("No problems found.");
    Ok(())
}
