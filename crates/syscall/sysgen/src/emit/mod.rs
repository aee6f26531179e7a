//! Artifact emitters and the document framing they share.
//!
//! Each emitter is a pure function from a parsed table and a [`GenConfig`]
//! to the full text of one file. [`render`] is the single entry point used
//! by the CLI: it parses the right kind of table and runs one emitter.

pub mod caller;
pub mod dispatch;
pub mod errno;
pub mod kernel;
pub mod numbers;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::config::{GenConfig, HeaderOptions};
use crate::error::Result;
use crate::parse::{parse_errnos, parse_syscalls};

/// The files this crate knows how to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Artifact {
    /// `#define SYS_<name> <number>` list.
    Numbers,
    /// Marshalling structures and kernel handler prototypes.
    KernelHeader,
    /// Fixed-capacity handler array.
    Dispatch,
    /// Public caller declarations.
    CallerHeader,
    /// Caller stub bodies.
    CallerStubs,
    /// Errno macro header.
    ErrnoHeader,
    /// Description table and lookup handler.
    Strerror,
}

/// Which input table an artifact is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// The syscall table.
    Syscalls,
    /// The errno table.
    Errnos,
}

impl Artifact {
    /// Every artifact, in the order they are usually built.
    pub const ALL: [Self; 7] = [
        Self::Numbers,
        Self::KernelHeader,
        Self::Dispatch,
        Self::CallerHeader,
        Self::CallerStubs,
        Self::ErrnoHeader,
        Self::Strerror,
    ];

    /// Identifier used on the command line and in `sysgen.toml`.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Numbers => "numbers",
            Self::KernelHeader => "kernel-header",
            Self::Dispatch => "dispatch",
            Self::CallerHeader => "caller-header",
            Self::CallerStubs => "caller-stubs",
            Self::ErrnoHeader => "errno-header",
            Self::Strerror => "strerror",
        }
    }

    /// The table this artifact is derived from.
    #[must_use]
    pub const fn table_kind(self) -> TableKind {
        match self {
            Self::ErrnoHeader | Self::Strerror => TableKind::Errnos,
            _ => TableKind::Syscalls,
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Artifact {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.id() == s)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|a| a.id()).collect();
                format!("unknown artifact `{s}` (expected one of: {})", known.join(", "))
            })
    }
}

/// Parse `source` as the table `artifact` needs and render the artifact.
///
/// Nothing is returned unless the whole table parsed and the emitter's
/// preconditions held, so callers never see a partial file.
pub fn render(artifact: Artifact, source: &str, config: &GenConfig) -> Result<String> {
    match artifact {
        Artifact::Numbers => Ok(numbers::emit(&parse_syscalls(source)?, config)),
        Artifact::KernelHeader => Ok(kernel::emit(&parse_syscalls(source)?, config)),
        Artifact::Dispatch => dispatch::emit(&parse_syscalls(source)?, config),
        Artifact::CallerHeader => Ok(caller::emit_header(&parse_syscalls(source)?, config)),
        Artifact::CallerStubs => Ok(caller::emit_stubs(&parse_syscalls(source)?, config)),
        Artifact::ErrnoHeader => Ok(errno::emit_header(&parse_errnos(source)?, config)),
        Artifact::Strerror => errno::emit_strerror(&parse_errnos(source)?, config),
    }
}

/// A generated C file under construction.
///
/// [`Document::begin`] writes the banner, include guard, includes and the
/// C++ linkage opener; [`Document::finish`] closes whatever was opened.
pub(crate) struct Document {
    text: String,
    options: HeaderOptions,
}

impl Document {
    pub(crate) fn begin(config: &GenConfig, artifact: Artifact) -> Self {
        let options = config.headers.get(artifact);
        let mut doc = Self {
            text: String::new(),
            options: options.clone(),
        };

        let banner = config.banner.trim_end();
        if !banner.is_empty() {
            doc.line(banner);
        }
        if let Some(guard) = &options.guard {
            doc.blank();
            doc.line(format!("#ifndef {guard}"));
            doc.line(format!("#define {guard}"));
        }
        if !options.includes.is_empty() {
            doc.blank();
            for include in &options.includes {
                doc.line(format!("#include {include}"));
            }
        }
        if options.cplusplus {
            doc.blank();
            doc.line("#ifdef __cplusplus");
            doc.line("extern \"C\" {");
            doc.line("#endif");
        }
        doc.blank();
        doc.line("/* Generated automatically */");
        doc.blank();
        doc
    }

    pub(crate) fn line(&mut self, line: impl AsRef<str>) {
        self.text.push_str(line.as_ref());
        self.text.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.text.push('\n');
    }

    /// Append pre-rendered text that already ends in a newline.
    pub(crate) fn push(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn finish(mut self) -> String {
        if self.options.cplusplus {
            self.blank();
            self.line("#ifdef __cplusplus");
            self.line("}");
            self.line("#endif");
        }
        if self.options.guard.is_some() {
            self.blank();
            self.line("#endif");
        }
        self.text
    }
}
