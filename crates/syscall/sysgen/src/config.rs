//! Configuration types for the generator.
//!
//! Deserialized from `sysgen.toml`. Every key is optional; the defaults
//! reproduce the stock layout of the generated headers.

use serde::Deserialize;
use std::path::PathBuf;

use crate::emit::Artifact;

/// Banner prepended to every generated file.
pub const DEFAULT_BANNER: &str = "\
/*
 * This file is generated by sysgen from the system call table.
 * Do not edit it by hand; edit the table and regenerate instead.
 */";

/// Framing options for one generated document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeaderOptions {
    /// Include-guard macro. Sources leave this unset.
    #[serde(default)]
    pub guard: Option<String>,
    /// Wrap the body in `extern "C"` for C++ consumers.
    #[serde(default)]
    pub cplusplus: bool,
    /// Extra `#include` targets, written verbatim (`<x.h>` or `"x.h"`).
    #[serde(default)]
    pub includes: Vec<String>,
}

impl HeaderOptions {
    fn new(guard: Option<&str>, cplusplus: bool, includes: &[&str]) -> Self {
        Self {
            guard: guard.map(str::to_string),
            cplusplus,
            includes: includes.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Stock framing for `artifact`.
    pub fn default_for(artifact: Artifact) -> Self {
        match artifact {
            Artifact::Numbers => Self::new(Some("BITS_SYSCALL_H"), false, &[]),
            Artifact::KernelHeader => Self::new(Some("KERNEL_SYSCALL_H"), true, &["<sys/types.h>"]),
            Artifact::Dispatch => Self::new(None, false, &["<kernel/syscall.h>"]),
            Artifact::CallerHeader => Self::new(Some("BITS_UNISTD_H"), true, &["<sys/types.h>"]),
            Artifact::CallerStubs => Self::new(None, false, &["<unistd.h>", "<sys/syscall.h>"]),
            Artifact::ErrnoHeader => Self::new(Some("BITS_ERRNO_H"), false, &[]),
            Artifact::Strerror => Self::new(None, false, &["<errno.h>", "<kernel/syscall.h>"]),
        }
    }
}

/// Per-artifact framing overrides, keyed by artifact id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct HeaderSet {
    numbers: Option<HeaderOptions>,
    kernel_header: Option<HeaderOptions>,
    dispatch: Option<HeaderOptions>,
    caller_header: Option<HeaderOptions>,
    caller_stubs: Option<HeaderOptions>,
    errno_header: Option<HeaderOptions>,
    strerror: Option<HeaderOptions>,
}

impl HeaderSet {
    /// Framing for `artifact`: the configured override or the stock default.
    pub fn get(&self, artifact: Artifact) -> HeaderOptions {
        let configured = match artifact {
            Artifact::Numbers => &self.numbers,
            Artifact::KernelHeader => &self.kernel_header,
            Artifact::Dispatch => &self.dispatch,
            Artifact::CallerHeader => &self.caller_header,
            Artifact::CallerStubs => &self.caller_stubs,
            Artifact::ErrnoHeader => &self.errno_header,
            Artifact::Strerror => &self.strerror,
        };
        configured
            .clone()
            .unwrap_or_else(|| HeaderOptions::default_for(artifact))
    }
}

/// One file produced by `sysgen all`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSpec {
    /// Which artifact to render.
    pub artifact: Artifact,
    /// Input table, relative to the config file.
    pub input: PathBuf,
    /// Output file, relative to the config file.
    pub path: PathBuf,
}

/// Top-level generator configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct GenConfig {
    /// Comment block written at the top of every output.
    #[serde(default = "default_banner")]
    pub banner: String,
    /// Expansion of `SYS_ATTR` on kernel handler prototypes.
    #[serde(default = "default_attribute")]
    pub attribute: String,
    /// Caller-side trap function invoked by stubs.
    #[serde(default = "default_trap")]
    pub trap: String,
    /// Name of the dispatch array.
    #[serde(default = "default_dispatch_table")]
    pub dispatch_table: String,
    /// Framing overrides.
    #[serde(default)]
    pub headers: HeaderSet,
    /// Files rendered by `sysgen all`.
    #[serde(default, rename = "output")]
    pub outputs: Vec<OutputSpec>,
}

fn default_banner() -> String {
    DEFAULT_BANNER.to_string()
}

fn default_attribute() -> String {
    "extern __attribute__((interrupt, no_isr))".to_string()
}

fn default_trap() -> String {
    "syscall".to_string()
}

fn default_dispatch_table() -> String {
    "SYSCALL_TABLE".to_string()
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            banner: default_banner(),
            attribute: default_attribute(),
            trap: default_trap(),
            dispatch_table: default_dispatch_table(),
            headers: HeaderSet::default(),
            outputs: Vec::new(),
        }
    }
}

impl GenConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
