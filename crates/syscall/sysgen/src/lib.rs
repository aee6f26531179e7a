//! Syscall interface compiler.
//!
//! Reads one `|`-delimited syscall table and derives every C artifact needed
//! to connect the caller-side library to the kernel dispatcher:
//! - Syscall number macros (`SYS_*`)
//! - Argument-marshalling structures and kernel handler prototypes
//! - A dense, fixed-capacity dispatch table
//! - Public caller declarations and caller stub bodies
//! - The errno header and the strerror description table
//!
//! Every emitter is a pure function of the parsed table. Identifiers are
//! always derived through [`names`], so the same entry produces the same
//! symbol in every artifact.

pub mod config;
pub mod emit;
pub mod error;
pub mod layout;
pub mod model;
pub mod names;
pub mod parse;
pub mod validate;

pub use config::GenConfig;
pub use emit::{Artifact, TableKind};
pub use error::{Error, Result};
pub use model::{ErrnoEntry, ErrnoTable, ErrnoValue, ParamSpec, SpecTable, SyscallEntry};
pub use parse::{parse_errnos, parse_syscalls};
