//! Error types for the syscall interface compiler.

use std::fmt;

/// Errors that can occur while parsing a table or emitting an artifact.
///
/// Line numbers are 1-based and refer to the input table, comments included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A table line could not be parsed.
    MalformedEntry {
        /// Source line.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
    /// An entry's number is not strictly greater than the one before it.
    UnsortedEntries {
        /// Source line of the offending entry.
        line: usize,
        /// Its syscall number.
        number: u32,
        /// Number of the preceding entry.
        previous: u32,
    },
    /// An entry's number does not fit in the dispatch table.
    DispatchOverflow {
        /// Source line of the offending entry.
        line: usize,
        /// Its syscall number.
        number: u32,
        /// Number of slots in the table.
        capacity: usize,
    },
    /// Two entries share a syscall number.
    DuplicateNumber {
        /// The shared number.
        number: u32,
        /// Name of the first entry.
        first: String,
        /// Name of the second entry.
        second: String,
    },
    /// Two entries normalize to the same symbol.
    DuplicateName {
        /// The shared normalized name.
        name: String,
        /// Line of the first definition.
        first_line: usize,
        /// Line of the second definition.
        second_line: usize,
    },
    /// An errno value breaks the dense `1, 2, 3, ...` numbering.
    SparseErrno {
        /// Source line of the offending entry.
        line: usize,
        /// Its macro name.
        name: String,
        /// The value the description table needs at this position.
        expected: u32,
        /// The value actually given.
        found: u32,
    },
    /// An errno alias names a macro that is not defined before it.
    UnknownAlias {
        /// Source line of the alias.
        line: usize,
        /// The alias macro.
        name: String,
        /// The macro it refers to.
        target: String,
    },
}

impl Error {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedEntry {
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedEntry { line, reason } => {
                write!(f, "line {line}: malformed entry: {reason}")
            }
            Self::UnsortedEntries {
                line,
                number,
                previous,
            } => write!(
                f,
                "line {line}: syscall number {number} does not follow {previous} \
                 (entries must be in strictly ascending order)"
            ),
            Self::DispatchOverflow {
                line,
                number,
                capacity,
            } => write!(
                f,
                "line {line}: syscall number {number} does not fit in a {capacity}-slot dispatch table"
            ),
            Self::DuplicateNumber {
                number,
                first,
                second,
            } => write!(f, "syscall number {number} is used by both `{first}` and `{second}`"),
            Self::DuplicateName {
                name,
                first_line,
                second_line,
            } => write!(
                f,
                "line {second_line}: `{name}` is already defined on line {first_line}"
            ),
            Self::SparseErrno {
                line,
                name,
                expected,
                found,
            } => write!(
                f,
                "line {line}: `{name}` has value {found}, expected {expected} (errno values must be dense from 1)"
            ),
            Self::UnknownAlias { line, name, target } => {
                write!(f, "line {line}: `{name}` aliases unknown macro `{target}`")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
