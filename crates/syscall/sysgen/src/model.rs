//! Intermediate representation for syscall and errno tables.

use crate::names;

/// An ordered syscall table. Order is input line order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecTable {
    /// Entries in input order, comments excluded.
    pub entries: Vec<SyscallEntry>,
}

/// A single syscall row: `4 | lseek | off_t | int fd | off_t offset | int whence | >off_t result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyscallEntry {
    /// Syscall number.
    pub number: u32,
    /// Name as written in the table, markers included.
    pub raw_name: String,
    /// Declared C return type.
    pub return_type: String,
    /// Parameters. An output parameter, if any, is always last.
    pub params: Vec<ParamSpec>,
    /// 1-based source line.
    pub line: usize,
}

/// A parameter of a syscall entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    /// Verbatim declaration without the `>` marker, e.g. `const void *data`.
    pub decl: String,
    /// Declared type, e.g. `const void *`.
    pub ty: String,
    /// Trailing identifier, e.g. `data`.
    pub name: String,
    /// Whether this is the output (return-by-pointer) slot.
    pub output: bool,
}

impl ParamSpec {
    /// Declaration of this parameter as a marshalling-structure field.
    ///
    /// Output parameters become a pointer to their declared type, so the
    /// kernel writes a `ty` through it and the caller passes `&name` of a
    /// local declared as `decl`.
    pub fn field_decl(&self) -> String {
        if self.output {
            format!("{} *{}", self.ty, self.name)
        } else {
            self.decl.clone()
        }
    }
}

impl SyscallEntry {
    /// Normalized symbol name shared by every artifact.
    pub fn public_name(&self) -> String {
        names::normalize(&self.raw_name)
    }

    /// Whether the caller-side header declares this entry.
    pub fn is_public(&self) -> bool {
        names::is_public(&self.raw_name)
    }

    /// Whether the entry takes any arguments (including an output slot).
    pub fn has_args(&self) -> bool {
        !self.params.is_empty()
    }

    /// The output parameter, if the entry has one.
    pub fn output(&self) -> Option<&ParamSpec> {
        self.params.last().filter(|p| p.output)
    }

    /// Parameters passed by value, in order.
    pub fn value_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(|p| !p.output)
    }

    /// Return type seen by callers: the output's declared type if present.
    pub fn effective_return_type(&self) -> &str {
        match self.output() {
            Some(out) => &out.ty,
            None => &self.return_type,
        }
    }

    /// Whether the call never returns to the caller.
    ///
    /// A `void` return with no output slot means the trap transfers control
    /// away permanently (exit, exec).
    pub fn diverges(&self) -> bool {
        self.return_type == "void" && self.output().is_none()
    }
}

/// An ordered errno table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrnoTable {
    /// Entries in input order, comments excluded.
    pub entries: Vec<ErrnoEntry>,
}

/// An errno row: `ENOENT | 2 | No such file or directory`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrnoEntry {
    /// Macro name.
    pub name: String,
    /// Numeric value or alias target.
    pub value: ErrnoValue,
    /// Human-readable description used by strerror.
    pub description: String,
    /// Comment for the header; defaults to the description.
    pub comment: String,
    /// 1-based source line.
    pub line: usize,
}

/// The value column of an errno row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrnoValue {
    /// A literal error number.
    Number(u32),
    /// Another macro this one is defined as.
    Alias(String),
}

impl std::fmt::Display for ErrnoValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Alias(name) => f.write_str(name),
        }
    }
}

impl ErrnoEntry {
    /// Whether this entry gets a slot in the strerror description table.
    ///
    /// Only error macros (`E*`) with a literal value qualify; aliases and
    /// reserved codes share the header but not the table.
    pub fn has_description_slot(&self) -> bool {
        self.name.starts_with(names::ERRNO_PREFIX) && matches!(self.value, ErrnoValue::Number(_))
    }
}
