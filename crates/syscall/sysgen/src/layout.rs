//! Marshalling-structure synthesis.
//!
//! Arguments travel to the kernel packed in a `struct sys_<name>_s`, one
//! field per parameter in table order. The output parameter, if present,
//! becomes a pointer field through which the kernel writes the result.

use crate::model::SyscallEntry;
use crate::names;

/// Layout of one marshalling structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarshalLayout {
    /// Structure tag, e.g. `sys_lseek_s`.
    pub name: String,
    /// Field declarations in order, without the trailing `;`.
    pub fields: Vec<String>,
    /// Declared type of the output slot; the caller-visible return type.
    pub output_type: Option<String>,
}

/// Build the structure layout for `entry`.
///
/// Returns `None` for calls without arguments. "No structure" is not the
/// same as an empty structure: such handlers take no parameters at all.
pub fn synthesize(entry: &SyscallEntry) -> Option<MarshalLayout> {
    if !entry.has_args() {
        return None;
    }

    Some(MarshalLayout {
        name: names::struct_name(&entry.raw_name),
        fields: entry.params.iter().map(|p| p.field_decl()).collect(),
        output_type: entry.output().map(|p| p.ty.clone()),
    })
}

impl MarshalLayout {
    /// Render the C definition, including the trailing blank line.
    pub fn render(&self) -> String {
        let mut out = format!("struct {} {{\n", self.name);
        for field in &self.fields {
            out.push_str("    ");
            out.push_str(field);
            out.push_str(";\n");
        }
        out.push_str("};\n");
        out
    }
}
