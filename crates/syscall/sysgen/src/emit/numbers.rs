//! Syscall number header: one `#define SYS_<name> <number>` per entry.

use crate::config::GenConfig;
use crate::emit::{Artifact, Document};
use crate::model::SpecTable;
use crate::names;

/// Render the numbers header.
///
/// Entries appear in table order. Duplicate numbers are passed through;
/// `sysgen check` is the place that reports them.
pub fn emit(table: &SpecTable, config: &GenConfig) -> String {
    let mut doc = Document::begin(config, Artifact::Numbers);
    for entry in &table.entries {
        doc.line(format!(
            "#define {} {}",
            names::syscall_macro(&entry.raw_name),
            entry.number
        ));
    }
    doc.finish()
}
