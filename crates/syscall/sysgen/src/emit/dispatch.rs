//! Dispatch table: a dense handler array indexed by syscall number.
//!
//! The trap handler indexes the array directly, so every slot must hold a
//! valid handler. Unassigned slots point at [`names::NOT_IMPLEMENTED`].

use tracing::{debug, trace};

use crate::config::GenConfig;
use crate::emit::{Artifact, Document};
use crate::error::{Error, Result};
use crate::model::SpecTable;
use crate::names;

/// Number of slots in the dispatch table. Fixed by the calling convention.
pub const CAPACITY: usize = 128;

/// Assign a handler to every slot, `0..CAPACITY`.
///
/// Entries must be in strictly ascending number order; gap filling walks
/// them with a single cursor and cannot go back.
pub fn slots(table: &SpecTable) -> Result<Vec<String>> {
    let mut slots: Vec<String> = Vec::with_capacity(CAPACITY);
    let mut previous: Option<u32> = None;

    for entry in &table.entries {
        if let Some(previous) = previous.filter(|&p| entry.number <= p) {
            return Err(Error::UnsortedEntries {
                line: entry.line,
                number: entry.number,
                previous,
            });
        }

        let index = entry.number as usize;
        if index >= CAPACITY {
            return Err(Error::DispatchOverflow {
                line: entry.line,
                number: entry.number,
                capacity: CAPACITY,
            });
        }

        if slots.len() < index {
            trace!(from = slots.len(), to = index, "filling gap");
        }
        slots.resize(index, names::NOT_IMPLEMENTED.to_string());
        slots.push(names::handler_name(&entry.raw_name));
        previous = Some(entry.number);
    }

    slots.resize(CAPACITY, names::NOT_IMPLEMENTED.to_string());
    debug!(
        assigned = table.entries.len(),
        capacity = CAPACITY,
        "dispatch table laid out"
    );
    Ok(slots)
}

/// Render the dispatch table source.
pub fn emit(table: &SpecTable, config: &GenConfig) -> Result<String> {
    let slots = slots(table)?;

    let mut doc = Document::begin(config, Artifact::Dispatch);
    doc.line(format!(
        "void * const {}[{CAPACITY}] = {{",
        config.dispatch_table
    ));
    let last = slots.len() - 1;
    for (index, handler) in slots.iter().enumerate() {
        let sep = if index == last { "" } else { "," };
        doc.line(format!("    /* {index:3} */ (void *){handler}{sep}"));
    }
    doc.line("};");

    Ok(doc.finish())
}
