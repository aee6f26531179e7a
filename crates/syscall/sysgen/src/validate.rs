//! Whole-table consistency checks.
//!
//! The emitters only reject what would make their own output wrong. These
//! checks are stricter and report every problem in a table at once, which
//! is what `sysgen check` runs before anything is written.

use std::collections::HashMap;

use crate::emit::{dispatch, errno};
use crate::error::Error;
use crate::model::{ErrnoTable, ErrnoValue, ParamSpec, SpecTable};

/// Validate a syscall table and return every problem found.
///
/// Reports duplicate numbers, normalized-name collisions, numbers outside
/// the dispatch table, entries out of ascending order, and a `strerror` row
/// whose fields differ from the ones the generated lookup uses.
pub fn validate_syscalls(table: &SpecTable) -> Result<(), Vec<Error>> {
    let mut errors = Vec::new();

    // Check numbers are unique.
    let mut numbers: HashMap<u32, &str> = HashMap::new();
    for entry in &table.entries {
        if let Some(prev) = numbers.insert(entry.number, &entry.raw_name) {
            errors.push(Error::DuplicateNumber {
                number: entry.number,
                first: prev.to_string(),
                second: entry.raw_name.clone(),
            });
        }
    }

    // Check normalized names are unique; `_exit%` and `exit` would collide
    // on `SYS_exit`.
    let mut names: HashMap<String, usize> = HashMap::new();
    for entry in &table.entries {
        if let Some(&first_line) = names.get(&entry.public_name()) {
            errors.push(Error::DuplicateName {
                name: entry.public_name(),
                first_line,
                second_line: entry.line,
            });
        } else {
            names.insert(entry.public_name(), entry.line);
        }
    }

    // Check every number fits in the dispatch table.
    for entry in &table.entries {
        if entry.number as usize >= dispatch::CAPACITY {
            errors.push(Error::DispatchOverflow {
                line: entry.line,
                number: entry.number,
                capacity: dispatch::CAPACITY,
            });
        }
    }

    // Check ordering. Equal neighbours are already reported as duplicates.
    for pair in table.entries.windows(2) {
        if pair[1].number < pair[0].number {
            errors.push(Error::UnsortedEntries {
                line: pair[1].line,
                number: pair[1].number,
                previous: pair[0].number,
            });
        }
    }

    // The strerror body reads `args->errnum` and writes `args->result`, so
    // the table row has to produce the same structure.
    let lookup = errno::lookup_entry();
    for entry in &table.entries {
        if entry.public_name() == lookup.public_name() && !same_fields(&entry.params, &lookup.params) {
            errors.push(Error::malformed(
                entry.line,
                format!(
                    "`{}` must take `int errnum | >char *result` to match the generated strerror lookup",
                    entry.raw_name
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Field-for-field equality of two parameter lists, ignoring spacing in types.
fn same_fields(a: &[ParamSpec], b: &[ParamSpec]) -> bool {
    let squash = |ty: &str| ty.replace(' ', "");
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| x.name == y.name && x.output == y.output && squash(&x.ty) == squash(&y.ty))
}

/// Validate an errno table and return every problem found.
///
/// Reports duplicate macro names, aliases whose target is not defined on an
/// earlier line, and gaps in the description numbering.
pub fn validate_errnos(table: &ErrnoTable) -> Result<(), Vec<Error>> {
    let mut errors = Vec::new();

    let mut defined: HashMap<&str, usize> = HashMap::new();
    for entry in &table.entries {
        if let ErrnoValue::Alias(target) = &entry.value {
            if !defined.contains_key(target.as_str()) {
                errors.push(Error::UnknownAlias {
                    line: entry.line,
                    name: entry.name.clone(),
                    target: target.clone(),
                });
            }
        }
        if let Some(&first_line) = defined.get(entry.name.as_str()) {
            errors.push(Error::DuplicateName {
                name: entry.name.clone(),
                first_line,
                second_line: entry.line,
            });
        } else {
            defined.insert(&entry.name, entry.line);
        }
    }

    if let Err(err) = errno::descriptions(table) {
        errors.push(err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
