//! Errno header and the strerror description table.

use tracing::debug;

use crate::config::GenConfig;
use crate::emit::{Artifact, Document, kernel};
use crate::error::{Error, Result};
use crate::model::{ErrnoTable, ErrnoValue, ParamSpec, SyscallEntry};

/// Description stored at index 0.
pub const NO_ERROR: &str = "No error";

/// Description returned for out-of-range error numbers.
pub const UNKNOWN_ERROR: &str = "Error";

/// Raw name of the kernel call that looks descriptions up.
const LOOKUP_CALL: &str = "strerror";

/// Render the errno macro header.
pub fn emit_header(table: &ErrnoTable, config: &GenConfig) -> String {
    let mut doc = Document::begin(config, Artifact::ErrnoHeader);
    for entry in &table.entries {
        doc.line(format!(
            "#define {:<15} {} /* {} */",
            entry.name, entry.value, entry.comment
        ));
    }
    doc.finish()
}

/// The dense description table, index 0 included.
///
/// Entry `n` holds the description of the error whose value is `n`, so the
/// qualifying entries must be numbered `1, 2, 3, ...` in table order.
pub fn descriptions(table: &ErrnoTable) -> Result<Vec<&str>> {
    let mut out = vec![NO_ERROR];
    for entry in table.entries.iter().filter(|e| e.has_description_slot()) {
        let ErrnoValue::Number(found) = entry.value else {
            continue;
        };
        let expected = out.len() as u32;
        if found != expected {
            return Err(Error::SparseErrno {
                line: entry.line,
                name: entry.name.clone(),
                expected,
                found,
            });
        }
        out.push(&entry.description);
    }
    debug!(slots = out.len(), "strerror table laid out");
    Ok(out)
}

/// The syscall row the lookup handler implements:
/// `strerror | int | int errnum | >char *result`.
pub fn lookup_entry() -> SyscallEntry {
    SyscallEntry {
        number: 0,
        raw_name: LOOKUP_CALL.to_string(),
        return_type: "int".to_string(),
        params: vec![
            ParamSpec {
                decl: "int errnum".to_string(),
                ty: "int".to_string(),
                name: "errnum".to_string(),
                output: false,
            },
            ParamSpec {
                decl: "char *result".to_string(),
                ty: "char *".to_string(),
                name: "result".to_string(),
                output: true,
            },
        ],
        line: 0,
    }
}

/// Render the strerror source: description array plus bounded lookup.
pub fn emit_strerror(table: &ErrnoTable, config: &GenConfig) -> Result<String> {
    let descriptions = descriptions(table)?;

    let mut doc = Document::begin(config, Artifact::Strerror);
    doc.line("static const char * const errlist[] = {");
    for description in &descriptions {
        doc.line(format!("    \"{}\",", c_escape(description)));
    }
    doc.line("};");
    doc.line("#define errno_count ((int)(sizeof(errlist) / sizeof(errlist[0])))");
    doc.blank();

    doc.line(kernel::handler_signature(&lookup_entry()));
    doc.line("{");
    doc.line("    int errnum = args->errnum;");
    doc.line("    if (errnum >= 0 && errnum < errno_count)");
    doc.line("        *(args->result) = (char *)errlist[errnum];");
    doc.line("    else");
    doc.line(format!("        *(args->result) = (char *)\"{UNKNOWN_ERROR}\";"));
    doc.line("}");

    Ok(doc.finish())
}

/// Escape text for a C string literal.
fn c_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out
}
