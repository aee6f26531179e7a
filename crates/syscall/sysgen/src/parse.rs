//! Parsers for the `|`-delimited syscall and errno tables.
//!
//! Both tables share the same line rules: lines whose first non-blank
//! character is `#` are comments, blank lines are ignored, and every other
//! line is split on `|` with each field trimmed.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::model::{ErrnoEntry, ErrnoTable, ErrnoValue, ParamSpec, SpecTable, SyscallEntry};

/// Sentinel parameter meaning "no arguments".
const VOID: &str = "void";

/// Marker prefix of the output parameter.
const OUTPUT_MARKER: char = '>';

/// Yields `(line, fields)` for every row that is neither blank nor a comment.
fn table_rows(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines().enumerate().filter_map(|(idx, raw)| {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        Some((idx + 1, line.split('|').map(str::trim).collect()))
    })
}

/// Parse a syscall table.
///
/// Grammar: `number | name | returnType [ | param ... | [>]lastParam ]`.
pub fn parse_syscalls(text: &str) -> Result<SpecTable> {
    let entries = table_rows(text)
        .map(|(line, fields)| parse_syscall(line, &fields))
        .collect::<Result<Vec<_>>>()?;
    debug!(entries = entries.len(), "parsed syscall table");
    Ok(SpecTable { entries })
}

fn parse_syscall(line: usize, fields: &[&str]) -> Result<SyscallEntry> {
    let [number, name, return_type, params @ ..] = fields else {
        return Err(Error::malformed(
            line,
            format!("expected at least 3 fields, found {}", fields.len()),
        ));
    };

    let number: u32 = number.parse().map_err(|_| {
        Error::malformed(line, format!("`{number}` is not a valid syscall number"))
    })?;
    if name.is_empty() {
        return Err(Error::malformed(line, "empty name field"));
    }
    if return_type.is_empty() {
        return Err(Error::malformed(line, "empty return type field"));
    }
    let params = parse_params(line, params)?;

    trace!(line, number, name = *name, params = params.len(), "syscall entry");
    Ok(SyscallEntry {
        number,
        raw_name: (*name).to_string(),
        return_type: (*return_type).to_string(),
        params,
        line,
    })
}

fn parse_params(line: usize, fields: &[&str]) -> Result<Vec<ParamSpec>> {
    if matches!(fields, [] | [VOID]) {
        return Ok(Vec::new());
    }

    let mut params = fields
        .iter()
        .map(|field| parse_param(line, field))
        .collect::<Result<Vec<_>>>()?;

    let outputs = params.iter().filter(|p| p.output).count();
    if outputs > 1 {
        return Err(Error::malformed(
            line,
            format!("{outputs} output parameters, at most one is allowed"),
        ));
    }

    // The output slot always travels last, in the struct and in the trap call.
    if let Some(pos) = params.iter().position(|p| p.output) {
        let out = params.remove(pos);
        params.push(out);
    }

    Ok(params)
}

fn parse_param(line: usize, field: &str) -> Result<ParamSpec> {
    if field.is_empty() {
        return Err(Error::malformed(line, "empty parameter field"));
    }
    if field == VOID {
        return Err(Error::malformed(line, "`void` must be the only parameter"));
    }

    let (output, decl) = match field.strip_prefix(OUTPUT_MARKER) {
        Some(rest) => (true, rest.trim_start()),
        None => (false, field),
    };

    let name_start = decl
        .char_indices()
        .rev()
        .find(|&(_, c)| !is_ident_char(c))
        .map_or(0, |(i, c)| i + c.len_utf8());
    let name = &decl[name_start..];
    let ty = decl[..name_start].trim_end();

    if name.is_empty() {
        return Err(Error::malformed(
            line,
            format!("parameter `{decl}` does not end in a name"),
        ));
    }
    if ty.is_empty() {
        return Err(Error::malformed(line, format!("parameter `{decl}` has no type")));
    }

    Ok(ParamSpec {
        decl: decl.to_string(),
        ty: ty.to_string(),
        name: name.to_string(),
        output,
    })
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parse an errno table.
///
/// Grammar: `NAME | value | description [ | comment ]`, where `value` is a
/// number or the name of another macro.
pub fn parse_errnos(text: &str) -> Result<ErrnoTable> {
    let entries = table_rows(text)
        .map(|(line, fields)| parse_errno(line, &fields))
        .collect::<Result<Vec<_>>>()?;
    debug!(entries = entries.len(), "parsed errno table");
    Ok(ErrnoTable { entries })
}

fn parse_errno(line: usize, fields: &[&str]) -> Result<ErrnoEntry> {
    let [name, value, description, rest @ ..] = fields else {
        return Err(Error::malformed(
            line,
            format!("expected at least 3 fields, found {}", fields.len()),
        ));
    };
    if rest.len() > 1 {
        return Err(Error::malformed(
            line,
            format!("expected at most 4 fields, found {}", fields.len()),
        ));
    }
    if name.is_empty() {
        return Err(Error::malformed(line, "empty name field"));
    }

    let value = if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        let n = value.parse().map_err(|_| {
            Error::malformed(line, format!("errno value `{value}` is out of range"))
        })?;
        ErrnoValue::Number(n)
    } else if !value.is_empty() && value.chars().all(is_ident_char) {
        ErrnoValue::Alias((*value).to_string())
    } else {
        return Err(Error::malformed(
            line,
            format!("`{value}` is neither a number nor a macro name"),
        ));
    };

    let comment = rest
        .first()
        .filter(|c| !c.is_empty())
        .unwrap_or(description);

    Ok(ErrnoEntry {
        name: (*name).to_string(),
        value,
        description: (*description).to_string(),
        comment: (*comment).to_string(),
        line,
    })
}
