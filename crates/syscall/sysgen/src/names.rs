//! Symbol naming rules shared by every emitter.
//!
//! Anything that turns a raw table name into a C identifier goes through
//! [`normalize`]. The numbers header, kernel header, dispatch table and
//! caller stubs must agree on the symbol for each entry.

/// Prefix of syscall number macros.
pub const MACRO_PREFIX: &str = "SYS_";

/// Prefix of kernel handler functions.
pub const HANDLER_PREFIX: &str = "sys_";

/// Handler installed in every unassigned dispatch slot.
pub const NOT_IMPLEMENTED: &str = "sys_notimp";

/// Prefix shared by error macros that get a strerror slot.
pub const ERRNO_PREFIX: &str = "E";

/// Marker that hides a name from the public header (when trailing).
const PRIVATE_MARKER: char = '%';

/// Strip at most one leading `_` and remove every `%`.
pub fn normalize(raw: &str) -> String {
    let name = raw.strip_prefix('_').unwrap_or(raw);
    name.replace(PRIVATE_MARKER, "")
}

/// Returns `false` when the raw name ends in `%`.
pub fn is_public(raw: &str) -> bool {
    !raw.ends_with(PRIVATE_MARKER)
}

/// Name of the caller-side function: keeps a leading `_`, drops `%`.
pub fn declared_name(raw: &str) -> String {
    raw.replace(PRIVATE_MARKER, "")
}

/// `SYS_<name>` selector macro.
pub fn syscall_macro(raw: &str) -> String {
    format!("{MACRO_PREFIX}{}", normalize(raw))
}

/// `sys_<name>` kernel handler.
pub fn handler_name(raw: &str) -> String {
    format!("{HANDLER_PREFIX}{}", normalize(raw))
}

/// `sys_<name>_s` marshalling structure tag.
pub fn struct_name(raw: &str) -> String {
    format!("{HANDLER_PREFIX}{}_s", normalize(raw))
}
