//! Caller side: public declarations and the stubs that trap into the kernel.
//!
//! Entries whose raw name ends in `%` are left out of both files. The stub
//! selects its syscall with the normalized `SYS_*` macro even when the
//! declared function keeps a leading underscore (`_exit` traps with
//! `SYS_exit`).

use crate::config::GenConfig;
use crate::emit::{Artifact, Document};
use crate::model::{SpecTable, SyscallEntry};
use crate::names;

const NORETURN: &str = "__attribute__((noreturn))";

/// Value returned by output-slot stubs when the trap reports failure.
pub const FAILURE: &str = "-1";

/// Shape of a stub body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubKind {
    /// `return trap(...);`
    Return,
    /// Trap into the kernel, then spin; control never comes back.
    Diverge,
    /// Trap with the address of a local and return it on success.
    Output,
}

/// Classify the stub for `entry`.
pub fn stub_kind(entry: &SyscallEntry) -> StubKind {
    if entry.output().is_some() {
        StubKind::Output
    } else if entry.diverges() {
        StubKind::Diverge
    } else {
        StubKind::Return
    }
}

/// Join a C type and a declarator: `char *` and `f` give `char *f`.
fn declare(ty: &str, name: &str) -> String {
    if ty.ends_with('*') {
        format!("{ty}{name}")
    } else {
        format!("{ty} {name}")
    }
}

/// Caller-visible signature, e.g. `off_t lseek(int fd, off_t offset, int whence)`.
pub fn signature(entry: &SyscallEntry) -> String {
    let params: Vec<&str> = entry.value_params().map(|p| p.decl.as_str()).collect();
    let params = if params.is_empty() {
        "void".to_string()
    } else {
        params.join(", ")
    };
    let name = names::declared_name(&entry.raw_name);
    declare(entry.effective_return_type(), &format!("{name}({params})"))
}

/// `extern` declaration for the public header.
pub fn declaration(entry: &SyscallEntry) -> String {
    if entry.diverges() {
        format!("extern {} {NORETURN};", signature(entry))
    } else {
        format!("extern {};", signature(entry))
    }
}

/// Full stub definition, ending in a newline.
pub fn stub(entry: &SyscallEntry, trap: &str) -> String {
    let mut out = String::new();
    if entry.diverges() {
        out.push_str(NORETURN);
        out.push(' ');
    }
    out.push_str(&signature(entry));
    out.push_str("\n{\n");
    out.push_str(&stub_body(entry, trap));
    out.push_str("}\n");
    out
}

/// Statements inside the stub's braces.
pub fn stub_body(entry: &SyscallEntry, trap: &str) -> String {
    let mut args = vec![names::syscall_macro(&entry.raw_name)];
    args.extend(entry.value_params().map(|p| p.name.clone()));

    match (stub_kind(entry), entry.output()) {
        (StubKind::Output, Some(out)) => {
            // The local has the declared type; the struct field points at it.
            args.push(format!("&{}", out.name));
            format!(
                "    {decl};\n    if ({trap}({args}) == 0)\n        return {name};\n    else\n        return {FAILURE};\n",
                decl = out.decl,
                name = out.name,
                args = args.join(", "),
            )
        }
        (StubKind::Diverge, _) => {
            format!("    {trap}({});\n    for (;;)\n        ;\n", args.join(", "))
        }
        _ => format!("    return {trap}({});\n", args.join(", ")),
    }
}

/// Render the public caller header.
pub fn emit_header(table: &SpecTable, config: &GenConfig) -> String {
    let mut doc = Document::begin(config, Artifact::CallerHeader);
    for entry in table.entries.iter().filter(|e| e.is_public()) {
        doc.line(declaration(entry));
    }
    doc.finish()
}

/// Render the caller stub source.
pub fn emit_stubs(table: &SpecTable, config: &GenConfig) -> String {
    let mut doc = Document::begin(config, Artifact::CallerStubs);
    for entry in table.entries.iter().filter(|e| e.is_public()) {
        doc.push(&stub(entry, &config.trap));
        doc.blank();
    }
    doc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_syscalls;

    fn entry(line: &str) -> SyscallEntry {
        parse_syscalls(line).unwrap().entries.remove(0)
    }

    #[test]
    fn no_arg_stub_returns_trap_result() {
        let e = entry("50|getpid|pid_t");
        assert_eq!(stub_kind(&e), StubKind::Return);
        assert_eq!(
            stub(&e, "syscall"),
            "pid_t getpid(void)\n{\n    return syscall(SYS_getpid);\n}\n"
        );
    }

    #[test]
    fn no_arg_void_stub_diverges() {
        let e = entry("60|abort|void|void");
        assert_eq!(stub_kind(&e), StubKind::Diverge);
        assert_eq!(
            stub(&e, "syscall"),
            "__attribute__((noreturn)) void abort(void)\n{\n    syscall(SYS_abort);\n    for (;;)\n        ;\n}\n"
        );
    }

    #[test]
    fn value_stub_passes_args_in_order() {
        let e = entry("1|write|ssize_t|int fd|const void *data|size_t size");
        assert_eq!(
            stub(&e, "syscall"),
            "ssize_t write(int fd, const void *data, size_t size)\n{\n    return syscall(SYS_write, fd, data, size);\n}\n"
        );
    }

    #[test]
    fn output_stub_returns_local() {
        let e = entry("4|lseek|off_t|int fd|off_t offset|int whence|>off_t result");
        assert_eq!(stub_kind(&e), StubKind::Output);
        assert_eq!(
            stub(&e, "syscall"),
            "off_t lseek(int fd, off_t offset, int whence)\n\
             {\n\
             \x20   off_t result;\n\
             \x20   if (syscall(SYS_lseek, fd, offset, whence, &result) == 0)\n\
             \x20       return result;\n\
             \x20   else\n\
             \x20       return -1;\n\
             }\n"
        );
    }

    #[test]
    fn pointer_output_keeps_declared_type() {
        let e = entry("40|getcwd|char *|char *buf|size_t size|>char *result");
        assert_eq!(signature(&e), "char *getcwd(char *buf, size_t size)");
        assert_eq!(
            stub_body(&e, "syscall"),
            "    char *result;\n    if (syscall(SYS_getcwd, buf, size, &result) == 0)\n        return result;\n    else\n        return -1;\n"
        );
    }

    #[test]
    fn output_only_stub_has_void_params() {
        let e = entry("70|gettid|int|>pid_t tid");
        assert_eq!(signature(&e), "pid_t gettid(void)");
        assert!(stub_body(&e, "trap").contains("if (trap(SYS_gettid, &tid) == 0)"));
    }

    #[test]
    fn diverging_stub_keeps_declared_underscore() {
        let e = entry("52|_exit|void|int status");
        assert_eq!(declaration(&e), "extern void _exit(int status) __attribute__((noreturn));");
        assert_eq!(
            stub_body(&e, "syscall"),
            "    syscall(SYS_exit, status);\n    for (;;)\n        ;\n"
        );
    }

    #[test]
    fn private_entries_are_skipped() {
        let table = parse_syscalls("3|close|int|int fd\n90|_strerror%|int|int errnum|>char *result\n").unwrap();
        let config = GenConfig::default();
        let header = emit_header(&table, &config);
        assert!(header.contains("extern int close(int fd);\n"));
        assert!(!header.contains("strerror"));
        let stubs = emit_stubs(&table, &config);
        assert!(stubs.contains("int close(int fd)\n"));
        assert!(!stubs.contains("strerror"));
    }

    #[test]
    fn trap_name_is_configurable() {
        let table = parse_syscalls("3|close|int|int fd").unwrap();
        let config = GenConfig {
            trap: "__trap".into(),
            ..GenConfig::default()
        };
        assert!(emit_stubs(&table, &config).contains("return __trap(SYS_close, fd);"));
    }
}
