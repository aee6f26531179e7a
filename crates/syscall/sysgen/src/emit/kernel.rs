//! Kernel interface header: marshalling structures and handler prototypes.

use crate::config::GenConfig;
use crate::emit::{Artifact, Document};
use crate::layout;
use crate::model::{SpecTable, SyscallEntry};
use crate::names;

/// Attribute macro prefixed to every handler prototype.
pub const ATTR_MACRO: &str = "SYS_ATTR";

/// Shape of a kernel handler's signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// `int sys_x(void)`: the call takes no arguments.
    NoArgs,
    /// `void sys_x(struct sys_x_s *args)`: the result comes back through
    /// the output field of the structure.
    Output,
    /// `int sys_x(struct sys_x_s *args)`.
    Value,
}

/// Classify the handler for `entry`.
pub fn handler_kind(entry: &SyscallEntry) -> HandlerKind {
    match layout::synthesize(entry) {
        None => HandlerKind::NoArgs,
        Some(layout) if layout.output_type.is_some() => HandlerKind::Output,
        Some(_) => HandlerKind::Value,
    }
}

/// Handler signature without attribute or terminator, e.g.
/// `int sys_close(struct sys_close_s *args)`.
pub fn handler_signature(entry: &SyscallEntry) -> String {
    let name = names::handler_name(&entry.raw_name);
    let args = format!("struct {} *args", names::struct_name(&entry.raw_name));
    match handler_kind(entry) {
        HandlerKind::NoArgs => format!("int {name}(void)"),
        HandlerKind::Output => format!("void {name}({args})"),
        HandlerKind::Value => format!("int {name}({args})"),
    }
}

/// Render the kernel header.
///
/// All structures come first, then one prototype per entry tagged with its
/// number, then the prototype of the not-implemented handler.
pub fn emit(table: &SpecTable, config: &GenConfig) -> String {
    let mut doc = Document::begin(config, Artifact::KernelHeader);

    doc.line(format!("#define {ATTR_MACRO} {}", config.attribute));
    doc.blank();

    for layout in table.entries.iter().filter_map(layout::synthesize) {
        doc.push(&layout.render());
        doc.blank();
    }

    for entry in &table.entries {
        doc.line(format!(
            "/* {:3} */ {ATTR_MACRO} {};",
            entry.number,
            handler_signature(entry)
        ));
    }
    doc.line(format!(
        "/* N/A */ {ATTR_MACRO} int {}(void);",
        names::NOT_IMPLEMENTED
    ));

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
    fn signatures_follow_handler_kind() {
        let getpid = entry("50|getpid|pid_t");
        assert_eq!(handler_kind(&getpid), HandlerKind::NoArgs);
        assert_eq!(handler_signature(&getpid), "int sys_getpid(void)");

        let lseek = entry("4|lseek|off_t|int fd|off_t offset|int whence|>off_t result");
        assert_eq!(handler_kind(&lseek), HandlerKind::Output);
        assert_eq!(handler_signature(&lseek), "void sys_lseek(struct sys_lseek_s *args)");

        let exit = entry("52|_exit%|void|int status");
        assert_eq!(handler_kind(&exit), HandlerKind::Value);
        assert_eq!(handler_signature(&exit), "int sys_exit(struct sys_exit_s *args)");
    }

    #[test]
    fn emits_structs_then_prototypes() {
        let table = parse_syscalls(
            "0|read|ssize_t|int fd|void *data|size_t size\n50|getpid|pid_t\n90|_strerror%|int|int errnum|>char *result\n",
        )
        .unwrap();
        let config = GenConfig {
            banner: String::new(),
            attribute: "extern".into(),
            ..GenConfig::default()
        };
        let out = emit(&table, &config);
        let body = out
            .split("/* Generated automatically */\n\n")
            .nth(1)
            .unwrap();
        assert_eq!(
            body,
            "#define SYS_ATTR extern\n\
             \n\
             struct sys_read_s {\n    int fd;\n    void *data;\n    size_t size;\n};\n\
             \n\
             struct sys_strerror_s {\n    int errnum;\n    char * *result;\n};\n\
             \n\
             /*   0 */ SYS_ATTR int sys_read(struct sys_read_s *args);\n\
             /*  50 */ SYS_ATTR int sys_getpid(void);\n\
             /*  90 */ SYS_ATTR void sys_strerror(struct sys_strerror_s *args);\n\
             /* N/A */ SYS_ATTR int sys_notimp(void);\n\
             \n\
             #ifdef __cplusplus\n}\n#endif\n\
             \n\
             #endif\n"
        );
    }
}
