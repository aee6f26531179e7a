//! Integration tests for the sysgen binary.
//!
//! These run the built binary as a subprocess against the fixture tables.
//! Every test runs from a fresh temporary directory so no `sysgen.toml`
//! from the surrounding checkout is picked up.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn sysgen(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sysgen"))
        .args(args)
        .current_dir(cwd)
        .env_remove("SYSGEN_LOG")
        .output()
        .expect("failed to execute sysgen")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "sysgen failed (exit={:?}):\nstdout:\n{}\nstderr:\n{}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
    );
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("non-UTF-8 temp path")
}

// ---------------------------------------------------------------------------
// gen
// ---------------------------------------------------------------------------

#[test]
fn gen_writes_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let syscalls = fixture("syscalls.tab");
    let output = sysgen(dir.path(), &["gen", "numbers", path_str(&syscalls)]);
    assert_success(&output);

    let text = stdout(&output);
    assert!(text.contains("#ifndef BITS_SYSCALL_H\n"));
    assert!(text.contains("#define SYS_write 1\n"));
    assert!(text.contains("#define SYS_read 5\n"));
    assert!(text.contains("#define SYS_exit 12\n"));
    assert!(!text.contains("Generating"));
}

#[test]
fn gen_writes_file_and_creates_parents() {
    let dir = tempfile::tempdir().unwrap();
    let syscalls = fixture("syscalls.tab");
    let out = dir.path().join("build/kernel/dispatch.c");
    let output = sysgen(
        dir.path(),
        &["gen", "dispatch", path_str(&syscalls), "-o", path_str(&out)],
    );
    assert_success(&output);
    assert!(stdout(&output).contains("  -> "));

    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(text.matches("(void *)").count(), 128);
    assert!(text.contains("    /*  12 */ (void *)sys_exit,\n"));
    assert!(text.contains("    /*   0 */ (void *)sys_notimp,\n"));
}

#[test]
fn gen_quiet_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let syscalls = fixture("syscalls.tab");
    let out = dir.path().join("unistd.h");
    let output = sysgen(
        dir.path(),
        &["-q", "gen", "caller-header", path_str(&syscalls), "-o", path_str(&out)],
    );
    assert_success(&output);
    assert!(stdout(&output).is_empty());

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("extern int _read(void *buf, size_t count);\n"));
    assert!(!text.contains("exit"));
}

#[test]
fn gen_rejects_malformed_table_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let table = fixture("malformed.tab");
    let out = dir.path().join("syscall.h");
    let output = sysgen(
        dir.path(),
        &["gen", "numbers", path_str(&table), "-o", path_str(&out)],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("line 2: malformed entry"));
    assert!(!out.exists());
}

#[test]
fn gen_rejects_unsorted_dispatch() {
    let dir = tempfile::tempdir().unwrap();
    let table = fixture("unsorted.tab");
    let output = sysgen(dir.path(), &["gen", "dispatch", path_str(&table)]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("strictly ascending"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn gen_rejects_unknown_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let syscalls = fixture("syscalls.tab");
    let output = sysgen(dir.path(), &["gen", "header", path_str(&syscalls)]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown artifact `header`"));
}

#[test]
fn gen_uses_config_found_in_ancestor() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("sysgen.toml"), "trap = \"__trap\"\n").unwrap();
    let nested = dir.path().join("src/libc");
    std::fs::create_dir_all(&nested).unwrap();

    let syscalls = fixture("syscalls.tab");
    let output = sysgen(&nested, &["gen", "caller-stubs", path_str(&syscalls)]);
    assert_success(&output);
    assert!(stdout(&output).contains("return __trap(SYS_close, fd);"));
}

// ---------------------------------------------------------------------------
// all
// ---------------------------------------------------------------------------

fn write_config(dir: &Path, syscalls: &Path, errno: &Path) -> PathBuf {
    let mut config = String::from("banner = \"/* test */\"\n");
    for (artifact, input, path) in [
        ("numbers", syscalls, "include/bits/syscall.h"),
        ("kernel-header", syscalls, "include/kernel/syscall.h"),
        ("dispatch", syscalls, "kernel/dispatch.c"),
        ("caller-header", syscalls, "include/bits/unistd.h"),
        ("caller-stubs", syscalls, "libc/syscalls.c"),
        ("errno-header", errno, "include/bits/errno.h"),
        ("strerror", errno, "kernel/strerror.c"),
    ] {
        config.push_str(&format!(
            "\n[[output]]\nartifact = \"{artifact}\"\ninput = {:?}\npath = \"out/{path}\"\n",
            path_str(input)
        ));
    }
    let path = dir.join("sysgen.toml");
    std::fs::write(&path, config).unwrap();
    path
}

#[test]
fn all_writes_every_output() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &fixture("syscalls.tab"), &fixture("errno.tab"));

    let output = sysgen(dir.path(), &["all"]);
    assert_success(&output);
    assert!(stdout(&output).contains("Generated 7 file(s)."));

    let out = dir.path().join("out");
    for path in [
        "include/bits/syscall.h",
        "include/kernel/syscall.h",
        "kernel/dispatch.c",
        "include/bits/unistd.h",
        "libc/syscalls.c",
        "include/bits/errno.h",
        "kernel/strerror.c",
    ] {
        let text = std::fs::read_to_string(out.join(path)).unwrap();
        assert!(text.starts_with("/* test */\n"), "{path} is missing the banner");
    }

    let strerror = std::fs::read_to_string(out.join("kernel/strerror.c")).unwrap();
    assert!(strerror.contains("void sys_strerror(struct sys_strerror_s *args)"));
}

#[test]
fn all_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &fixture("syscalls.tab"), &fixture("errno.tab"));
    let stubs = dir.path().join("out/libc/syscalls.c");

    assert_success(&sysgen(dir.path(), &["all"]));
    let first = std::fs::read(&stubs).unwrap();
    assert_success(&sysgen(dir.path(), &["all"]));
    assert_eq!(first, std::fs::read(&stubs).unwrap());
}

#[test]
fn all_writes_nothing_when_one_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &fixture("unsorted.tab"), &fixture("errno.tab"));

    let output = sysgen(dir.path(), &["all"]);
    assert!(!output.status.success());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn all_with_explicit_config_path() {
    let dir = tempfile::tempdir().unwrap();
    let confdir = dir.path().join("conf");
    std::fs::create_dir_all(&confdir).unwrap();
    let config = write_config(&confdir, &fixture("syscalls.tab"), &fixture("errno.tab"));

    let output = sysgen(dir.path(), &["all", "--config", path_str(&config)]);
    assert_success(&output);
    assert!(confdir.join("out/kernel/dispatch.c").exists());
}

#[test]
fn all_without_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = sysgen(dir.path(), &["all"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("[[output]]"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_accepts_clean_tables() {
    let dir = tempfile::tempdir().unwrap();
    let output = sysgen(
        dir.path(),
        &[
            "check",
            path_str(&fixture("syscalls.tab")),
            "--errno",
            path_str(&fixture("errno.tab")),
        ],
    );
    assert_success(&output);
    assert!(stdout(&output).contains("No problems found."));
}

#[test]
fn check_reports_every_problem() {
    let dir = tempfile::tempdir().unwrap();
    let output = sysgen(dir.path(), &["check", path_str(&fixture("unsorted.tab"))]);
    assert!(!output.status.success());

    let err = stderr(&output);
    assert!(err.contains("syscall number 3 is used by both `close` and `dup`"));
    assert!(err.contains("does not follow 3"));
    assert!(err.contains("2 problem(s) found"));
}
