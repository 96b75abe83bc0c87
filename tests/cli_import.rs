use assert_cmd::cargo;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

/// Run the binary with an isolated, explicit config file.
fn run(cfg: &Path, args: &[&std::ffi::OsStr]) -> Output {
    let me = cargo::cargo_bin!("clean_import");
    Command::new(me)
        .env("CLEAN_IMPORT_CONFIG", cfg)
        .args(args)
        .output()
        .expect("spawn binary")
}

fn write_cfg(path: &Path, body: &str) {
    fs::write(path, format!("<config>\n{body}\n</config>\n")).unwrap();
}

#[test]
fn positional_dirs_move_and_sanitize() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg = base.join("config.xml");
    write_cfg(&cfg, "  <log_level>quiet</log_level>");
    let source = base.join("input");
    let dest = base.join("import");
    fs::create_dir(&source).unwrap();
    fs::write(source.join("a.txt"), "a").unwrap();
    #[cfg(unix)]
    fs::write(source.join("b:bad.txt"), "b").unwrap();

    let out = run(&cfg, &[source.as_os_str(), dest.as_os_str()]);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(dest.join("a.txt").is_file());
    #[cfg(unix)]
    assert!(dest.join("b_bad.txt").is_file());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Moved"), "stdout: {stdout}");
}

#[test]
fn config_file_supplies_dirs_and_dry_run_flag_wins() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let source = base.join("in");
    let dest = base.join("out");
    fs::create_dir(&source).unwrap();
    fs::write(source.join("keep.txt"), "k").unwrap();
    let cfg = base.join("config.xml");
    write_cfg(
        &cfg,
        &format!(
            "  <source_dir>{}</source_dir>\n  <dest_dir>{}</dest_dir>\n  <log_level>quiet</log_level>",
            source.display(),
            dest.display()
        ),
    );

    let out = run(&cfg, &["--dry-run".as_ref()]);

    assert!(out.status.success());
    assert!(source.join("keep.txt").exists());
    assert!(!dest.exists());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Would move"));
}

#[test]
fn missing_source_is_not_fatal() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg = base.join("config.xml");
    write_cfg(&cfg, "  <log_level>quiet</log_level>");

    let missing = base.join("missing");
    let dest = base.join("import");
    let out = run(&cfg, &[missing.as_os_str(), dest.as_os_str()]);

    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("not a directory or an I/O error occurred"),
        "stderr: {stderr}"
    );
}

#[test]
fn destination_that_is_a_file_is_a_config_error() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg = base.join("config.xml");
    write_cfg(&cfg, "  <log_level>quiet</log_level>");
    let source = base.join("input");
    fs::create_dir(&source).unwrap();
    let dest = base.join("import");
    fs::write(&dest, "not a dir").unwrap();

    let out = run(&cfg, &[source.as_os_str(), dest.as_os_str()]);

    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn strict_reports_file_failures_in_exit_code() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg = base.join("config.xml");
    write_cfg(&cfg, "  <log_level>quiet</log_level>");
    let source = base.join("input");
    let dest = base.join("import");
    fs::create_dir(&source).unwrap();
    fs::write(source.join("x.txt"), "x").unwrap();
    fs::create_dir_all(dest.join("x.txt").join("occupied")).unwrap();

    let args = [
        source.as_os_str(),
        dest.as_os_str(),
        "--on-duplicate".as_ref(),
        "overwrite".as_ref(),
    ];
    let lenient = run(&cfg, &args);
    assert!(lenient.status.success());

    let mut strict_args = args.to_vec();
    strict_args.push("--strict".as_ref());
    let strict = run(&cfg, &strict_args);
    assert_eq!(strict.status.code(), Some(1));
    assert!(source.join("x.txt").exists());
}

#[test]
fn malformed_config_fails() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    fs::write(&cfg, "<config><unknown_tag>1</unknown_tag></config>").unwrap();

    let out = run(&cfg, &[]);

    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("parse config xml"));
}

#[test]
fn print_config_shows_env_path() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("whatever.xml");

    let out = run(&cfg, &["--print-config".as_ref()]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("CLEAN_IMPORT_CONFIG"));
    assert!(stdout.contains("whatever.xml"));
}

#[test]
fn init_config_writes_template_once() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg = base.join("nested").join("config.xml");

    let first = run(&cfg, &["--init-config".as_ref()]);
    assert!(first.status.success(), "stderr: {}", String::from_utf8_lossy(&first.stderr));
    assert!(fs::read_to_string(&cfg).unwrap().contains("<on_duplicate>skip</on_duplicate>"));

    let second = run(&cfg, &["--init-config".as_ref()]);
    assert_eq!(second.status.code(), Some(2));
}
