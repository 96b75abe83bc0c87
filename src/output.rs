use owo_colors::OwoColorize;

use crate::import::{FileStatus, ImportSummary};

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Print a plain user-facing line (no prefix). Use this for primary outputs
/// such as "Moved X -> Y" which users may script against.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// Per-file lines followed by a one-line tally.
pub fn print_summary(summary: &ImportSummary, dry_run: bool) {
    for outcome in &summary.outcomes {
        let src = outcome.source.display();
        match &outcome.status {
            FileStatus::Moved { dest } if dry_run => {
                print_user(&format!("Would move {} -> {}", src, dest.display()))
            }
            FileStatus::Moved { dest } => {
                print_user(&format!("Moved {} -> {}", src, dest.display()))
            }
            FileStatus::Skipped { reason } => print_warn(&format!("Skipped {}: {}", src, reason)),
            FileStatus::Failed { error } => print_error(&format!("Failed {}: {}", src, error)),
        }
    }

    if let Some(e) = &summary.listing_error {
        print_error(&e.to_string());
    }
    if summary.interrupted {
        print_warn("Import interrupted; remaining files were left in the source directory.");
    }

    let tally = format!(
        "{} {}, {} skipped, {} failed",
        summary.moved(),
        if dry_run { "to move" } else { "moved" },
        summary.skipped(),
        summary.failed()
    );
    if summary.failed() == 0 && summary.listing_error.is_none() {
        print_success(&tally);
    } else {
        print_warn(&tally);
    }
}
