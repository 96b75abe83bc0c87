//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the Ctrl-C handler,
//! validates paths, runs one import pass and prints the summary.

use anyhow::{Context, Result};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use clean_import::cli::Args;
use clean_import::config::{CONFIG_ENV_VAR, create_template_config, default_config_path, load_config};
use clean_import::output as out;
use clean_import::{Config, Importer, TracingReporter, shutdown};

use crate::logging::init_tracing;

/// Pass completed with at least one failed file and `--strict` was given.
pub const EXIT_FILE_FAILURES: u8 = 1;
/// Configuration or setup error; no pass was run.
pub const EXIT_CONFIG_ERROR: u8 = 2;

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    if args.print_config {
        return print_config().map(|()| ExitCode::SUCCESS);
    }

    if args.init_config {
        let path = default_config_path()?;
        create_template_config(&path)?;
        out::print_success(&format!("A template clean_import config was written to: {}", path.display()));
        out::print_info("Edit it to set `source_dir`, `dest_dir` and optionally `log_level`, `log_file`, `on_duplicate`.");
        return Ok(ExitCode::SUCCESS);
    }

    // Config file (if any), then CLI overrides.
    let (cfg_path, mut cfg) = match load_config()? {
        Some((path, cfg)) => (Some(path), cfg),
        None => (None, Config::default()),
    };
    args.apply_overrides(&mut cfg);

    // Hold the guard until exit; dropped early on Ctrl-C to flush logs.
    let guard_slot = Arc::new(Mutex::new(
        init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json)
            .context("initialize logging")?,
    ));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing the current file and stopping...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .context("install Ctrl-C handler")?;
    }

    if let Some(p) = &cfg_path {
        debug!(path = %p.display(), "using config file");
    }
    debug!("Starting clean_import: {:?}", args);

    cfg.validate()?;

    info!(
        source = %cfg.source_dir.display(),
        dest = %cfg.dest_dir.display(),
        dry_run = cfg.dry_run,
        "Starting import pass"
    );
    let summary = Importer::new(cfg.import_options()).run(&cfg.source_dir, &cfg.dest_dir, &TracingReporter);
    out::print_summary(&summary, cfg.dry_run);

    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    if args.strict && summary.failed() > 0 {
        return Ok(ExitCode::from(EXIT_FILE_FAILURES));
    }
    Ok(ExitCode::SUCCESS)
}

fn print_config() -> Result<()> {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV_VAR) {
        out::print_info(&format!(
            "Using {CONFIG_ENV_VAR} (explicit):\n  {}\n",
            explicit.to_string_lossy()
        ));
        return Ok(());
    }
    let p = default_config_path()?;
    out::print_info(&format!("Default clean_import config path:\n  {}\n", p.display()));
    if p.exists() {
        out::print_info("A config file already exists at that location.");
    } else {
        out::print_info("No config file exists there yet; defaults are used. Run with --init-config to create one.");
    }
    Ok(())
}
