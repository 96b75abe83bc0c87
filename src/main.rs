use std::process::ExitCode;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = clean_import::cli::parse();
    match app::run(args) {
        Ok(code) => code,
        Err(e) => {
            clean_import::output::print_error(&format!("{e:#}"));
            ExitCode::from(app::EXIT_CONFIG_ERROR)
        }
    }
}
