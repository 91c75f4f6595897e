//! Database Latency Probe - Main CLI Application
//!
//! Times TCP connects, database listener pings and SQL statement execution
//! against a single target and prints summary statistics.

use clap::Parser;
use db_latency_probe::{
    app::App, cli::Cli, config::EnvManager, error::AppError, output::OutputFormatterFactory,
};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(AppError::internal("panic").exit_code());
    }));

    // Usage errors exit with 1 like every other configuration error
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };
    let use_color = OutputFormatterFactory::color_enabled(!cli.no_color);

    let exit_code = match run_application(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e.format_for_console(use_color));
            print_error_suggestions(&e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<i32, AppError> {
    let app = App::new(cli).await?;
    app.run().await
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) | AppError::Parse(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check your .env file format");
            eprintln!("  - DLP_* variables must hold plain numbers or true/false");
            eprintln!("  - Run with --help to list the options of each subcommand");
            eprintln!();
            eprint!("{}", EnvManager::display_env_help());
        }
        AppError::File(_) => {
            eprintln!();
            eprintln!("File help:");
            eprintln!("  - Check the path given with --file");
            eprintln!("  - Statements in the file must be separated by ';'");
        }
        _ => {}
    }
}
