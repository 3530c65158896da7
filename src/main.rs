//! dsb - data store benchmark analyzer
//!
//! Reads `<results-dir>/<size>/<store>_<test>.csv` timing files and prints
//! CSV reports on stdout. Diagnostics go to stderr.

use clap::Parser;
use dsb_analyzer::{app::App, cli::Cli, error::ErrorReporter, logging::stderr_color};
use std::process;

fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(99);
    }));

    let cli = Cli::parse();

    if let Err(message) = cli.validate() {
        eprintln!("error: {}", message);
        process::exit(2);
    }

    if cli.should_show_topic_help() || !cli.has_work() {
        print!("{}", cli.display_help());
        return;
    }

    let reporter = ErrorReporter::new(stderr_color(cli.use_colors()), cli.verbose || cli.debug);
    let result = App::new(cli).and_then(|app| app.run());

    if let Err(e) = result {
        reporter.report_error(&e);
        process::exit(e.exit_code());
    }
}
