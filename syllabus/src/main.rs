use colored::Colorize;
use std::process::ExitCode;
use syllabus::commands::command_argument_builder;
use syllabus::{handle_scrape, init_tracing};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let matches = command_argument_builder().get_matches();
    init_tracing(matches.get_flag("quiet"), matches.get_flag("verbose"));

    match handle_scrape(&matches).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{} {:#}", "✗".red(), e);
            ExitCode::FAILURE
        }
    }
}
