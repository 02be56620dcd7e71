use std::process::ExitCode;
use versus_runner::cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse the command line and dispatch to the selected subcommand
    match cli::run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
