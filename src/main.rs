// src/main.rs

use std::process::ExitCode;

use console::style;
use is_it_ready::{cli, logging, run};

// Returning instead of calling `process::exit` lets the runtime shut down,
// which drops in-flight runs and kills their child processes.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run_main().await {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(err) => {
            eprintln!("{}", style("Unexpected error while running tasks.").red());
            eprintln!("{err:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run_main() -> anyhow::Result<i32> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
