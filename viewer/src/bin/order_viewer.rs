use clap::Parser;
use std::error::Error;

use order_viewer::executable_utils::{Args, initialize_executable, run_viewer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let args = Args::parse();
    let config = initialize_executable(&args)?;
    run_viewer(args, config).await
}
