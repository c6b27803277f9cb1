use std::error::Error;

use processing::executable_utils::{initialize_executable, run_backend};
use processing::processor::Processor;
use processing::scorers::HeuristicScorer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    println!("Starting fraud detection service...");
    let config = initialize_executable()?;
    let processor = Processor::new(HeuristicScorer::new());
    run_backend(config.service, processor).await
}
