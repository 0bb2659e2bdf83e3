//! wobundle - WOA/WOF bundle assembler for WebObjects and Wonder projects.
//!
//! This binary assembles WOA application bundles and WOF framework jars
//! from a compiled project jar and its resolved dependencies.

use std::process;
use wobundle::cli;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
