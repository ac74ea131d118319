//! postflow - editorial workflow CLI
//!
//! Move posts through review and discuss them in threaded comments.
//!
//! ## Quick Start
//!
//! ```bash
//! # Create the data directory and default configuration
//! postflow init
//!
//! # Draft a post and send it to review
//! postflow post create "Launch announcement" --tag news
//! postflow post submit 1
//!
//! # Discuss it
//! postflow comment add 1 "Can we add a screenshot?"
//! postflow comment reply 1 "Added one"
//! postflow comment thread 1
//!
//! # Approve and publish
//! postflow post approve 1
//! postflow post publish 1
//! ```

mod commands;

#[tokio::main]
async fn main() {
    if let Err(err) = commands::run().await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
