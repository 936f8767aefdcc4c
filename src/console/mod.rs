//! Administrative console.
//!
//! # Data Flow
//! ```text
//! stdin line
//!     → command.rs (shlex split, clap parse)
//!     → execute (reload / test / stats / exit)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - The console is a thin adapter over the same `DeviceLookup` HTTP uses
//! - Output is compact JSON, one result per command

pub mod command;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::lifecycle::Shutdown;
use crate::lookup::DeviceLookup;

pub use command::{execute, parse_console_command, ConsoleCommand, ConsoleOutput};

/// Read commands from stdin until EOF or `exit`.
pub async fn run_console(lookup: DeviceLookup, shutdown: Shutdown) {
    println!("Type \"help\" for a list of console commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read console input");
                break;
            }
        };

        match parse_console_command(&line) {
            Ok(Some(command)) => {
                tracing::debug!(?command, "Console command");
                let output = execute(command, &lookup, &shutdown).await;
                println!("{}", output.text);
                if output.exit {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => println!("{e}"),
        }
    }

    tracing::info!("Console closed");
}
