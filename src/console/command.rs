//! Console command parsing and execution.

use clap::Parser;

use crate::device::TargetSpace;
use crate::drill::{OutputFormat, Strictness};
use crate::lifecycle::Shutdown;
use crate::lookup::DeviceLookup;

/// Commands accepted on the administrative console.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(no_binary_name = true, disable_help_subcommand = true)]
pub enum ConsoleCommand {
    /// Show the available console commands
    Help,
    /// Reload mappings and devices from disk
    Reload,
    /// Run a device lookup, e.g. `test /api/v0/boardconfig/D94AP/chips`
    Test {
        /// Request path to resolve
        path: String,
        /// Fail when drilling hits a non-object before the last subkey
        #[arg(long)]
        strict: bool,
    },
    /// Show mapping and cache sizes per space
    Stats,
    /// Shut down the server
    Exit,
}

pub const CONSOLE_HELP: &str = "\
Available console commands:

help                         - Show this help message.
reload                       - Reload mappings and devices from disk.
test <path> [--strict]       - Resolve a device path, e.g. test /api/v0/boardconfig/D94AP/chips
stats                        - Show mapping and cache sizes per space.
exit                         - Shut down the server.";

/// Parse one console line. `Ok(None)` for a blank line.
pub fn parse_console_command(line: &str) -> Result<Option<ConsoleCommand>, String> {
    let Some(args) = shlex::split(line) else {
        return Err("Unbalanced quotes in command".to_string());
    };
    if args.is_empty() {
        return Ok(None);
    }

    ConsoleCommand::try_parse_from(args)
        .map(Some)
        .map_err(|e| e.to_string())
}

/// Result of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleOutput {
    pub text: String,
    pub exit: bool,
}

impl ConsoleOutput {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            exit: false,
        }
    }
}

/// Execute a parsed command against the shared lookup pipeline.
pub async fn execute(
    command: ConsoleCommand,
    lookup: &DeviceLookup,
    shutdown: &Shutdown,
) -> ConsoleOutput {
    match command {
        ConsoleCommand::Help => ConsoleOutput::text(CONSOLE_HELP),
        ConsoleCommand::Reload => {
            let report = lookup.resolver().reload().await;
            ConsoleOutput::text(report.to_string())
        }
        ConsoleCommand::Test { path, strict } => {
            let strictness = if strict {
                Strictness::Strict
            } else {
                Strictness::Lenient
            };
            match lookup.lookup(&path, strictness, OutputFormat::Compact).await {
                Ok(body) => ConsoleOutput::text(String::from_utf8_lossy(&body)),
                Err(e) => ConsoleOutput::text(format!("{} {}", e.status().as_u16(), e.message())),
            }
        }
        ConsoleCommand::Stats => {
            let lines: Vec<String> = TargetSpace::ALL
                .into_iter()
                .map(|space| {
                    let stats = lookup.resolver().stats(space);
                    format!("{space}: {} mappings, {} cached", stats.entries, stats.cached)
                })
                .collect();
            ConsoleOutput::text(lines.join("\n"))
        }
        ConsoleCommand::Exit => {
            shutdown.trigger();
            ConsoleOutput {
                text: "Goodbye!".to_string(),
                exit: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::mapping::MAPPINGS_DIR;
    use crate::device::{LoadPolicy, Resolver};
    use std::fs;
    use std::sync::Arc;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_console_command("reload").unwrap(), Some(ConsoleCommand::Reload));
        assert_eq!(parse_console_command("   ").unwrap(), None);
        assert_eq!(
            parse_console_command("test /api/v0/model/A3084 --strict").unwrap(),
            Some(ConsoleCommand::Test {
                path: "/api/v0/model/A3084".into(),
                strict: true,
            })
        );
        assert_eq!(
            parse_console_command("test '/api/model/with space'").unwrap(),
            Some(ConsoleCommand::Test {
                path: "/api/model/with space".into(),
                strict: false,
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_console_command("frobnicate").is_err());
        assert!(parse_console_command("test").is_err());
        assert!(parse_console_command("test 'unterminated").is_err());
    }

    async fn fixture_lookup(root: &std::path::Path) -> DeviceLookup {
        fs::create_dir_all(root.join(MAPPINGS_DIR)).unwrap();
        fs::create_dir_all(root.join("devices")).unwrap();
        fs::write(
            root.join(MAPPINGS_DIR).join("boardconfigs.json"),
            r#"{"d94ap": "devices/d94ap.json"}"#,
        )
        .unwrap();
        fs::write(root.join(MAPPINGS_DIR).join("models.json"), "{}").unwrap();
        fs::write(root.join(MAPPINGS_DIR).join("identifiers.json"), "{}").unwrap();
        fs::write(root.join("devices/d94ap.json"), r#"{"chips": {"soc": "A17"}}"#).unwrap();

        let resolver = Arc::new(Resolver::new(root, LoadPolicy::default()));
        assert!(resolver.reload().await.is_success());
        DeviceLookup::new(resolver)
    }

    #[tokio::test]
    async fn test_execute_test_and_stats() {
        let dir = tempfile::tempdir().unwrap();
        let lookup = fixture_lookup(dir.path()).await;
        let shutdown = Shutdown::new();

        let out = execute(
            ConsoleCommand::Test {
                path: "/api/v0/boardconfig/D94AP/chips".into(),
                strict: false,
            },
            &lookup,
            &shutdown,
        )
        .await;
        assert_eq!(out.text, r#"{"soc":"A17"}"#);

        let out = execute(
            ConsoleCommand::Test {
                path: "/api/v0/boardconfig/nope".into(),
                strict: false,
            },
            &lookup,
            &shutdown,
        )
        .await;
        assert_eq!(out.text, "404 Specs machine couldn't find that device.");

        let out = execute(ConsoleCommand::Stats, &lookup, &shutdown).await;
        assert!(out.text.contains("boardconfig: 1 mappings, 1 cached"));
    }

    #[tokio::test]
    async fn test_exit_triggers_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let lookup = fixture_lookup(dir.path()).await;
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();

        let out = execute(ConsoleCommand::Exit, &lookup, &shutdown).await;
        assert!(out.exit);
        assert!(rx.try_recv().is_ok());
    }
}
