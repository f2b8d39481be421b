//! Command-line arguments and their mapping onto analyzer tool calls.

use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value, json};

/// oz-logs - analyze, filter, tail and export log files
#[derive(Parser, Debug)]
#[command(name = "oz-logs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Print the raw tool result as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit diagnostic logs (stderr) as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show level counts, time range and most common messages
    Analyze {
        /// Log file to analyze
        file: String,
    },

    /// Print records matching the given criteria
    Filter {
        /// Log file to filter
        file: String,

        #[command(flatten)]
        criteria: FilterArgs,

        /// Maximum number of records to print
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the last records of a file, optionally following new ones
    Tail {
        /// Log file to tail
        file: String,

        /// Number of records to show
        #[arg(short = 'n', long = "lines", default_value_t = 10)]
        lines: usize,

        /// Keep printing records as the file grows
        #[arg(short, long)]
        follow: bool,

        /// Poll interval in milliseconds (overrides the config file)
        #[arg(long, value_name = "MS")]
        interval_ms: Option<u64>,
    },

    /// Write (optionally filtered) records to a file
    Export {
        /// Log file to export from
        file: String,

        /// Destination file
        destination: String,

        /// Output format: json, csv or text
        #[arg(long, default_value = "json")]
        format: String,

        #[command(flatten)]
        criteria: FilterArgs,
    },

    /// List the analyzer tools and their arguments
    Tools,
}

/// Filter flags shared by `filter` and `export`.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Minimum level (DEBUG, INFO, WARNING, ERROR, CRITICAL)
    #[arg(long)]
    pub level: Option<String>,

    /// Case-insensitive regex matched against the message
    #[arg(long)]
    pub pattern: Option<String>,

    /// Inclusive start time, e.g. "2024-01-15 10:30:00"
    #[arg(long = "start", value_name = "TIME")]
    pub start_time: Option<String>,

    /// Inclusive end time
    #[arg(long = "end", value_name = "TIME")]
    pub end_time: Option<String>,
}

impl FilterArgs {
    fn insert_into(&self, args: &mut Map<String, Value>) {
        let pairs = [
            ("level", &self.level),
            ("pattern", &self.pattern),
            ("start_time", &self.start_time),
            ("end_time", &self.end_time),
        ];
        for (key, value) in pairs {
            if let Some(v) = value {
                args.insert(key.to_string(), Value::String(v.clone()));
            }
        }
    }
}

impl Command {
    /// Name of the tool this command dispatches to, if any.
    pub fn tool_name(&self) -> Option<&'static str> {
        match self {
            Self::Analyze { .. } => Some("analyze_logs"),
            Self::Filter { .. } => Some("filter_logs"),
            Self::Tail { .. } => Some("tail_logs"),
            Self::Export { .. } => Some("export_logs"),
            Self::Tools => None,
        }
    }

    /// JSON arguments for the tool call.
    pub fn tool_args(&self) -> Value {
        let mut args = Map::new();
        match self {
            Self::Analyze { file } => {
                args.insert("path".into(), json!(file));
            }
            Self::Filter {
                file,
                criteria,
                limit,
            } => {
                args.insert("path".into(), json!(file));
                criteria.insert_into(&mut args);
                if let Some(limit) = limit {
                    args.insert("limit".into(), json!(limit));
                }
            }
            Self::Tail { file, lines, .. } => {
                args.insert("path".into(), json!(file));
                args.insert("lines".into(), json!(lines));
            }
            Self::Export {
                file,
                destination,
                format,
                criteria,
            } => {
                args.insert("path".into(), json!(file));
                args.insert("destination".into(), json!(destination));
                args.insert("format".into(), json!(format));
                criteria.insert_into(&mut args);
            }
            Self::Tools => {}
        }
        Value::Object(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("oz-logs").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn analyze_args() {
        let cli = parse(&["analyze", "/var/log/app.log"]);
        assert_eq!(cli.command.tool_name(), Some("analyze_logs"));
        assert_eq!(cli.command.tool_args(), json!({"path": "/var/log/app.log"}));
        assert!(!cli.json);
    }

    #[test]
    fn filter_args_with_flags() {
        let cli = parse(&[
            "filter",
            "app.log",
            "--level",
            "error",
            "--pattern",
            "database",
            "--start",
            "2024-01-15 10:00:00",
            "--limit",
            "5",
            "--json",
        ]);
        assert!(cli.json);
        assert_eq!(
            cli.command.tool_args(),
            json!({
                "path": "app.log",
                "level": "error",
                "pattern": "database",
                "start_time": "2024-01-15 10:00:00",
                "limit": 5
            })
        );
    }

    #[test]
    fn tail_defaults() {
        let cli = parse(&["tail", "app.log"]);
        match &cli.command {
            Command::Tail {
                lines,
                follow,
                interval_ms,
                ..
            } => {
                assert_eq!(*lines, 10);
                assert!(!follow);
                assert!(interval_ms.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.command.tool_args()["lines"], 10);
    }

    #[test]
    fn tail_follow_short_flags() {
        let cli = parse(&["tail", "app.log", "-n", "3", "-f"]);
        assert!(matches!(
            cli.command,
            Command::Tail {
                lines: 3,
                follow: true,
                ..
            }
        ));
    }

    #[test]
    fn export_args() {
        let cli = parse(&[
            "--config",
            "oz.toml",
            "export",
            "app.log",
            "out.csv",
            "--format",
            "csv",
            "--level",
            "WARNING",
        ]);
        assert_eq!(cli.config.as_deref(), Some("oz.toml"));
        assert_eq!(cli.command.tool_name(), Some("export_logs"));
        assert_eq!(
            cli.command.tool_args(),
            json!({
                "path": "app.log",
                "destination": "out.csv",
                "format": "csv",
                "level": "WARNING"
            })
        );
    }

    #[test]
    fn export_format_defaults_to_json() {
        let cli = parse(&["export", "app.log", "out.json"]);
        assert_eq!(cli.command.tool_args()["format"], "json");
    }

    #[test]
    fn tools_command_has_no_tool() {
        let cli = parse(&["tools", "--json"]);
        assert!(matches!(cli.command, Command::Tools));
        assert!(cli.command.tool_name().is_none());
        assert!(cli.json);
    }

    #[test]
    fn missing_file_argument_is_rejected() {
        assert!(Cli::try_parse_from(["oz-logs", "analyze"]).is_err());
        assert!(Cli::try_parse_from(["oz-logs", "export", "app.log"]).is_err());
    }
}
