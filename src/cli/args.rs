use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for the Brevilabs backend
#[derive(Debug, Parser)]
#[command(name = "brevilabs", version, about, long_about = None)]
pub struct Cli {
    /// Path to brevilabs.toml (defaults to ./brevilabs.toml or the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the backend base URL for this invocation
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Client version sent in the X-Client-Version header
    #[arg(long, global = true, value_name = "VERSION")]
    pub plugin_version: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a default brevilabs.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    #[command(flatten)]
    Backend(BackendCommand),
}

/// Commands that need a loaded config and a client
#[derive(Debug, Subcommand)]
pub enum BackendCommand {
    /// Manage and validate the license key
    License {
        #[command(subcommand)]
        command: LicenseCommand,
    },

    /// Plan tool calls for a message
    Broca { message: String },

    /// Rerank documents against a query
    Rerank {
        #[arg(long, short)]
        query: String,

        #[arg(required = true)]
        documents: Vec<String>,
    },

    /// Extract the content of a web page
    Url { url: String },

    /// Extract the content of a PDF file
    Pdf { path: PathBuf },

    /// Search the web
    Search { query: String },

    /// Fetch a YouTube transcript
    Youtube { url: String },
}

#[derive(Debug, Subcommand)]
pub enum LicenseCommand {
    /// Encrypt and store a license key
    Set { key: String },

    /// Validate the stored key against the backend and update plus mode
    Validate,

    /// Show whether a key is stored and plus mode is active
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_rerank_with_documents() {
        let cli = Cli::parse_from(["brevilabs", "rerank", "-q", "cats", "a", "b"]);
        match cli.command {
            Commands::Backend(BackendCommand::Rerank { query, documents }) => {
                assert_eq!(query, "cats");
                assert_eq!(documents, vec!["a", "b"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn init_stays_top_level() {
        let cli = Cli::parse_from(["brevilabs", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init { force: true }));
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::parse_from([
            "brevilabs",
            "license",
            "validate",
            "--plugin-version",
            "2.7.0",
            "--base-url",
            "http://localhost:8080",
        ]);
        assert_eq!(cli.plugin_version.as_deref(), Some("2.7.0"));
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8080"));
        assert!(matches!(
            cli.command,
            Commands::Backend(BackendCommand::License {
                command: LicenseCommand::Validate
            })
        ));
    }
}
