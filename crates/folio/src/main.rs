//! Folio CLI.
//!
//! Serves the document builder or renders a saved document offline.

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, ServeArgs};
use error::CliError;
use output::Output;

/// Folio document builder.
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Assemble document sections into printable HTML")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the editor web server.
    Serve(ServeArgs),
    /// Render a document JSON file to HTML.
    Render(RenderArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Serve(args) => args.verbose,
            Self::Render(args) => args.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    init_tracing(cli.command.verbose());

    if let Err(e) = run(cli.command) {
        output.error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Serve(args) => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(args.execute())
        }
        Commands::Render(args) => args.execute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli =
            Cli::try_parse_from(["folio", "serve", "--host", "0.0.0.0", "-p", "8080", "-v"]).unwrap();

        assert!(matches!(cli.command, Commands::Serve(_)));
        assert!(cli.command.verbose());
    }

    #[test]
    fn test_parse_render_requires_input() {
        assert!(Cli::try_parse_from(["folio", "render"]).is_err());

        let cli = Cli::try_parse_from(["folio", "render", "doc.json", "--toc"]).unwrap();
        assert!(matches!(cli.command, Commands::Render(_)));
        assert!(!cli.command.verbose());
    }

    #[test]
    fn test_parse_rejects_invalid_port() {
        assert!(Cli::try_parse_from(["folio", "serve", "--port", "99999"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
