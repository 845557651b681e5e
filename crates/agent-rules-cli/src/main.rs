//! Convert agent definitions into rule documents from the command line.

use std::path::{Path, PathBuf};

use agent_rules::{BatchReport, convert_agents, markdown_files, parse_agent, wrap_markdown};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "agent_rules=info";

#[derive(Parser, Debug)]
#[command(name = "agent-rules", version)]
#[command(about = "Convert agent definitions into rule documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Render every agent definition under a directory as a rule document
    Convert {
        /// Directory containing agent definition files
        #[arg(short, long, default_value = "agents")]
        input: PathBuf,

        /// Directory the rule documents are written to
        #[arg(short, long, default_value = "rules")]
        output: PathBuf,
    },

    /// Prefix every markdown file under a directory with rule frontmatter
    Wrap {
        /// Directory containing markdown files
        #[arg(short, long, default_value = "rules")]
        input: PathBuf,

        /// Directory the `.mdc` files are written to
        #[arg(short, long, default_value = "rules")]
        output: PathBuf,
    },

    /// Print the parsed form of one agent definition as JSON
    Inspect {
        /// Agent definition file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(false)
        .init();

    match Cli::parse().command {
        Command::Convert { input, output } => {
            let files = list_inputs(&input)?;
            let report = convert_agents(&input, &files, &output);
            println!("{}", summary("Converted", &report));
        }
        Command::Wrap { input, output } => {
            let files = list_inputs(&input)?;
            let report = wrap_markdown(&input, &files, &output);
            println!("{}", summary("Wrapped", &report));
        }
        Command::Inspect { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let agent = parse_agent(&content);
            println!("{}", serde_json::to_string_pretty(&agent)?);
        }
    }

    Ok(())
}

fn list_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let files = markdown_files(dir)
        .with_context(|| format!("Failed to list markdown files in {}", dir.display()))?;
    tracing::debug!(dir = %dir.display(), count = files.len(), "found markdown files");
    Ok(files)
}

fn summary(verb: &str, report: &BatchReport) -> String {
    format!(
        "{verb} {} of {} file(s) ({} skipped, {} failed)",
        report.converted,
        report.total(),
        report.skipped,
        report.failed
    )
}
