mod generate;
mod preview;
mod rules;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use generate::GenerateArgs;

#[derive(Debug, Parser)]
#[command(name = "updigest")]
#[command(about = "Monthly digest of company updates from monday.com")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch updates, write the HTML preview and export the PDF (default)
    Generate(GenerateArgs),
    /// Print the headless browser used for PDF export
    Browser {
        /// Explicit Chrome or Edge executable
        #[arg(long, env = "UPDIGEST_BROWSER_PATH")]
        browser: Option<PathBuf>,
    },
    /// Print the active keyword groups and cleanup rules
    Rules {
        /// YAML rules file; built-in rules are used when absent
        #[arg(long, env = "UPDIGEST_RULES_PATH")]
        rules: Option<PathBuf>,
    },
}

fn init_tracing() -> anyhow::Result<()> {
    let fallback = std::env::var("UPDIGEST_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Generate(args)) => generate::run_generate(args).await?,
        None => generate::run_generate(GenerateArgs::default()).await?,
        Some(Commands::Browser { browser }) => {
            let renderer = updigest_render::ChromePdfRenderer::locate(browser.as_deref())?;
            println!("{}", renderer.browser().display());
        }
        Some(Commands::Rules { rules }) => {
            let rules = rules::load_report_rules(rules.as_deref())?;
            print!("{}", rules::format_rules(&rules));
        }
    }

    Ok(())
}
