use clap::{Parser, Subcommand};
use sitegen_sitemap::{config, generate, output};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "sitegen-sitemap")]
#[command(about = "Generate sitemap.xml for a static site")]
#[command(long_about = "\
Generate sitemap.xml for a static site

Every .html file under the site root becomes one <url> entry. index.html
files address their directory:

  site/
  ├── index.html               → https://example.com/
  ├── services/index.html      → https://example.com/services/
  ├── blog/post-1.html         → https://example.com/blog/post-1.html
  ├── 404.html                 ✗ excluded
  └── node_modules/            ✗ excluded, never opened

Priority and change frequency come from an ordered rule table; the first
rule whose pattern occurs in the page path wins.

Run 'sitegen-sitemap gen-config' to print a documented sitemap.toml.")]
#[command(version)]
struct Cli {
    /// Site root to scan
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (defaults to <root>/sitemap.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the output file (relative to the root)
    #[arg(long, global = true)]
    output: Option<String>,

    /// Override the base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the site and write the sitemap (the default)
    Generate,
    /// Scan the site and list the URLs without writing anything
    Check {
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock sitemap.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = initialize_logging(&cli) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(mut cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.take().unwrap_or(Command::Generate) {
        Command::Generate => {
            let site_config = resolve_config(&cli)?;
            let report = generate::generate(&cli.root, &site_config)?;
            output::print_generate_output(&report);
        }
        Command::Check { json } => {
            let site_config = resolve_config(&cli)?;
            let document = generate::build_document(&cli.root, &site_config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(document.entries())?);
            } else {
                output::print_check_output(&document);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the root's config and apply the CLI overrides on top.
fn resolve_config(cli: &Cli) -> Result<config::SitemapConfig, config::ConfigError> {
    config::load_config(&cli.root, cli.config.as_deref())?
        .with_overrides(cli.base_url.clone(), cli.output.clone())
}

fn initialize_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
