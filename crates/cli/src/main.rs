mod commands;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{Shell, generate};
use docnav_generator::OutputFormat;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docnav")]
#[command(version, about = "Navigation and sidebar builder for documentation sites", long_about = None)]
struct Cli {
    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Initialize a new site with docnav.toml and starter pages
    Init {
        /// Path to create the site in
        path: PathBuf,

        /// Overwrite an existing docnav.toml
        #[arg(long)]
        force: bool,
    },

    /// Validate routes, navigation and sidebars against the content tree
    Validate {
        /// Path to site directory
        path: PathBuf,
    },

    /// Validate and write the theme config for the site generator
    Build {
        /// Path to site directory
        path: PathBuf,

        /// Output directory (defaults to site.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: FormatArg,

        /// Rebuild whenever docnav.toml or the content changes
        #[arg(short, long)]
        watch: bool,
    },

    /// List registered routes
    Routes {
        /// Path to site directory
        path: PathBuf,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Ts,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Ts => OutputFormat::TypeScript,
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let config = ConfigBuilder::new()
        .add_filter_allow_str("docnav")
        .build();

    // Status output goes to stdout; diagnostics stay on stderr
    if let Err(e) = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("Failed to initialize logging: {}", e);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Init { path, force } => commands::init::run(path, force).await,
        Command::Validate { path } => commands::validate::run(path).await,
        Command::Build {
            path,
            output,
            format,
            watch,
        } => commands::build::run(path, output, format.into(), watch).await,
        Command::Routes { path } => commands::routes::run(path).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "docnav", &mut io::stdout());
            Ok(())
        }
    }
}
