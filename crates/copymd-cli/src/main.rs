//! copymd - convert HTML to Markdown from the command line

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use copymd::{parse_html_with_options, ConvertOptions, CopyMode, CopyService, CopyStatus, Settings, WriterSink};

#[derive(Parser)]
#[command(name = "copymd")]
#[command(version, about = "Convert HTML to Markdown", long_about = None)]
#[command(after_help = "EXAMPLES:
    copymd page.html                Print page.html as Markdown
    curl -s URL | copymd            Read HTML from stdin
    copymd --mode quote reply.html  Print as a quoted block")]
struct Cli {
    /// HTML file to convert, `-` or nothing for stdin
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output shape: markdown, quote or code
    #[arg(short, long, default_value_t = CopyMode::Markdown)]
    mode: CopyMode,

    /// Deepest element nesting to accept
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Keep buttons, toolbars and other message chrome
    #[arg(long)]
    no_prune: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(CopyStatus::Copied) => ExitCode::SUCCESS,
        Ok(status) => {
            eprintln!("{status}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<CopyStatus> {
    let html = read_input(cli.input.as_ref())?;

    let mut convert = ConvertOptions::default();
    if let Some(max_depth) = cli.max_depth {
        convert.max_depth = max_depth;
    }
    let root = parse_html_with_options(&html, &convert)?;
    let service = CopyService::with_settings(Settings {
        enabled: true,
        mode: cli.mode,
        convert,
    });

    let mut sink = WriterSink::new(io::stdout().lock());
    let status = if cli.no_prune {
        service.copy(&root, &mut sink)?
    } else {
        service.copy_message(&root, &mut sink)?
    };
    tracing::info!(%status, mode = %cli.mode, "done");
    Ok(status)
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        _ => {
            let mut html = String::new();
            io::stdin()
                .read_to_string(&mut html)
                .context("failed to read stdin")?;
            Ok(html)
        }
    }
}
