use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use colored::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;

use cli::Cli;
use gsop::OutputFormat;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.config();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_ansi(cli.ansi_logs()))
        .with(EnvFilter::from_default_env().add_directive(cli.log_level().into()))
        .init();

    if !config.color {
        colored::control::set_override(false);
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".bright_red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &gsop::Config) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Keep stdout machine-readable in JSON mode
    let prompts: Box<dyn Write> = match config.format {
        OutputFormat::Text => Box::new(io::stdout()),
        OutputFormat::Json => Box::new(io::stderr()),
    };

    gsop::run(config, stdin.lock(), prompts, &mut out)?;
    out.flush()?;
    Ok(())
}
