//! domain-recon — WHOIS + DNS lookup for a single domain.
//!
//! One-shot with `--domain`, interactive prompt without it. Every run writes
//! `<domain>.csv` and `<domain>.json` into the output directory.

mod args;
mod render;

use std::process::ExitCode;

use anyhow::Result;
use args::{Cli, OutputFormat};
use clap::Parser;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};
use domain_recon_core::{export, ReconService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout stays clean for report output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let domain = match cli.domain {
        Some(domain) => domain,
        None => prompt_for_domain()?,
    };

    let report = ReconService::run(&domain, cli.nameserver.as_deref()).await?;

    match cli.format.unwrap_or_default() {
        OutputFormat::Pretty => print!("{}", render::render_pretty(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    let (csv_path, json_path) = export::write_all(&report, &cli.out_dir)?;
    println!();
    println!("{} {}", "Saved".green().bold(), csv_path.display());
    println!("{} {}", "Saved".green().bold(), json_path.display());

    Ok(())
}

fn prompt_for_domain() -> Result<String> {
    let domain: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Domain to look up")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("domain must not be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(domain)
}
