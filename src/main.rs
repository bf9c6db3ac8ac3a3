//! CLI entry point for quixo.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use quixo::{HttpClient, HttpResponse, RequestDescription};
use tracing::debug;

mod cli;

use cli::{Args, Command, DownloadArgs, RequestArgs};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Logs go to stderr; stdout carries only response output.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let client = HttpClient::try_new().context("failed to initialize HTTP client")?;

    match args.command {
        Command::Request(request_args) => run_request(&client, &request_args).await,
        Command::Download(download_args) => run_download(&client, &download_args).await,
    }
}

async fn run_request(client: &HttpClient, args: &RequestArgs) -> Result<()> {
    let description = RequestDescription::new(args.url.as_str())
        .with_method(args.method.as_str())
        .with_headers(args.header_map());

    let response = client
        .request(&description, args.data.as_deref())
        .await
        .with_context(|| format!("{} {} failed", description.method(), args.url))?;

    let mut stdout = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &response)
            .context("failed to encode response as JSON")?;
        writeln!(stdout)?;
    } else {
        if args.include {
            write_head(&mut stdout, &response)?;
        }
        stdout.write_all(response.data.as_bytes())?;
    }
    stdout.flush()?;
    Ok(())
}

async fn run_download(client: &HttpClient, args: &DownloadArgs) -> Result<()> {
    let path = client
        .download_file(&args.url, &args.dest_dir, args.filename.as_deref())
        .await
        .with_context(|| format!("download of {} failed", args.url))?;

    println!("{}", path.display());
    Ok(())
}

/// Writes the status line and headers, followed by a blank line.
fn write_head(out: &mut impl Write, response: &HttpResponse) -> io::Result<()> {
    writeln!(out, "HTTP {}", response.status)?;
    for (name, values) in response.header_values() {
        for value in values {
            writeln!(out, "{name}: {value}")?;
        }
    }
    writeln!(out)
}
