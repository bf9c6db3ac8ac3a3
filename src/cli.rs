//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use quixo::{DEFAULT_METHOD, Headers};

/// Issue HTTP(S) requests and download files.
///
/// Quixo sends one request per invocation with no redirects, retries or
/// timeouts, and prints what the server sent back.
#[derive(Parser, Debug)]
#[command(name = "quixo")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a request and print the response body
    Request(RequestArgs),
    /// Download a file into a directory and print its path
    Download(DownloadArgs),
}

#[derive(ClapArgs, Debug)]
pub struct RequestArgs {
    /// Absolute URL to request
    pub url: String,

    /// HTTP method
    #[arg(short = 'X', long, default_value = DEFAULT_METHOD)]
    pub method: String,

    /// Request header, as "Name: value" (repeatable)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request body
    #[arg(short, long)]
    pub data: Option<String>,

    /// Print the status line and response headers before the body
    #[arg(short, long, conflicts_with = "json")]
    pub include: bool,

    /// Print status, headers and body as a JSON object
    #[arg(long)]
    pub json: bool,
}

impl RequestArgs {
    /// Headers collected into the library's mapping; later flags win.
    pub fn header_map(&self) -> Headers {
        self.headers.iter().cloned().collect()
    }
}

#[derive(ClapArgs, Debug)]
pub struct DownloadArgs {
    /// Absolute URL of the file
    pub url: String,

    /// Destination directory (created if missing)
    #[arg(default_value = ".")]
    pub dest_dir: PathBuf,

    /// File name to save as, instead of the URL's last path segment
    #[arg(short = 'o', long)]
    pub filename: Option<String>,
}

/// Parses a `Name: value` header flag.
fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected \"Name: value\", got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing header name in {raw:?}"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
