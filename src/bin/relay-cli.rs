use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Client CLI for the image relay", long_about = None)]
struct Cli {
    /// Relay endpoint.
    #[arg(short, long, default_value = "http://localhost:8080")]
    relay: String,

    /// Shared secret, when the relay has one configured.
    #[arg(short, long)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the full image and write raw bytes to stdout
    Get { url: String },
    /// Fetch the first ~16 KiB and write raw bytes to stdout
    Get16kb { url: String },
    /// Fetch the full image as a base64 JSON envelope
    Base64 { url: String },
    /// Fetch the first ~16 KiB as a base64 JSON envelope
    #[command(name = "base64-16kb")]
    Base64Preview { url: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let (action, url, raw) = match &cli.command {
        Commands::Get { url } => ("get", url, true),
        Commands::Get16kb { url } => ("get16kb", url, true),
        Commands::Base64 { url } => ("base64", url, false),
        Commands::Base64Preview { url } => ("base64_16kb", url, false),
    };

    let mut body = json!({ "action": action, "url": url });
    if let Some(key) = &cli.key {
        body["api_key"] = json!(key);
    }

    let res = client.post(&cli.relay).json(&body).send().await?;
    let status = res.status();

    if raw && status.is_success() {
        let bytes = res.bytes().await?;
        use std::io::Write;
        std::io::stdout().write_all(&bytes)?;
        return Ok(());
    }

    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
    }
    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
