//! Health check command - checks a running Notelock server.

use std::time::Duration;

use crate::cli::HealthArgs;
use crate::output::OutputFormat;

/// Run the health check command
pub async fn run(args: &HealthArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let url = format!("http://{}:{}/health", args.host, args.port);
    let timeout = Duration::from_secs(args.timeout);

    let client = reqwest::Client::builder().timeout(timeout).build()?;

    match client.get(&url).send().await {
        Ok(response) if response.status().is_success() => {
            let body: serde_json::Value = response.json().await?;
            let status = body.get("status").and_then(|s| s.as_str()).unwrap_or("");
            if status != "healthy" {
                eprintln!("unhealthy: server returned status {status}");
                std::process::exit(1);
            }
            match format {
                OutputFormat::Json => println!("{body}"),
                OutputFormat::Human => {
                    let notes = body.get("notes").and_then(|n| n.as_u64()).unwrap_or(0);
                    let backend = body.get("backend").and_then(|b| b.as_str()).unwrap_or("?");
                    println!("healthy: {notes} notes ({backend} store)");
                }
            }
            Ok(())
        }
        Ok(response) => {
            eprintln!(
                "unhealthy: server returned HTTP status {}",
                response.status()
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("unhealthy: failed to connect to {url}: {e}");
            std::process::exit(1);
        }
    }
}
