mod input;
mod output;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use urania::{ApiResponse, AstroService, Endpoint};
use urania_config::{load_service_config, load_service_config_from};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// natal, synastry, composite, transit, chart-svg or interpretations.
    endpoint: Endpoint,

    /// Request bodies as JSON files. `-` or nothing reads one body from stdin.
    requests: Vec<PathBuf>,

    /// Service config (default: configs/urania.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: log::LevelFilter,

    /// Pretty-print response envelopes.
    #[arg(long)]
    pretty: bool,

    /// Write every generated chart image into this directory.
    #[arg(long)]
    save_svg: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level)
        .parse_default_env()
        .init();

    let config = match &args.config {
        Some(path) => load_service_config_from(path)?,
        None => load_service_config()?,
    };
    let service = Arc::new(AstroService::from_config(&config)?);

    let requests = if args.requests.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        args.requests.clone()
    };

    let mut handles = Vec::with_capacity(requests.len());
    for path in requests {
        let service = Arc::clone(&service);
        let endpoint = args.endpoint;
        let file = path.clone();
        // chart computation blocks on ephemeris file I/O
        let handle = tokio::task::spawn_blocking(move || match input::load_request(&file) {
            Ok(body) => service.handle(endpoint, &body),
            Err(rejected) => rejected,
        });
        handles.push((path, handle));
    }

    let mut failures = 0usize;
    for (path, handle) in handles {
        let response: ApiResponse = handle
            .await
            .with_context(|| format!("Worker for {} panicked", path.display()))?;
        if !response.success {
            failures += 1;
        }
        if let Some(dir) = &args.save_svg {
            for written in output::save_charts(&response, dir)? {
                log::info!("Saved {}", written.display());
            }
        }
        println!("{}", output::render_envelope(&response, args.pretty)?);
    }

    if failures > 0 {
        log::error!("{} request(s) failed", failures);
        std::process::exit(1);
    }
    Ok(())
}
