mod analyzer;
mod backend;
mod commands;
mod config;
mod coordinator;
mod links;
mod model;
mod normalizer;
mod utils;
mod view;

use backend::HttpBackend;
use commands::{Outcome, Session, parse_command};
use config::{AppConfig, load_config};
use coordinator::RequestCoordinator;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use view::ChartReady;

#[tokio::main]
async fn main() {
    // Logs go to stderr, the results area owns stdout
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::var("PULL_SCOUT_CONFIG").unwrap_or_else(|_| "config.json".to_string());
    let config: Arc<AppConfig> = match load_config(&config_path) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let backend = match config.backend_url().map(HttpBackend::new) {
        Ok(Ok(backend)) => Arc::new(backend),
        Ok(Err(e)) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
        Err(e) => {
            error!("Config error: {}", e);
            return;
        }
    };

    // The chart renderer loads in the background; analysis panels wait for it
    let chart = ChartReady::load(config.chart_style_path.as_ref().map(PathBuf::from));

    let (completions_tx, completions_rx) = mpsc::unbounded_channel();
    let coordinator = RequestCoordinator::new(backend, chart, completions_tx);
    let session = Session::new(config.clone(), coordinator);

    info!("🚀 pull-scout started, backend {}", config.backend_url);
    run(session, completions_rx).await;
    info!("🛑 pull-scout stopped.");
}

/// Single event loop: user commands and finished requests are applied to the
/// session one at a time.
async fn run(mut session: Session, mut completions: mpsc::UnboundedReceiver<coordinator::Completion>) {
    draw(&session.view.draw());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        warn!("Failed to read input: {}", e);
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line).and_then(|command| session.handle_command(command)) {
                    Ok(Outcome::Redraw) => draw(&session.view.draw()),
                    Ok(Outcome::Table) => {
                        if let Some(panel) = session.view.analysis() {
                            info!("Re-sorted analysis for '{}'", panel.title());
                            draw(&panel.table());
                        }
                    }
                    Ok(Outcome::Print(text)) => println!("{}", text),
                    Ok(Outcome::Quit) => break,
                    Err(e) => println!("⚠️ {}", e),
                }
            }
            Some(completion) = completions.recv() => {
                RequestCoordinator::complete(&mut session.view, completion);
                draw(&session.view.draw());
            }
        }
    }
}

fn draw(text: &str) {
    println!("\n{}", text.trim_end());
}
