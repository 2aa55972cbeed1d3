#![windows_subsystem = "windows"]
use std::io::{self, BufRead, Write};
use std::panic::AssertUnwindSafe;
use std::path::Path;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod context;
mod error;
mod model;
mod protocol;
mod services;

use config::AppConfig;
use context::AppContext;

fn main() {
    // stdout carries the protocol, logs go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .try_init();

    let cfg = AppConfig::load_or_default(Path::new(config::CONFIG_FILE));
    let mut ctx = match AppContext::open(&cfg) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!(error = %e, "failed to start");
            return;
        }
    };
    info!("lingo-core ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => continue,
        };

        if line.trim().is_empty() {
            continue;
        }

        let result = std::panic::catch_unwind(AssertUnwindSafe(|| protocol::handle(&mut ctx, &line)));

        let response = match result {
            Ok(resp) => resp,
            Err(_) => serde_json::json!({
                "status": "error",
                "message": "internal core error"
            })
            .to_string(),
        };

        if writeln!(stdout, "{response}").is_err() {
            break;
        }

        let _ = stdout.flush();
    }

    ctx.close();
}
