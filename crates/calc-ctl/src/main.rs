//! calc-ctl — command-line client for the distributed calculator orchestrator.

mod cmd;

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use calc_client::{CalcClient, HttpTransport};
use calc_core::CalcConfig;

use cmd::view::TerminalView;

fn print_usage(config: &CalcConfig) {
    println!("Usage: calc-ctl [--url <base-url>] <command>");
    println!();
    println!("Commands:");
    println!("  submit <expression>       Submit an expression for calculation");
    println!("  get <id>                  Show one expression");
    println!("  list                      List all expressions");
    println!("  task fetch                Fetch a pending task (worker simulation)");
    println!("  task submit <id> <value>  Submit a task result (worker simulation)");
    println!("  stats                     Show operation statistics");
    println!("  watch                     Redraw operation statistics until Ctrl-C");
    println!();
    println!("Options:");
    println!(
        "  --url <base-url>   Orchestrator address (default: {})",
        config.server.base_url
    );
    println!();
    println!("Config file: {}", CalcConfig::file_path().display());
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = CalcConfig::write_default_if_missing() {
        tracing::warn!(error = %e, "failed to write default config");
    }
    let mut config = CalcConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load config, using defaults");
        CalcConfig::default()
    });

    let args: Vec<String> = std::env::args().skip(1).collect();

    // Parse --url option
    let mut remaining: Vec<&str> = Vec::new();
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--url" {
            i += 1;
            config.server.base_url = args
                .get(i)
                .context("--url requires a value")?
                .trim_end_matches('/')
                .to_string();
        } else {
            remaining.push(&args[i]);
        }
        i += 1;
    }

    if matches!(remaining.as_slice(), ["help"] | ["--help"] | ["-h"] | []) {
        print_usage(&config);
        return Ok(ExitCode::SUCCESS);
    }

    let transport = HttpTransport::new(&config.server).context("failed to set up HTTP client")?;
    tracing::debug!(base_url = transport.base_url(), "orchestrator");
    let client = CalcClient::new(transport, TerminalView, config.clone());

    let outcome = match remaining.as_slice() {
        ["submit", expression @ ..] if !expression.is_empty() => {
            cmd::expressions::cmd_submit(&client, &expression.join(" ")).await
        }
        ["get", id] => cmd::expressions::cmd_get(&client, id).await,
        ["get"] => cmd::expressions::cmd_get(&client, "").await,
        ["list"] => cmd::expressions::cmd_list(&client).await,
        ["task", "fetch"] => cmd::task::cmd_task_fetch(&client).await,
        ["task", "submit", id, result] => cmd::task::cmd_task_submit(&client, id, result).await,
        ["task", "submit", rest @ ..] if rest.len() < 2 => {
            let id = rest.first().copied().unwrap_or("");
            cmd::task::cmd_task_submit(&client, id, "").await
        }
        ["stats"] => cmd::stats::cmd_stats(&client).await,
        ["watch"] => cmd::stats::cmd_watch(&client).await,
        other => {
            eprintln!("Unknown command: {}", other.join(" "));
            eprintln!();
            print_usage(&config);
            return Ok(ExitCode::FAILURE);
        }
    }?;

    Ok(outcome.into())
}
