//! Command-line surface: single task, interactive loop, HTTP server, status.

pub mod render;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::warn;

use crate::{agents::Coordinator, error::Result, server, shared::AppConfig};

#[derive(Parser)]
#[command(name = "opsagent")]
#[command(about = "Plan, run and summarize multi-step operations tasks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand (if not provided, starts the interactive prompt)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process one task and print the result
    Run {
        /// Task text; words are joined with spaces
        #[arg(required = true)]
        task: Vec<String>,

        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Prompt for tasks until `quit` or `exit`
    Interactive,

    /// Serve the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },

    /// Show component status
    Status,
}

pub async fn execute(cli: Cli, mut config: AppConfig) -> Result<()> {
    for missing in config.missing_credentials() {
        warn!(credential = missing, "Credential not configured");
    }

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Run { task, json } => {
            let coordinator = Coordinator::from_config(&config)?;
            run_task(&coordinator, &task.join(" "), json).await
        }
        Commands::Interactive => {
            let coordinator = Coordinator::from_config(&config)?;
            interactive(&coordinator).await
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            server::serve(&config).await
        }
        Commands::Status => {
            let coordinator = Coordinator::from_config(&config)?;
            println!("{}", serde_json::to_string_pretty(&coordinator.status())?);
            Ok(())
        }
    }
}

async fn run_task(coordinator: &Coordinator, task: &str, json_only: bool) -> Result<()> {
    let outcome = coordinator.process(task).await;
    if json_only {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", render::banner(task));
        println!("{}", render::render_outcome(&outcome)?);
    }
    Ok(())
}

async fn interactive(coordinator: &Coordinator) -> Result<()> {
    println!("\n🤖 AI Operations Assistant - Interactive Mode");
    println!("{}", "=".repeat(70));
    println!("Type 'quit' or 'exit' to exit\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"Enter task: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            println!("\nGoodbye!");
            return Ok(());
        };
        let task = line.trim();

        if task.eq_ignore_ascii_case("quit") || task.eq_ignore_ascii_case("exit") {
            println!("Goodbye!");
            return Ok(());
        }
        if task.is_empty() {
            println!("Please enter a task");
            continue;
        }

        run_task(coordinator, task, false).await?;
    }
}
