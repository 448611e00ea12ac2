use opsagent::{AppConfig, Coordinator, cli::render};

#[tokio::main]
async fn main() -> opsagent::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let task = std::env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    let task = if task.is_empty() {
        "Find the top 5 Python repositories on GitHub with the most stars and get the current weather in San Francisco".to_string()
    } else {
        task
    };

    let config = AppConfig::from_env()?;
    let coordinator = Coordinator::from_config(&config)?;

    let outcome = coordinator.process(&task).await;
    println!("{}", render::banner(&task));
    println!("{}", render::render_outcome(&outcome)?);
    Ok(())
}
