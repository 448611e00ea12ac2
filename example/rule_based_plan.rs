use opsagent::agent::Planner;

#[tokio::main]
async fn main() {
    let planner = Planner::rule_based();

    let tasks = [
        "Find top 3 Python repos with most stars",
        "Weather in London and Paris",
        "Find the top Rust frameworks and tell me the weather in San Francisco",
        "Tell me a joke about databases",
    ];

    for task in tasks {
        match planner.generate(task).await {
            Ok(plan) => match serde_json::to_string_pretty(&plan) {
                Ok(json) => println!("{task}\n{json}\n"),
                Err(e) => eprintln!("{task}: {e}"),
            },
            Err(e) => eprintln!("{task}: {e}"),
        }
    }
}
