//! Deterministic keyword planner used whenever the model path is unavailable
//! or returns something unusable.
//!
//! Matching is case-insensitive substring matching over fixed lists, scanned
//! in list order, so the same task text always yields the same plan.

use serde_json::{Map, Value, json};
use tracing::info;

use crate::{
    agent::planning::{Plan, Step},
    error::agent_error::AgentError,
    tools::{NO_TOOL, github::GITHUB_SEARCH_TOOL, weather::WEATHER_TOOL},
    utils::string_util::title_case,
};

pub const SUCCESS_CRITERIA: &str = "All steps executed successfully";

const REPOSITORY_KEYWORDS: &[&str] = &[
    "github",
    "repository",
    "repo",
    "python",
    "javascript",
    "java",
    "go",
    "rust",
    "node",
    "libraries",
    "frameworks",
    "repositories",
];

// "javascript" is listed before "java" so the longer name wins.
const LANGUAGE_KEYWORDS: &[&str] = &[
    "python",
    "javascript",
    "java",
    "go",
    "rust",
    "typescript",
    "c++",
    "php",
    "ruby",
];

const KNOWN_CITIES: &[&str] = &[
    "london",
    "paris",
    "tokyo",
    "new york",
    "san francisco",
    "berlin",
    "sydney",
    "toronto",
    "dubai",
    "singapore",
    "mumbai",
    "moscow",
    "bangkok",
    "los angeles",
    "chicago",
    "seattle",
    "amsterdam",
    "barcelona",
    "madrid",
];

const DEFAULT_SEARCH_QUERY: &str = "stars:>10000 sort:stars";
const SEARCH_MAX_RESULTS: u64 = 5;

/// Builds a plan from keyword matches alone. A task that matches nothing,
/// blank ones included, gets a single informational step.
pub fn plan_for(task: &str) -> Result<Plan, AgentError> {
    info!("Using rule-based fallback planner");

    let task_lower = task.to_lowercase();
    let mut steps = Vec::new();

    if mentions_repositories(&task_lower) {
        let query = search_query(&task_lower);
        steps.push(Step::new(
            steps.len() + 1,
            format!("Search GitHub for: {query}"),
            GITHUB_SEARCH_TOOL,
            params(json!({"query": query, "max_results": SEARCH_MAX_RESULTS})),
            "List of matching repositories with stars and descriptions",
        ));
    }

    for city in cities_in(&task_lower) {
        steps.push(Step::new(
            steps.len() + 1,
            format!("Get current weather in {city}"),
            WEATHER_TOOL,
            params(json!({"city": city, "units": "metric"})),
            format!("Current weather conditions for {city}"),
        ));
    }

    if steps.is_empty() {
        steps.push(Step::new(
            1,
            "Analyze task and provide information",
            NO_TOOL,
            Map::new(),
            "Task analysis and recommendations",
        ));
    }

    let plan = Plan {
        task: task.to_string(),
        objective: format!("Complete: {task}"),
        steps,
        success_criteria: SUCCESS_CRITERIA.to_string(),
    };
    plan.validate()?;

    info!(steps = plan.steps.len(), "Generated rule-based plan");
    Ok(plan)
}

fn mentions_repositories(task_lower: &str) -> bool {
    REPOSITORY_KEYWORDS
        .iter()
        .any(|keyword| task_lower.contains(keyword))
}

/// Search query for the first language keyword found in the task.
pub fn search_query(task_lower: &str) -> String {
    let Some(language) = LANGUAGE_KEYWORDS
        .iter()
        .find(|keyword| task_lower.contains(*keyword))
    else {
        return DEFAULT_SEARCH_QUERY.to_string();
    };

    if task_lower.contains("framework") {
        format!("language:{language} topic:framework")
    } else if task_lower.contains("library") {
        format!("language:{language} topic:library")
    } else {
        format!("language:{language} stars:>1000")
    }
}

/// Known cities mentioned in the task, title-cased, in list order.
pub fn cities_in(task_lower: &str) -> Vec<String> {
    KNOWN_CITIES
        .iter()
        .filter(|city| task_lower.contains(*city))
        .map(|city| title_case(city))
        .collect()
}

fn params(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_repo_task_yields_single_search_step() {
        let plan = plan_for("Find top 3 Python repos with most stars").unwrap();
        assert_eq!(plan.steps.len(), 1);

        let step = &plan.steps[0];
        assert_eq!(step.step_number, Some(1));
        assert_eq!(step.tool, GITHUB_SEARCH_TOOL);
        assert_eq!(step.params["query"], "language:python stars:>1000");
        assert_eq!(step.params["max_results"], 5);
    }

    #[test]
    fn two_cities_yield_two_weather_steps_in_list_order() {
        let plan = plan_for("Weather in Paris and London").unwrap();
        assert_eq!(plan.steps.len(), 2);
        assert_eq!(plan.steps[0].step_number, Some(1));
        assert_eq!(plan.steps[0].params["city"], "London");
        assert_eq!(plan.steps[1].step_number, Some(2));
        assert_eq!(plan.steps[1].params["city"], "Paris");
        assert!(plan.steps.iter().all(|s| s.tool == WEATHER_TOOL));
        assert!(plan.steps.iter().all(|s| s.params["units"] == "metric"));
    }

    #[test]
    fn search_step_comes_before_weather_steps() {
        let plan =
            plan_for("Find the top Rust frameworks and tell me the weather in San Francisco")
                .unwrap();
        let tools: Vec<&str> = plan.steps.iter().map(|s| s.tool.as_str()).collect();
        assert_eq!(tools, vec![GITHUB_SEARCH_TOOL, WEATHER_TOOL]);
        assert_eq!(plan.steps[0].params["query"], "language:rust topic:framework");
        assert_eq!(plan.steps[1].params["city"], "San Francisco");
        assert_eq!(plan.steps[1].step_number, Some(2));
    }

    #[test]
    fn unmatched_task_yields_single_no_tool_step() {
        let plan = plan_for("Tell me a joke about databases").unwrap();
        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.steps[0].tool, NO_TOOL);
        assert_eq!(plan.steps[0].step_number, Some(1));
        assert!(plan.steps[0].params.is_empty());
    }

    #[test]
    fn objective_and_criteria_are_synthesized() {
        let plan = plan_for("Weather in Tokyo").unwrap();
        assert_eq!(plan.task, "Weather in Tokyo");
        assert_eq!(plan.objective, "Complete: Weather in Tokyo");
        assert_eq!(plan.success_criteria, SUCCESS_CRITERIA);
    }

    #[test]
    fn planning_is_deterministic() {
        let task = "Compare javascript libraries and weather in Berlin, Tokyo and Madrid";
        assert_eq!(plan_for(task).unwrap(), plan_for(task).unwrap());
    }

    #[test]
    fn query_selection_rules() {
        assert_eq!(search_query("best javascript library"), "language:javascript topic:library");
        assert_eq!(search_query("java frameworks"), "language:java topic:framework");
        assert_eq!(search_query("popular repositories"), DEFAULT_SEARCH_QUERY);
    }

    #[test]
    fn city_matches_are_deduplicated_by_the_list() {
        assert_eq!(cities_in("london, london and london"), vec!["London"]);
        assert_eq!(cities_in("new york vs los angeles"), vec!["New York", "Los Angeles"]);
    }

    #[test]
    fn blank_task_yields_single_no_tool_step() {
        for task in ["", "   "] {
            let plan = plan_for(task).unwrap();
            assert_eq!(plan.steps.len(), 1);
            assert_eq!(plan.steps[0].tool, NO_TOOL);
            assert_eq!(plan.task, task);
        }
    }

    #[test]
    fn go_matches_inside_other_words() {
        let plan = plan_for("Recommend a good book").unwrap();
        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.steps[0].tool, GITHUB_SEARCH_TOOL);
        assert_eq!(plan.steps[0].params["query"], "language:go stars:>1000");

        let plan = plan_for("Weather in Chicago").unwrap();
        let tools: Vec<&str> = plan.steps.iter().map(|s| s.tool.as_str()).collect();
        assert_eq!(tools, vec![GITHUB_SEARCH_TOOL, WEATHER_TOOL]);
        assert_eq!(plan.steps[1].params["city"], "Chicago");
    }
}
