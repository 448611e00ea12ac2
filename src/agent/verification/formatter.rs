//! Deterministic summary text, used when no model summary is available.

use crate::{
    agent::{
        planning::Plan,
        types::{CompletionCheck, StepResult, StepStatus},
    },
    tools::{ToolOutput, ToolResult},
};

pub const FALLBACK_NOTE: &str = "(Using fallback formatter - language model unavailable)";

const LISTED_ITEMS: usize = 3;

/// Degree suffix for an OpenWeather `units` value.
pub fn temperature_unit(units: &str) -> &'static str {
    match units {
        "metric" => "°C",
        "imperial" => "°F",
        _ => "K",
    }
}

/// Builds the plain-text summary of a run.
pub fn format_summary(plan: &Plan, results: &[StepResult], completion: &CompletionCheck) -> String {
    let mut lines = vec![format!("Task: {}", plan.task), "\nResults:".to_string()];

    for result in results {
        lines.push(format!(
            "\nStep {}: {} [{}]",
            result.step_number, result.description, result.status
        ));

        if result.status != StepStatus::Completed {
            continue;
        }
        match &result.result {
            Some(ToolResult::Success(output)) => push_output_lines(&mut lines, output),
            Some(ToolResult::Error(failure)) => lines.push(format!("  Error: {}", failure.error)),
            None => {}
        }
    }

    lines.push(format!(
        "\n\nCompletion: {}/{} steps",
        completion.successful_steps, completion.expected_steps
    ));
    lines.join("\n")
}

fn push_output_lines(lines: &mut Vec<String>, output: &ToolOutput) {
    match output {
        ToolOutput::Repositories(search) => {
            if search.count == 0 {
                return;
            }
            lines.push(format!("  Found {} items:", search.count));
            for repo in search.results.iter().take(LISTED_ITEMS) {
                lines.push(format!("    - {}: {} stars", repo.name, repo.stars));
            }
        }
        ToolOutput::Weather(report) => {
            lines.push(format!(
                "  {}: {}{}, {}",
                report.city,
                report.weather.temperature,
                temperature_unit(&report.units),
                report.weather.description
            ));
        }
        ToolOutput::Forecast(forecast) => {
            let unit = temperature_unit(&forecast.units);
            lines.push(format!(
                "  {}: {} forecast entries",
                forecast.city,
                forecast.forecasts.len()
            ));
            for entry in forecast.forecasts.iter().take(LISTED_ITEMS) {
                lines.push(format!(
                    "    - {}: {}{}, {}",
                    entry.datetime, entry.temperature, unit, entry.description
                ));
            }
        }
        ToolOutput::User(profile) => {
            let user = &profile.user;
            lines.push(format!(
                "  {}: {} public repos, {} followers",
                user.login, user.public_repos, user.followers
            ));
        }
    }
}
