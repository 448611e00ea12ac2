//! Console rendering of a [`TaskOutcome`].

use std::fmt::Write;

use crate::{
    agent::{StepStatus, types::StepResult},
    agents::{CompletedTask, TaskOutcome},
    tools::{NO_TOOL, ToolOutput, ToolResult},
};

const RULE_WIDTH: usize = 70;

fn rule(ch: char) -> String {
    ch.to_string().repeat(RULE_WIDTH)
}

pub fn banner(task: &str) -> String {
    format!("\n{}\nTask: {task}\n{}\n", rule('='), rule('='))
}

fn status_icon(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Completed => "✓",
        StepStatus::Failed => "✗",
        StepStatus::Skipped | StepStatus::Error => "○",
    }
}

/// Human-readable sections followed by the full JSON document.
pub fn render_outcome(outcome: &TaskOutcome) -> Result<String, serde_json::Error> {
    let mut out = String::new();
    if let Some(completed) = outcome.completed() {
        render_sections(&mut out, completed);
    }

    let _ = writeln!(out, "📋 DETAILED RESULTS\n{}", rule('-'));
    out.push_str(&serde_json::to_string_pretty(outcome)?);
    Ok(out)
}

fn render_sections(out: &mut String, completed: &CompletedTask) {
    let plan = &completed.plan;
    let _ = writeln!(out, "📋 PLAN\n{}", rule('-'));
    let _ = writeln!(out, "Objective: {}\n\nSteps:", plan.objective);
    for (index, step) in plan.steps.iter().enumerate() {
        let number = step.step_number.unwrap_or(index + 1);
        let _ = writeln!(out, "  {number}. {}", step.description);
        if step.tool != NO_TOOL {
            let _ = writeln!(out, "     Tool: {}", step.tool);
        }
    }
    out.push('\n');

    let _ = writeln!(out, "⚙️  EXECUTION RESULTS\n{}", rule('-'));
    for result in &completed.execution.results {
        render_step(out, result);
    }
    out.push('\n');

    let answer = &completed.final_answer;
    let _ = writeln!(out, "📊 FINAL ANSWER\n{}", rule('-'));
    let _ = writeln!(
        out,
        "Completion Status: {}/{} steps",
        answer.completion.successful_steps, answer.completion.expected_steps
    );
    let _ = writeln!(out, "\nSummary:\n{}", answer.summary);
    if let Some(note) = &answer.note {
        let _ = writeln!(out, "{note}");
    }
    out.push('\n');
}

fn render_step(out: &mut String, result: &StepResult) {
    let _ = writeln!(
        out,
        "{} Step {}: {} [{}]",
        status_icon(result.status),
        result.step_number,
        result.description,
        result.status
    );

    if result.status != StepStatus::Completed {
        return;
    }
    match &result.result {
        Some(ToolResult::Success(output)) => {
            let _ = writeln!(out, "   Result: Success");
            if let ToolOutput::Repositories(search) = output {
                let _ = writeln!(out, "   Items found: {}", search.count);
            }
        }
        Some(ToolResult::Error(failure)) => {
            let _ = writeln!(out, "   Error: {}", failure.error);
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        agents::{Coordinator, PipelinePhase, PlanningFailure},
        tools::ToolRegistry,
    };

    #[tokio::test]
    async fn renders_all_sections_for_a_completed_task() {
        let coordinator = Coordinator::with_registry(None, ToolRegistry::new());
        let outcome = coordinator.process("Tell me something nice").await;

        let text = render_outcome(&outcome).unwrap();
        let plan_at = text.find("📋 PLAN").unwrap();
        let exec_at = text.find("EXECUTION RESULTS").unwrap();
        let answer_at = text.find("📊 FINAL ANSWER").unwrap();
        let json_at = text.find("📋 DETAILED RESULTS").unwrap();
        assert!(plan_at < exec_at && exec_at < answer_at && answer_at < json_at);

        assert!(text.contains("○ Step 1: Analyze task and provide information [skipped]"));
        assert!(text.contains("Completion Status: 1/1 steps"));
        assert!(!text.contains("Tool: none"));
    }

    #[test]
    fn planning_failure_renders_only_json() {
        let outcome = TaskOutcome::Error(PlanningFailure {
            phase: PipelinePhase::Planning,
            error: "planning failed: invalid plan: plan must have at least one step".to_string(),
        });

        let text = render_outcome(&outcome).unwrap();
        assert!(!text.contains("PLAN\n"));
        assert!(text.contains("\"phase\": \"planning\""));
    }
}
