use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::agent::types::StepResult;

/// Results of the steps run so far, keyed `step_<n>`.
///
/// Grows monotonically while a plan runs. No tool reads it back yet.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionContext {
    entries: BTreeMap<String, StepResult>,
}

impl ExecutionContext {
    pub fn key_for(step_number: usize) -> String {
        format!("step_{step_number}")
    }

    pub fn record(&mut self, result: StepResult) {
        self.entries
            .insert(Self::key_for(result.step_number), result);
    }

    pub fn get(&self, step_number: usize) -> Option<&StepResult> {
        self.entries.get(&Self::key_for(step_number))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
