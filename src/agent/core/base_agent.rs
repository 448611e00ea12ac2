/// Status surface shared by the pipeline components.
pub trait AgentBehavior: Send + Sync {
    /// Short, stable component name.
    fn name(&self) -> &str;

    fn is_healthy(&self) -> bool {
        true
    }

    /// Status snapshot for health checks and the CLI.
    fn get_status(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name(),
            "healthy": self.is_healthy()
        })
    }
}
