//! Sequential supervisor over specialized agents.

use std::sync::Arc;

use crate::core_types::AgentResult;
use crate::llm::ChatClient;
use crate::react::ReActAgent;
use crate::tools::ToolRegistry;
use crate::trace::TraceSink;

/// Default iteration budget for supervisors. Coordinating several sub-agents
/// with retries needs more turns than a single specialist run.
pub const SUPERVISOR_MAX_ITERATIONS: usize = 30;

/// A coordinator agent whose entire tool table is delegation tools. The
/// supervisor parses the user request, plans, and hands sub-tasks to its
/// specialists one at a time; each delegation runs a full sub-agent loop to
/// completion before the supervisor sees the `SUCCESS:`/`FAILED:` outcome
/// and decides the next step.
pub struct Supervisor {
    agent: ReActAgent,
}

impl Supervisor {
    /// `sub_agents` is a list of `(tool_name, description, agent)` triples;
    /// each becomes a delegation tool in the coordinator's tool table.
    pub fn new(
        name: impl Into<String>,
        system_prompt: impl Into<String>,
        llm: Arc<dyn ChatClient>,
        model: impl Into<String>,
        sub_agents: Vec<(String, String, ReActAgent)>,
    ) -> Self {
        let mut registry = ToolRegistry::new();
        for (tool_name, description, agent) in sub_agents {
            registry.register_tool(Arc::new(crate::agents::SubAgentTool::new(
                tool_name,
                description,
                agent,
            )));
        }

        let agent = ReActAgent::new(name, system_prompt, llm, registry.into_map(), model)
            .with_max_iterations(SUPERVISOR_MAX_ITERATIONS);

        Self { agent }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.agent = self.agent.with_max_iterations(max_iterations);
        self
    }

    pub fn with_trace_sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.agent = self.agent.with_trace_sink(sink);
        self
    }

    pub async fn run(&mut self, user_request: &str) -> AgentResult {
        log::info!("Supervisor processing request: {}", user_request);
        self.agent.run(user_request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{tool_map, ScriptedClient};

    fn specialist(name: &str, responses: Vec<String>) -> ReActAgent {
        ReActAgent::new(
            name,
            "You are a specialist.",
            Arc::new(ScriptedClient::with_responses(responses)),
            tool_map(vec![]),
            "deepseek-chat",
        )
    }

    #[tokio::test]
    async fn test_supervisor_delegates_then_summarizes() {
        let coordinator_client = Arc::new(ScriptedClient::with_responses(vec![
            "Thought: start with the structure\nAction: delegate_structure_expert\nAction Input: {\"task\": \"find the CIF file for MOR\"}".to_string(),
            "Thought: structure is ready\nFinal Answer: Status: SUCCESS. Structure file copied.".to_string(),
        ]));

        let structure_expert = specialist(
            "StructureExpert",
            vec!["Thought: found it\nFinal Answer: copied MOR.cif".to_string()],
        );

        let mut supervisor = Supervisor::new(
            "Supervisor",
            "You coordinate the experiment setup team.",
            coordinator_client.clone(),
            "deepseek-chat",
            vec![(
                "delegate_structure_expert".to_string(),
                "Delegate structure file finding to StructureExpert".to_string(),
                structure_expert,
            )],
        );

        let result = supervisor
            .run("Set up a CO2 adsorption isotherm in MOR")
            .await;

        assert!(result.success);
        assert!(result.answer.contains("SUCCESS"));
        assert_eq!(result.history.len(), 2);
        assert_eq!(
            result.history[0].observation.as_deref(),
            Some("SUCCESS: copied MOR.cif")
        );
        assert_eq!(coordinator_client.call_count(), 2);
    }

    #[tokio::test]
    async fn test_supervisor_sees_sub_agent_failure_and_continues() {
        let coordinator_client = Arc::new(ScriptedClient::with_responses(vec![
            "Thought: delegate\nAction: delegate_structure_expert\nAction Input: {\"task\": \"find it\"}".to_string(),
            "Thought: the specialist failed\nFinal Answer: Status: FAILURE. Structure lookup failed.".to_string(),
        ]));

        let structure_expert = specialist(
            "StructureExpert",
            vec!["Thought: no idea\nAction: nothing".to_string()],
        )
        .with_max_iterations(1);

        let mut supervisor = Supervisor::new(
            "Supervisor",
            "You coordinate the experiment setup team.",
            coordinator_client,
            "deepseek-chat",
            vec![(
                "delegate_structure_expert".to_string(),
                "Delegate structure file finding to StructureExpert".to_string(),
                structure_expert,
            )],
        );

        let result = supervisor.run("Set up an isotherm").await;

        // Delegation failure is an observation, not a supervisor failure.
        assert!(result.success);
        assert!(result.history[0]
            .observation
            .as_deref()
            .unwrap()
            .starts_with("FAILED:"));
    }

    #[tokio::test]
    async fn test_supervisor_without_sub_agents_still_answers() {
        let mut supervisor = Supervisor::new(
            "Supervisor",
            "You coordinate the experiment setup team.",
            Arc::new(ScriptedClient::with_responses(vec![
                "Thought: nothing to delegate\nFinal Answer: no work needed".to_string(),
            ])),
            "deepseek-chat",
            vec![],
        )
        .with_max_iterations(2);

        let result = supervisor.run("do nothing").await;
        assert!(result.success);
        assert_eq!(result.answer, "no work needed");
    }
}
