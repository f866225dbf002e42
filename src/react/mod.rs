//! ReAct agent loop.
//!
//! The `ReActAgent` drives a language model through the
//! Thought -> Action -> Observation cycle until it emits a Final Answer or
//! exhausts its iteration budget. Each iteration rebuilds the full message
//! list (system prompt + task + replayed history), queries the chat client,
//! parses the completion, and either dispatches a tool or terminates.
//!
//! The failure policy is deliberate: chat-transport errors abort the run
//! immediately, while everything the model can plausibly correct on its own
//! (format mistakes, unknown tool names, tool failures) is folded into a
//! textual observation and fed back on the next turn, consuming iteration
//! budget rather than aborting.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::core_types::{AgentResult, Message, StepRecord};
use crate::errors::AgentError;
use crate::llm::ChatClient;
use crate::tools::Tool;
use crate::trace::{ToolInvocation, TraceSink, TraceStep};

pub mod parser;

pub use parser::{parse_response, ParsedResponse};

pub const DEFAULT_MAX_ITERATIONS: usize = 10;

const FORMAT_INSTRUCTIONS: &str = "\
You MUST follow this exact format:

Thought: <your reasoning about what to do next>
Action: <tool_name>
Action Input: <JSON object with tool parameters>

OR when you have the final answer:

Thought: <reasoning why you're done>
Final Answer: <your final response>

CRITICAL RULES:
1. Output EXACTLY one Thought followed by EXACTLY one Action OR Final Answer
2. Action Input MUST be valid JSON
3. Do not skip steps or combine multiple actions
4. If a tool fails, think about why and try a different approach";

pub struct ReActAgent {
    name: String,
    system_prompt: String,
    llm: Arc<dyn ChatClient>,
    tools: HashMap<String, Arc<dyn Tool>>,
    model: String,
    max_iterations: usize,
    trace: Option<Box<dyn TraceSink>>,
}

impl ReActAgent {
    pub fn new(
        name: impl Into<String>,
        system_prompt: impl Into<String>,
        llm: Arc<dyn ChatClient>,
        tools: HashMap<String, Arc<dyn Tool>>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
            llm,
            tools,
            model: model.into(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            trace: None,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_trace_sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.trace = Some(sink);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn run(&mut self, task: &str) -> AgentResult {
        self.run_with_context(task, None).await
    }

    /// Runs the loop to completion. `context` is caller bookkeeping only;
    /// the loop records it but never interprets it. Never returns an error:
    /// every failure mode is folded into the `AgentResult`.
    pub async fn run_with_context(&mut self, task: &str, context: Option<Value>) -> AgentResult {
        log::info!("[{}] Run started, task: {}", self.name, task);
        if let Some(ctx) = &context {
            log::debug!("[{}] Run context: {}", self.name, ctx);
        }

        let mut history: Vec<StepRecord> = Vec::new();

        for iteration in 1..=self.max_iterations {
            log::info!("[{}] Iteration {}", self.name, iteration);

            let messages = self.build_messages(task, &history);
            let response = match self.llm.chat(&self.model, &messages).await {
                Ok(response) => response,
                Err(e) => {
                    let error = format!("LLM call failed: {}", e);
                    log::error!("[{}] {}", self.name, error);
                    return self.finish(AgentResult::failed(error, history));
                }
            };
            let model_output = response.content;
            log::debug!("[{}] Model output:\n{}", self.name, model_output);

            match parse_response(&model_output) {
                ParsedResponse::FinalAnswer { thought, text } => {
                    log::info!("[{}] Final Answer after {} iteration(s)", self.name, iteration);
                    self.emit_step(TraceStep {
                        iteration,
                        thought: non_empty(thought),
                        action: None,
                        observation: None,
                    });
                    history.push(StepRecord {
                        model_output,
                        observation: None,
                    });
                    return self.finish(AgentResult::succeeded(text, history));
                }
                ParsedResponse::Action {
                    thought,
                    action,
                    action_input,
                } => {
                    log::info!(
                        "[{}] Action: {} {}",
                        self.name,
                        action,
                        action_input
                    );
                    let observation = self.dispatch(&action, action_input.clone()).await;
                    log::info!("[{}] Observation: {}", self.name, observation);
                    self.emit_step(TraceStep {
                        iteration,
                        thought: non_empty(thought),
                        action: Some(ToolInvocation {
                            name: action,
                            arguments: action_input,
                        }),
                        observation: Some(observation.clone()),
                    });
                    history.push(StepRecord {
                        model_output,
                        observation: Some(observation),
                    });
                }
                ParsedResponse::ParseError { thought, message } => {
                    log::warn!("[{}] Parse error: {}", self.name, message);
                    let observation =
                        format!("Parse Error: {}. Please follow the format exactly.", message);
                    self.emit_step(TraceStep {
                        iteration,
                        thought: non_empty(thought),
                        action: None,
                        observation: Some(observation.clone()),
                    });
                    history.push(StepRecord {
                        model_output,
                        observation: Some(observation),
                    });
                }
            }
        }

        let error = AgentError::MaxIterationsReached(self.max_iterations).to_string();
        log::warn!("[{}] {}", self.name, error);
        self.finish(AgentResult::failed(error, history))
    }

    /// Resolves the action name against the tool table and executes it.
    /// Unknown names and tool errors both become observations; neither
    /// aborts the run.
    async fn dispatch(&self, action: &str, action_input: Value) -> String {
        let tool = match self.tools.get(action) {
            Some(tool) => tool.clone(),
            None => {
                let mut names: Vec<&str> = self.tools.keys().map(|k| k.as_str()).collect();
                names.sort_unstable();
                return format!(
                    "Error: Tool '{}' not found. Available tools: [{}]",
                    action,
                    names.join(", ")
                );
            }
        };

        match tool.execute(action_input).await {
            Ok(result) => result,
            Err(e) => format!("Error executing {}: {}", action, e),
        }
    }

    fn build_messages(&self, task: &str, history: &[StepRecord]) -> Vec<Message> {
        let system_content = format!(
            "{}\n\nAvailable Tools:\n{}\n\n{}",
            self.system_prompt,
            self.render_tool_descriptions(),
            FORMAT_INSTRUCTIONS
        );

        let mut messages = vec![
            Message::system(system_content),
            Message::user(format!("Task: {}", task)),
        ];

        for entry in history {
            messages.push(Message::assistant(entry.model_output.clone()));
            if let Some(observation) = &entry.observation {
                messages.push(Message::user(format!("Observation: {}", observation)));
            }
        }

        messages
    }

    fn render_tool_descriptions(&self) -> String {
        let mut metadata: Vec<_> = self.tools.values().map(|tool| tool.metadata()).collect();
        metadata.sort_by(|a, b| a.name.cmp(&b.name));

        metadata
            .iter()
            .map(|meta| {
                let mut desc = format!("- {}: {}", meta.name, meta.description);
                if meta.parameters.as_object().is_some_and(|m| !m.is_empty()) {
                    desc.push_str(&format!("\n  Parameters: {}", meta.parameters));
                }
                desc
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn emit_step(&mut self, step: TraceStep) {
        if let Some(sink) = &mut self.trace {
            sink.on_step(&step);
        }
    }

    fn finish(&mut self, result: AgentResult) -> AgentResult {
        if let Some(sink) = &mut self.trace {
            sink.on_run_complete(&result);
        }
        result
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
