//! Multi-agent composition.
//!
//! Higher-level workflows combine specialized agents by strictly sequential
//! delegation: a supervisor agent runs its own ReAct loop whose tools are
//! other agents wrapped behind the `Tool` interface. Each delegation blocks
//! until the sub-agent's run finishes; there is never concurrent sub-agent
//! execution.

pub mod delegation;
pub mod supervisor;

pub use delegation::SubAgentTool;
pub use supervisor::Supervisor;
