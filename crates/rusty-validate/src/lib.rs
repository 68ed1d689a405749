// Rusty-Validate - attribute-driven form validation
// Fields declare their rules in attributes; the engine looks them up in a
// registry, runs them in order and hands the outcomes to a renderer.

mod builtins;

pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod gating;
pub mod lang;
pub mod memory;
pub mod registry;
pub mod render;
pub mod report;
pub mod rule;
pub mod rule_list;
pub mod session;

// Engine and its configuration
pub use config::{AttributeNames, Options};
pub use engine::Engine;
pub use lang::Lang;
pub use registry::RuleRegistry;

// Rules
pub use rule::{
    AsyncValidator, Modifier, RuleContext, RuleDefinition, Trigger, Validator, Verdict,
};

// Host contracts
pub use field::{effective_value, FieldAdapter, FieldKind, FileHandle, FormAdapter};
pub use memory::{MemoryField, MemoryFile, MemoryForm};
pub use render::{
    LifecycleEvent, MessageRenderer, NoopRenderer, RecordingRenderer, RenderEvent, RuleOutcome,
};

// Results and errors
pub use error::{DecodeError, EngineError, RuleKind};
pub use gating::Gate;
pub use report::{FieldReport, FormReport, PassState};
pub use session::{FieldState, Session};

// Re-export the pure validators
pub use rusty_validate_core;
