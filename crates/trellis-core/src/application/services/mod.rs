//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate a project" or "list blueprints".

pub mod blueprint_service;
pub mod nested_guard;
pub mod scaffold_service;

pub use blueprint_service::{BlueprintInfo, BlueprintResolver};
pub use nested_guard::{DEFAULT_MARKER, NestedProjectGuard};
pub use scaffold_service::{GenerationRequest, ScaffoldService};
