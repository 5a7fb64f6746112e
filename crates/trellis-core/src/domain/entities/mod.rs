pub mod blueprint;
pub mod common;
pub mod project_structure;
pub mod render_context;

pub use crate::domain::DomainError;
pub use blueprint::Blueprint;
pub use project_structure::ProjectStructure;
pub use render_context::RenderContext;
