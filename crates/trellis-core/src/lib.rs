//! Trellis Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Trellis
//! project scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           trellis-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ScaffoldService, BlueprintResolver,    │
//! │  NestedProjectGuard)                    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, BlueprintStore, Renderer,  │
//! │  ManifestWriter)                        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    trellis-adapters (Infrastructure)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (NameValidator, DirectoryResolver,      │
//! │  Blueprint, ProjectStructure)           │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trellis_core::prelude::*;
//!
//! let service = ScaffoldService::new(store, renderer, filesystem);
//! let request = GenerationRequest::new("my-app", "default", std::env::current_dir()?)
//!     .with_options(GenerationOptions::new().with_dry_run(true));
//! let result = service.generate(request)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BlueprintInfo, BlueprintResolver, GenerationRequest, NestedProjectGuard, ScaffoldService,
        ports::{BlueprintStore, Filesystem, ManifestWriter, TemplateRenderer},
    };
    pub use crate::domain::{
        Blueprint, BlueprintMetadata, FileCategory, GenerationOptions, GenerationResult,
        GenerationStage, NameValidator, ProjectIdentity, RenderContext,
    };
    pub use crate::error::{TrellisError, TrellisResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
