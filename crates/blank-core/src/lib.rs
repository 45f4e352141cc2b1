//! Blank Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the `blank`
//! config patch engine, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            blank-cli (CLI)              │
//! │     (Builds PatchSpecs from argv)       │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (UpdateService)              │
//! │   load target → merge → encode bytes    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (Driven: DocumentCodec, FileReader) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     blank-adapters (Infrastructure)     │
//! │   (SerdeCodec, LocalFilesystem, etc)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (Document, DocumentPath, MergeStrategy) │
//! │              No I/O                     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blank_core::{
//!     application::{UpdateRequest, UpdateService},
//!     domain::{Format, PatchSpec, StrategyFlag},
//! };
//!
//! // 1. Describe the patches, in the order they must be applied
//! let specs = vec![
//!     PatchSpec::new([StrategyFlag::Merge], "/a", "2"),
//!     PatchSpec::new([StrategyFlag::Append], "/b", "[3]"),
//! ];
//!
//! // 2. Run the pipeline (with injected adapters)
//! let service = UpdateService::new(codec, reader);
//! let bytes = service.run("config.json", None, Some(Format::Json), &specs).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        UpdateRequest, UpdateService,
        ports::{DocumentCodec, FileReader},
    };
    pub use crate::domain::{
        Document, DocumentPath, Format, FragmentRef, Key, Mapping, MergeStrategy, PatchSource,
        PatchSpec, Scalar, SearchPath, StrategyFlag, Target,
    };
    pub use crate::error::{BlankError, BlankResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
