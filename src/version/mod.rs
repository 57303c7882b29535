//! Version resolution layer for Hangar platform dependencies
//!
//! This module provides the core functionality for fetching, caching, matching and
//! translating platform versions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│    Cache    │◀────│  Resolver   │
//! │  (fetch)    │     │ (per key)   │     │ (per plat.) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                  │        │
//!        ▼                                  ▼        ▼
//! ┌─────────────┐                  ┌───────────┐ ┌───────────┐
//! │ Registries  │                  │  Matcher  │ │   Alias   │
//! │(mojang,fill)│                  │ (patterns)│ │  (tables) │
//! └─────────────┘                  └───────────┘ └───────────┘
//! ```
//!
//! # Modules
//!
//! - [`alias`]: Static upstream id -> platform id tables
//! - [`cache`]: In-memory candidate cache with single-flight fetches
//! - [`error`]: Error types for sources and resolution
//! - [`matcher`]: Pattern matching strategy chain
//! - [`range`]: Range expression parsing and evaluation
//! - [`registry`]: Source trait for fetching versions from upstreams
//! - [`registries`]: Concrete upstreams (Mojang manifest, Fill, alias tables)
//! - [`resolver`]: Per-platform orchestration
//! - [`semver`]: Version normalization and ordering

pub mod alias;
pub mod cache;
pub mod error;
pub mod matcher;
pub mod range;
pub mod registries;
pub mod registry;
pub mod resolver;
pub mod semver;
