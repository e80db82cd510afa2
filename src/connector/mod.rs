//! Connector module.
//!
//! This module provides the local connector and the message exchanges it
//! performs with peers.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Connector`] | Shared handle performing exchanges |
//! | [`ConnectorBuilder`] | Fluent configuration builder |
//! | [`ConnectorOptions`] | Identity and messaging options |
//! | [`DescriptionOutcome`] | Result of a description exchange |
//! | [`ArtifactOutcome`] | Result of an artifact exchange |
//! | [`ExchangeFailure`] | Failure of any exchange |
//!
//! # Exchange Flow
//!
//! ```text
//! send request ──► classify response ──► extract payload ──► parse (optional)
//!      │                  │                     │                   │
//!  MessageSend      Passthrough /         InvalidResponse     raw fallback /
//!                  InvalidResponse                           InvalidResponse /
//!                                                               Internal
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Artifact exchange.
mod artifact;

/// Fluent builder pattern for connector configuration.
pub mod builder;

/// Core connector handle.
pub mod core;

/// Description exchange.
mod description;

/// Connector identity and messaging options.
pub mod options;

/// Exchange outcomes and failures.
pub mod outcome;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ConnectorBuilder;
pub use self::core::Connector;
pub use options::ConnectorOptions;
pub use outcome::{ArtifactOutcome, DescriptionOutcome, ExchangeFailure};
