//! # sentrykit
//!
//! Converge Sentry resources to a declared state through the REST API.
//!
//! This crate provides:
//! - A [`ResourceClient`] mapping every supported (kind, operation) pair to
//!   one HTTP call, with uniform [`OperationResult`] normalization
//! - Reconcilers for organizations, teams, projects, client keys and
//!   service hooks, behind the [`Reconcile`] trait
//! - A [`Transport`](transport::Transport) seam with a blocking HTTP
//!   implementation and a scripted mock
//!
//! ## Example
//!
//! ```no_run
//! use sentrykit::{ClientConfig, Reconcile, ResourceClient, TargetState, TeamSpec};
//!
//! let client = ResourceClient::new(ClientConfig::new("http://localhost:9000", "token"));
//!
//! let team = TeamSpec {
//!     organization_slug: "sentry".to_string(),
//!     name: Some("Backend Team".to_string()),
//!     slug: Some("backend-team".to_string()),
//!     state: TargetState::Present,
//!     ..Default::default()
//! };
//!
//! let result = team.reconcile(&client).expect("transport failure");
//! println!("changed={} failed={} {}", result.changed, result.failed, result.message);
//! ```
//!
//! ## Failure model
//!
//! An unexpected HTTP status is not an error: it comes back as an
//! [`OperationResult`] with `failed = true` and the remote body attached.
//! Connection failures, timeouts and non-JSON bodies are returned as
//! [`Error`] and should be treated as fatal. Nothing is retried.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod reconcile;
pub mod transport;
pub mod types;

pub use client::{ProjectUpdate, ResourceClient};
pub use config::ClientConfig;
pub use endpoint::{Endpoint, Method, Operation, ResourceKind};
pub use error::{Error, ErrorCategory, Result};
pub use reconcile::{
    ClientKeySpec, Intent, OrganizationSpec, Probe, ProjectSpec, Reconcile, ServiceHookSpec,
    TeamSpec,
};
pub use types::{OperationResult, TargetState};
