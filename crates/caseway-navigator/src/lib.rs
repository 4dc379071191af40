//! Process navigation for caseway.
//!
//! This crate provides the [`ProcessNavigator`], which answers one question:
//! given the node a case currently occupies, which task does it move to next?
//!
//! ```text
//! Task1 ──Flow2──▶ Gateway1 ──Flow4──▶ Gateway2 ──Flow6──▶ EndEvent
//!                     │
//!                     └──Flow3──▶ Task2
//! ```
//!
//! Gateways are invisible to the caller. Each gateway with more than one
//! outgoing flow is resolved in order by:
//! 1. the filter registered for it in the [`GatewayFilterRegistry`], if any
//! 2. its default flow, if more than one candidate remains
//! 3. failure with [`NavigationError::ZeroPaths`] or
//!    [`NavigationError::MultiplePaths`]
//!
//! # Usage
//!
//! ```ignore
//! use caseway_navigator::ProcessNavigator;
//! use tokio_util::sync::CancellationToken;
//!
//! let navigator = ProcessNavigator::new(Arc::new(graph), Arc::new(registry));
//! let next = navigator
//!   .get_next_task(&case, "Task1", Some("submit"), &CancellationToken::new())
//!   .await?;
//! ```

mod error;
mod navigator;

// Everything a host needs to write and register gateway filters.
pub use caseway_gateway::{
  CaseData, FilterError, GatewayContext, GatewayFilter, GatewayFilterRegistry,
};
pub use error::NavigationError;
pub use navigator::ProcessNavigator;
