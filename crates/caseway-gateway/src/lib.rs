//! Caseway Gateway
//!
//! Decision logic for exclusive gateways. Host applications implement
//! [`GatewayFilter`] for the gateways they want to steer, and register the
//! filters once at startup in a [`GatewayFilterRegistry`]. The navigator asks
//! the registry for a [`GatewayStrategy`] each time it reaches a gateway with
//! more than one outgoing flow.
//!
//! A few filters that cover common routing needs ship in [`filters`].

mod case;
mod error;
mod filter;
pub mod filters;
mod registry;

pub use case::CaseData;
pub use error::{FilterError, RegistryError};
pub use filter::{GatewayContext, GatewayFilter};
pub use registry::{GatewayFilterRegistry, GatewayFilterRegistryBuilder, GatewayStrategy};
