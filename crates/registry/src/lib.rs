//! Singleton enumerations with lazy, once-per-type materialization.
//!
//! An enumeration here is a closed set of named constants whose values are
//! built by a constructor from a declared payload. The first lookup touching a
//! type builds all of its constants in declaration order, assigns each a name
//! and zero-based ordinal, and caches them for the rest of the process.
//!
//! # Modules
//!
//! - [`core::registry`](crate::core::registry) - the per-type instance cache
//! - [`core::traits`](crate::core::traits) - [`EnumType`], iteration and predicate lookups
//! - [`core::id`](crate::core::id) - [`ById`], lookup by a custom id with loose equality
//! - [`core::definition`](crate::core::definition) - ordered declaration tables
//! - [`core::error`](crate::core::error) - lookup and construction errors
//!
//! # Declaring an Enumeration
//!
//! ```ignore
//! use ordo_registry::{EnumType, Rejection, enumeration};
//!
//! pub struct Planet {
//!     mass: f64,
//!     radius: f64,
//! }
//!
//! impl Planet {
//!     fn new(mass: f64, radius: f64) -> Result<Self, Rejection> {
//!         Ok(Self { mass, radius })
//!     }
//! }
//!
//! enumeration! {
//!     Planet(mass: f64, radius: f64) => Planet::new {
//!         MERCURY(3.303e23, 2.4397e6),
//!         VENUS(4.869e24, 6.0518e6),
//!         EARTH(5.976e24, 6.37814e6),
//!     }
//! }
//!
//! let earth = Planet::by_name("EARTH")?;
//! assert_eq!(earth.ordinal(), 2);
//! assert_eq!(earth.to_string(), "Planet::EARTH");
//! ```

pub mod core;
mod macros;

pub use crate::core::{
	ById, ConstructionError, DeclaringType, Declarations, EnumError, EnumRegistry, EnumType,
	Enumerator, IdValue, QueryField, Rejection,
};
#[cfg(test)]
use tracing_subscriber as _;
