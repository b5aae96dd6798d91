//! Enumeration infrastructure.

pub mod definition;
pub mod enumerator;
pub mod error;
pub mod id;
pub mod registry;
pub mod traits;

pub use definition::Declarations;
pub use enumerator::{DeclaringType, Enumerator};
pub use error::{ConstructionError, EnumError, QueryField, Rejection};
pub use id::{ById, IdValue};
pub use registry::EnumRegistry;
pub use traits::EnumType;
