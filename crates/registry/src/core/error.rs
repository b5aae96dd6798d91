use std::fmt;

/// Field a failed lookup was matching against.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum QueryField {
	/// Declared constant name.
	Name,
	/// Zero-based declaration index.
	Ordinal,
	/// Value returned by [`crate::ById::id`].
	Id,
	/// Any other discriminant used through [`crate::EnumType::lookup`].
	Custom(&'static str),
}

impl fmt::Display for QueryField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Name => f.write_str("name"),
			Self::Ordinal => f.write_str("ordinal"),
			Self::Id => f.write_str("id"),
			Self::Custom(field) => f.write_str(field),
		}
	}
}

/// Error returned by an enumeration constructor that refuses its payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct Rejection {
	reason: String,
	#[source]
	cause: Option<Box<EnumError>>,
}

impl Rejection {
	pub fn new(reason: impl Into<String>) -> Self {
		Self {
			reason: reason.into(),
			cause: None,
		}
	}

	pub fn reason(&self) -> &str {
		&self.reason
	}

	/// Lookup failure that caused this rejection, if the constructor
	/// depended on another enumeration.
	pub fn cause(&self) -> Option<&EnumError> {
		self.cause.as_deref()
	}
}

impl From<EnumError> for Rejection {
	fn from(err: EnumError) -> Self {
		Self {
			reason: err.to_string(),
			cause: Some(Box::new(err)),
		}
	}
}

/// Failure to materialize the enumerators of a type.
///
/// Nothing is cached when population fails, so the next access retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
	/// A declared constant has an empty name.
	#[error("`{declaring_type}` declares an enumerator with an empty name at ordinal {ordinal}")]
	EmptyName {
		declaring_type: &'static str,
		ordinal: usize,
	},
	/// Two declared constants share a name.
	#[error("`{declaring_type}` declares `{name}` twice (ordinals {first} and {second})")]
	DuplicateName {
		declaring_type: &'static str,
		name: &'static str,
		first: usize,
		second: usize,
	},
	/// The concrete constructor refused a declared payload.
	#[error("`{declaring_type}::{name}` (ordinal {ordinal}) rejected its payload: {source}")]
	Rejected {
		declaring_type: &'static str,
		name: &'static str,
		ordinal: usize,
		#[source]
		source: Rejection,
	},
	/// The type was requested again while its own enumerators were being built.
	#[error("`{declaring_type}` was requested while its enumerators were being constructed")]
	Cyclic { declaring_type: &'static str },
}

/// Error returned by enumeration lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnumError {
	/// A name, ordinal, id or custom lookup matched nothing.
	#[error("no enumerator of `{declaring_type}` with {field} = {value:?}")]
	NotFound {
		declaring_type: &'static str,
		field: QueryField,
		value: String,
	},

	#[error(transparent)]
	Construction(#[from] ConstructionError),
}

impl EnumError {
	/// Returns the queried field for [`EnumError::NotFound`].
	pub fn query_field(&self) -> Option<QueryField> {
		match self {
			Self::NotFound { field, .. } => Some(*field),
			Self::Construction(_) => None,
		}
	}
}
