use std::fmt::Display;

use super::definition::Declarations;
use super::enumerator::Enumerator;
use super::error::{EnumError, QueryField, Rejection};
use super::registry::EnumRegistry;

/// Contract implemented by every concrete enumeration type.
///
/// Implementations provide the declaration table and the constructor; every
/// lookup is provided on top of [`EnumType::registry`]. Types are normally
/// declared with [`enumeration!`](crate::enumeration).
pub trait EnumType: Sized + Send + Sync + 'static {
	/// Name used in `Display` output and errors.
	const NAME: &'static str;

	/// Constructor payload, passed positionally.
	type Args;

	/// Returns the ordered constant table.
	fn declarations() -> Declarations<Self::Args>;

	/// Builds the fields of one constant from its declared payload.
	fn construct(args: Self::Args) -> Result<Self, Rejection>;

	/// Registry holding this type's enumerators.
	///
	/// Defaults to [`EnumRegistry::global`].
	fn registry() -> &'static EnumRegistry {
		EnumRegistry::global()
	}

	/// All enumerators in declaration order.
	fn values() -> Result<&'static [Enumerator<Self>], EnumError> {
		Ok(Self::registry().instances::<Self>()?)
	}

	/// The first declared enumerator, or `None` for an empty enumeration.
	fn first() -> Result<Option<&'static Enumerator<Self>>, EnumError> {
		Ok(Self::values()?.first())
	}

	/// The earliest-declared enumerator matching `predicate`.
	fn first_where<P>(mut predicate: P) -> Result<Option<&'static Enumerator<Self>>, EnumError>
	where
		P: FnMut(&Enumerator<Self>) -> bool,
	{
		Ok(Self::values()?.iter().find(|&e| predicate(e)))
	}

	/// Whether any enumerator matches `predicate`.
	fn has<P>(predicate: P) -> Result<bool, EnumError>
	where
		P: FnMut(&Enumerator<Self>) -> bool,
	{
		Ok(Self::first_where(predicate)?.is_some())
	}

	/// Like [`first_where`](Self::first_where), but a miss is an error naming
	/// `field` and `value`.
	///
	/// Custom discriminant accessors are built on this.
	fn lookup<P>(
		field: QueryField,
		value: impl Display,
		predicate: P,
	) -> Result<&'static Enumerator<Self>, EnumError>
	where
		P: FnMut(&Enumerator<Self>) -> bool,
	{
		Self::first_where(predicate)?.ok_or_else(|| EnumError::NotFound {
			declaring_type: Self::NAME,
			field,
			value: value.to_string(),
		})
	}

	fn by_name(name: &str) -> Result<&'static Enumerator<Self>, EnumError> {
		Self::lookup(QueryField::Name, name, |e| e.name() == name)
	}

	fn by_ordinal(ordinal: usize) -> Result<&'static Enumerator<Self>, EnumError> {
		Self::lookup(QueryField::Ordinal, ordinal, |e| e.ordinal() == ordinal)
	}
}
