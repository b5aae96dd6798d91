use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use super::traits::EnumType;

/// Identity of a concrete enumeration type.
#[derive(Copy, Clone)]
pub struct DeclaringType {
	id: TypeId,
	name: &'static str,
}

impl DeclaringType {
	pub fn of<T: EnumType>() -> Self {
		Self {
			id: TypeId::of::<T>(),
			name: T::NAME,
		}
	}

	/// Display name, as declared by [`EnumType::NAME`].
	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn type_id(&self) -> TypeId {
		self.id
	}
}

impl PartialEq for DeclaringType {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for DeclaringType {}

impl Hash for DeclaringType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl fmt::Debug for DeclaringType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

impl fmt::Display for DeclaringType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

/// One materialized constant of an enumeration type.
///
/// `name` and `ordinal` are assigned by the registry when the instance is
/// built and cannot be changed afterwards. The concrete type's own fields are
/// reachable through [`Deref`].
pub struct Enumerator<T> {
	name: &'static str,
	ordinal: usize,
	declaring_type: DeclaringType,
	value: T,
}

impl<T> Enumerator<T> {
	pub(crate) fn new(
		name: &'static str,
		ordinal: usize,
		declaring_type: DeclaringType,
		value: T,
	) -> Self {
		Self {
			name,
			ordinal,
			declaring_type,
			value,
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn ordinal(&self) -> usize {
		self.ordinal
	}

	pub fn declaring_type(&self) -> DeclaringType {
		self.declaring_type
	}

	pub fn value(&self) -> &T {
		&self.value
	}

	/// Same declaring type and same name.
	///
	/// Ordinal and field values do not take part, and neither does address
	/// identity.
	pub fn equals<U>(&self, other: &Enumerator<U>) -> bool {
		self.declaring_type == other.declaring_type && self.name == other.name
	}
}

impl<T> Deref for Enumerator<T> {
	type Target = T;

	fn deref(&self) -> &T {
		&self.value
	}
}

impl<T, U> PartialEq<Enumerator<U>> for Enumerator<T> {
	fn eq(&self, other: &Enumerator<U>) -> bool {
		self.equals(other)
	}
}

impl<T> Eq for Enumerator<T> {}

impl<T> Hash for Enumerator<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.declaring_type.hash(state);
		self.name.hash(state);
	}
}

impl<T> fmt::Display for Enumerator<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}::{}", self.declaring_type, self.name)
	}
}

impl<T: fmt::Debug> fmt::Debug for Enumerator<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Enumerator")
			.field("declaring_type", &self.declaring_type)
			.field("name", &self.name)
			.field("ordinal", &self.ordinal)
			.field("value", &self.value)
			.finish()
	}
}
