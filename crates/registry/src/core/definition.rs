//! Declaration tables.
//!
//! A [`Declarations`] is the ordered `name -> payload` table an enumeration
//! type hands to the registry. Order is declaration order and becomes the
//! ordinal of each constant.

use rustc_hash::FxHashMap as HashMap;

use super::error::ConstructionError;

/// Ordered constant table of one enumeration type.
///
/// `Args` is the constructor payload: `()` for no arguments, `(T,)` for a
/// single scalar, or a tuple passed positionally.
#[derive(Debug, Clone, PartialEq)]
pub struct Declarations<Args> {
	entries: Vec<(&'static str, Args)>,
}

impl<Args> Declarations<Args> {
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
		}
	}

	/// Appends a constant, builder style.
	pub fn declare(mut self, name: &'static str, args: Args) -> Self {
		self.push(name, args);
		self
	}

	pub fn push(&mut self, name: &'static str, args: Args) {
		self.entries.push((name, args));
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Declared names in declaration order.
	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.entries.iter().map(|(name, _)| *name)
	}

	/// Checks that every name is non-empty and unique.
	pub(crate) fn validate(&self, declaring_type: &'static str) -> Result<(), ConstructionError> {
		let mut seen: HashMap<&'static str, usize> = HashMap::default();
		seen.reserve(self.entries.len());

		for (ordinal, (name, _)) in self.entries.iter().enumerate() {
			if name.is_empty() {
				return Err(ConstructionError::EmptyName {
					declaring_type,
					ordinal,
				});
			}
			if let Some(&first) = seen.get(name) {
				return Err(ConstructionError::DuplicateName {
					declaring_type,
					name,
					first,
					second: ordinal,
				});
			}
			seen.insert(name, ordinal);
		}

		Ok(())
	}
}

impl<Args> Default for Declarations<Args> {
	fn default() -> Self {
		Self::new()
	}
}

impl<Args> From<Vec<(&'static str, Args)>> for Declarations<Args> {
	fn from(entries: Vec<(&'static str, Args)>) -> Self {
		Self { entries }
	}
}

impl<Args> FromIterator<(&'static str, Args)> for Declarations<Args> {
	fn from_iter<I: IntoIterator<Item = (&'static str, Args)>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().collect(),
		}
	}
}

impl<Args> IntoIterator for Declarations<Args> {
	type Item = (&'static str, Args);
	type IntoIter = std::vec::IntoIter<(&'static str, Args)>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}
