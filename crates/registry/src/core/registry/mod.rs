//! Per-type instance cache.
//!
//! # Role
//!
//! [`EnumRegistry`] materializes the enumerators of a type on first access and
//! publishes them as a `&'static` slice that every later caller shares.
//!
//! # Invariants
//!
//! - A type is populated at most once; constructors never run again after a
//!   successful population.
//! - Readers only ever observe fully built slices.
//! - A failed population leaves no entry behind, so the next access retries.
//! - Re-requesting a type from inside its own constructors fails with
//!   [`ConstructionError::Cyclic`].

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, RwLock};
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

use super::enumerator::{DeclaringType, Enumerator};
use super::error::ConstructionError;
use super::traits::EnumType;

#[cfg(test)]
mod tests;

/// Published slice, stored as `&'static [Enumerator<T>]` behind `Any`.
type Slot = Box<dyn Any + Send + Sync>;

static GLOBAL: LazyLock<EnumRegistry> = LazyLock::new(EnumRegistry::new);

/// Lazily populated cache of enumerator instances, keyed by declaring type.
///
/// Populated slices are leaked and live for the rest of the process, also for
/// registries created with [`EnumRegistry::new`].
pub struct EnumRegistry {
	published: RwLock<HashMap<TypeId, Slot>>,
	/// Types whose constructors are currently running. Reentrant so that a
	/// constructor may populate other types on the same thread.
	building: ReentrantMutex<RefCell<HashSet<TypeId>>>,
}

impl EnumRegistry {
	pub fn new() -> Self {
		Self {
			published: RwLock::new(HashMap::default()),
			building: ReentrantMutex::new(RefCell::new(HashSet::default())),
		}
	}

	/// The process-wide registry used by [`EnumType`] lookups.
	pub fn global() -> &'static EnumRegistry {
		&GLOBAL
	}

	/// Returns the enumerators of `T` in declaration order, building them on
	/// first access.
	///
	/// Every successful call for the same `T` returns the same slice.
	pub fn instances<T: EnumType>(&self) -> Result<&'static [Enumerator<T>], ConstructionError> {
		if let Some(found) = self.get::<T>() {
			return Ok(found);
		}

		let guard = self.building.lock();

		// Another thread may have published while we waited for the lock.
		if let Some(found) = self.get::<T>() {
			return Ok(found);
		}

		let ty = TypeId::of::<T>();
		let built = match BuildMark::enter(&guard, ty) {
			Some(_mark) => materialize::<T>(),
			None => Err(ConstructionError::Cyclic {
				declaring_type: T::NAME,
			}),
		};
		let built = match built {
			Ok(built) => built,
			Err(err) => {
				#[cfg(feature = "tracing")]
				tracing::warn!(declaring_type = T::NAME, error = %err, "enumeration population failed");
				return Err(err);
			}
		};

		let slice: &'static [Enumerator<T>] = Box::leak(built.into_boxed_slice());
		self.published.write().insert(ty, Box::new(slice));

		#[cfg(feature = "tracing")]
		tracing::debug!(declaring_type = T::NAME, count = slice.len(), "enumeration populated");

		Ok(slice)
	}

	/// Returns true once `T` has been successfully populated.
	pub fn is_populated<T: EnumType>(&self) -> bool {
		self.published.read().contains_key(&TypeId::of::<T>())
	}

	/// Number of populated types.
	pub fn len(&self) -> usize {
		self.published.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.published.read().is_empty()
	}

	fn get<T: EnumType>(&self) -> Option<&'static [Enumerator<T>]> {
		self.published
			.read()
			.get(&TypeId::of::<T>())?
			.downcast_ref::<&'static [Enumerator<T>]>()
			.copied()
	}
}

impl Default for EnumRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Marks a type as under construction until dropped, including on unwind.
struct BuildMark<'a> {
	building: &'a RefCell<HashSet<TypeId>>,
	ty: TypeId,
}

impl<'a> BuildMark<'a> {
	/// Returns `None` if `ty` is already being built on this thread.
	fn enter(building: &'a RefCell<HashSet<TypeId>>, ty: TypeId) -> Option<Self> {
		let entered = building.borrow_mut().insert(ty);
		entered.then(|| Self { building, ty })
	}
}

impl Drop for BuildMark<'_> {
	fn drop(&mut self) {
		self.building.borrow_mut().remove(&self.ty);
	}
}

fn materialize<T: EnumType>() -> Result<Vec<Enumerator<T>>, ConstructionError> {
	let declarations = T::declarations();
	declarations.validate(T::NAME)?;

	let declaring_type = DeclaringType::of::<T>();
	let mut instances = Vec::with_capacity(declarations.len());

	for (ordinal, (name, args)) in declarations.into_iter().enumerate() {
		let value = T::construct(args).map_err(|source| ConstructionError::Rejected {
			declaring_type: T::NAME,
			name,
			ordinal,
			source,
		})?;

		#[cfg(feature = "tracing")]
		tracing::trace!(declaring_type = T::NAME, name, ordinal, "constructed enumerator");

		instances.push(Enumerator::new(name, ordinal, declaring_type, value));
	}

	Ok(instances)
}
