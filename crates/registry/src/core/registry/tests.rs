use std::any::TypeId;
use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::{Mutex, const_mutex};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rustc_hash::FxHashSet as HashSet;

use super::{BuildMark, EnumRegistry};
use crate::core::{ConstructionError, Declarations, EnumError, EnumType, QueryField, Rejection};

static COUNTED_BUILDS: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug)]
struct Counted {
	weight: u32,
}

impl EnumType for Counted {
	const NAME: &'static str = "Counted";
	type Args = (u32,);

	fn declarations() -> Declarations<Self::Args> {
		Declarations::new()
			.declare("LIGHT", (1,))
			.declare("MEDIUM", (5,))
			.declare("HEAVY", (10,))
	}

	fn construct((weight,): Self::Args) -> Result<Self, Rejection> {
		COUNTED_BUILDS.fetch_add(1, Ordering::SeqCst);
		Ok(Self { weight })
	}
}

/// Verifies that population runs each constructor exactly once and that later
/// calls return the same slice.
#[test]
fn test_populates_once_and_shares_slice() {
	let registry = EnumRegistry::new();
	assert!(registry.is_empty());
	assert!(!registry.is_populated::<Counted>());

	let first = registry.instances::<Counted>().expect("populate");
	let second = registry.instances::<Counted>().expect("cached");

	assert!(std::ptr::eq(first, second));
	assert_eq!(COUNTED_BUILDS.load(Ordering::SeqCst), 3);
	assert!(registry.is_populated::<Counted>());
	assert_eq!(registry.len(), 1);

	let summary: Vec<_> = first
		.iter()
		.map(|e| (e.name(), e.ordinal(), e.weight))
		.collect();
	assert_eq!(summary, vec![("LIGHT", 0, 1), ("MEDIUM", 1, 5), ("HEAVY", 2, 10)]);
}

#[derive(Debug)]
struct Nothing;

impl EnumType for Nothing {
	const NAME: &'static str = "Nothing";
	type Args = ();

	fn declarations() -> Declarations<Self::Args> {
		Declarations::new()
	}

	fn construct((): Self::Args) -> Result<Self, Rejection> {
		Ok(Self)
	}
}

#[test]
fn test_empty_enumeration_is_cached_as_empty() {
	let registry = EnumRegistry::new();
	let values = registry.instances::<Nothing>().expect("empty is valid");
	assert!(values.is_empty());
	assert!(registry.is_populated::<Nothing>());
}

static FLAKY_ARMED: AtomicBool = AtomicBool::new(true);

#[derive(Debug)]
struct Flaky;

impl EnumType for Flaky {
	const NAME: &'static str = "Flaky";
	type Args = (bool,);

	fn declarations() -> Declarations<Self::Args> {
		Declarations::new().declare("STEADY", (false,)).declare("GATED", (true,))
	}

	fn construct((gated,): Self::Args) -> Result<Self, Rejection> {
		if gated && FLAKY_ARMED.swap(false, Ordering::SeqCst) {
			return Err(Rejection::new("gate armed"));
		}
		Ok(Self)
	}
}

/// A failed population leaves nothing cached and the next access retries.
#[test]
fn test_failed_population_is_not_cached() {
	let registry = EnumRegistry::new();

	let err = registry.instances::<Flaky>().unwrap_err();
	assert_eq!(
		err,
		ConstructionError::Rejected {
			declaring_type: "Flaky",
			name: "GATED",
			ordinal: 1,
			source: Rejection::new("gate armed"),
		}
	);
	assert!(!registry.is_populated::<Flaky>());

	let values = registry.instances::<Flaky>().expect("retry succeeds");
	assert_eq!(values.len(), 2);
	assert_eq!(values[1].name(), "GATED");
}

#[derive(Debug)]
struct Twice;

impl EnumType for Twice {
	const NAME: &'static str = "Twice";
	type Args = ();

	fn declarations() -> Declarations<Self::Args> {
		vec![("ONE", ()), ("TWO", ()), ("ONE", ())].into()
	}

	fn construct((): Self::Args) -> Result<Self, Rejection> {
		Ok(Self)
	}
}

#[test]
fn test_duplicate_names_fail_population() {
	let registry = EnumRegistry::new();
	let err = registry.instances::<Twice>().unwrap_err();
	assert!(matches!(
		err,
		ConstructionError::DuplicateName {
			name: "ONE",
			first: 0,
			second: 2,
			..
		}
	));
	assert!(registry.is_empty());
}

#[derive(Debug)]
struct Ouroboros;

impl EnumType for Ouroboros {
	const NAME: &'static str = "Ouroboros";
	type Args = ();

	fn declarations() -> Declarations<Self::Args> {
		Declarations::new().declare("HEAD", ())
	}

	fn construct((): Self::Args) -> Result<Self, Rejection> {
		Self::values()?;
		Ok(Self)
	}
}

/// A constructor that requests its own type sees a cycle error instead of
/// deadlocking, and the type stays unpopulated.
#[test]
fn test_self_reference_is_cyclic() {
	let err = Ouroboros::values().unwrap_err();

	let EnumError::Construction(ConstructionError::Rejected { name, source, .. }) = &err else {
		panic!("expected rejection, got {err:?}");
	};
	assert_eq!(*name, "HEAD");
	assert_eq!(
		source.cause(),
		Some(&EnumError::Construction(ConstructionError::Cyclic {
			declaring_type: "Ouroboros",
		}))
	);
	assert!(!EnumRegistry::global().is_populated::<Ouroboros>());
}

#[derive(Debug)]
struct Leaf {
	code: char,
}

impl EnumType for Leaf {
	const NAME: &'static str = "Leaf";
	type Args = (char,);

	fn declarations() -> Declarations<Self::Args> {
		Declarations::new().declare("A", ('a',)).declare("B", ('b',))
	}

	fn construct((code,): Self::Args) -> Result<Self, Rejection> {
		Ok(Self { code })
	}
}

#[derive(Debug)]
struct Branch {
	leaf: &'static crate::Enumerator<Leaf>,
}

impl EnumType for Branch {
	const NAME: &'static str = "Branch";
	type Args = (&'static str,);

	fn declarations() -> Declarations<Self::Args> {
		Declarations::new().declare("LEFT", ("A",)).declare("RIGHT", ("B",))
	}

	fn construct((leaf,): Self::Args) -> Result<Self, Rejection> {
		Ok(Self {
			leaf: Leaf::by_name(leaf)?,
		})
	}
}

/// Constructors may populate other types on the same thread.
#[test]
fn test_nested_population() {
	let branches = Branch::values().expect("nested population");
	assert_eq!(branches[0].leaf.code, 'a');
	assert_eq!(branches[1].leaf.code, 'b');
	assert!(EnumRegistry::global().is_populated::<Leaf>());
}

#[test]
fn test_build_mark_rejects_reentry_and_clears_on_drop() {
	let building = RefCell::new(HashSet::default());
	let ty = TypeId::of::<Counted>();

	let outer = BuildMark::enter(&building, ty).expect("first entry");
	assert!(BuildMark::enter(&building, ty).is_none());
	assert!(building.borrow().contains(&ty));

	drop(outer);
	assert!(building.borrow().is_empty());
	assert!(BuildMark::enter(&building, ty).is_some());
}

static GENERATED_NAMES: Mutex<Vec<&'static str>> = const_mutex(Vec::new());
static GENERATED_REGISTRY: Mutex<Option<&'static EnumRegistry>> = const_mutex(None);

/// Enumeration whose table is swapped per generated case, each case with a
/// fresh registry.
#[derive(Debug)]
struct Generated;

impl EnumType for Generated {
	const NAME: &'static str = "Generated";
	type Args = ();

	fn registry() -> &'static EnumRegistry {
		let installed = *GENERATED_REGISTRY.lock();
		installed.unwrap_or_else(EnumRegistry::global)
	}

	fn declarations() -> Declarations<Self::Args> {
		GENERATED_NAMES.lock().iter().map(|&name| (name, ())).collect()
	}

	fn construct((): Self::Args) -> Result<Self, Rejection> {
		Ok(Self)
	}
}

fn install_generated(names: Vec<&'static str>) {
	*GENERATED_NAMES.lock() = names;
	*GENERATED_REGISTRY.lock() = Some(Box::leak(Box::new(EnumRegistry::new())));
}

proptest! {
	#[test]
	fn ordinals_and_names_follow_declaration_order(
		names in prop::collection::hash_set("[A-Z][A-Z0-9_]{0,7}", 0..24),
		dup in any::<prop::sample::Index>(),
	) {
		let names: Vec<&'static str> = names
			.into_iter()
			.map(|name| &*Box::leak(name.into_boxed_str()))
			.collect();
		install_generated(names.clone());

		let values = Generated::values().expect("unique names populate");
		prop_assert_eq!(values.len(), names.len());
		for (i, (value, &name)) in values.iter().zip(&names).enumerate() {
			prop_assert_eq!(value.ordinal(), i);
			prop_assert_eq!(value.name(), name);
			prop_assert!(std::ptr::eq(Generated::by_ordinal(i).expect("in range"), value));
			prop_assert!(std::ptr::eq(Generated::by_name(name).expect("declared"), value));
		}

		let err = Generated::by_ordinal(names.len()).unwrap_err();
		prop_assert_eq!(err.query_field(), Some(QueryField::Ordinal));

		if !names.is_empty() {
			let first = dup.index(names.len());
			let mut repeated = names.clone();
			repeated.push(names[first]);
			install_generated(repeated);

			let err = Generated::values().unwrap_err();
			prop_assert_eq!(
				err,
				EnumError::Construction(ConstructionError::DuplicateName {
					declaring_type: "Generated",
					name: names[first],
					first,
					second: names.len(),
				})
			);
		}
	}
}
