//! Lookup by a custom id.
//!
//! Types opt in by implementing [`ById`]. Ids are compared loosely by default:
//! an integer id matches a numeric string with the same value (`2`, `"2"`,
//! `" 2"`, `"2.0"`), while a non-numeric string never matches an integer.
//! [`ById::by_id_strict`] requires the same kind and value.

use std::fmt;

use super::enumerator::Enumerator;
use super::error::{EnumError, QueryField};
use super::traits::EnumType;


/// An enumerator id or an id query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdValue {
	Int(i64),
	Str(String),
}

impl IdValue {
	/// Loose equality between ids of possibly different kinds.
	///
	/// - `Int` vs `Int`: numeric equality.
	/// - `Int` vs `Str`: equal only if the string is numeric and has the same
	///   value.
	/// - `Str` vs `Str`: numeric comparison when both are numeric, exact
	///   string comparison otherwise.
	pub fn loose_eq(&self, other: &IdValue) -> bool {
		match (self, other) {
			(Self::Int(a), Self::Int(b)) => a == b,
			(Self::Int(i), Self::Str(s)) | (Self::Str(s), Self::Int(i)) => {
				Numeric::parse(s).is_some_and(|n| n == Numeric::Int(*i))
			}
			(Self::Str(a), Self::Str(b)) => match (Numeric::parse(a), Numeric::parse(b)) {
				(Some(x), Some(y)) => x == y,
				_ => a == b,
			},
		}
	}
}

impl fmt::Display for IdValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Int(v) => write!(f, "{v}"),
			Self::Str(v) => f.write_str(v),
		}
	}
}

macro_rules! impl_from_int {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for IdValue {
				fn from(v: $ty) -> Self {
					Self::Int(i64::from(v))
				}
			}
		)*
	};
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for IdValue {
	fn from(v: u64) -> Self {
		i64::try_from(v).map_or_else(|_| Self::Str(v.to_string()), Self::Int)
	}
}

impl From<usize> for IdValue {
	fn from(v: usize) -> Self {
		i64::try_from(v).map_or_else(|_| Self::Str(v.to_string()), Self::Int)
	}
}

impl From<&str> for IdValue {
	fn from(v: &str) -> Self {
		Self::Str(v.to_owned())
	}
}

impl From<String> for IdValue {
	fn from(v: String) -> Self {
		Self::Str(v)
	}
}

impl From<&String> for IdValue {
	fn from(v: &String) -> Self {
		Self::Str(v.clone())
	}
}

/// Numeric reading of an id string.
#[derive(Debug, Clone, Copy)]
enum Numeric {
	Int(i64),
	Float(f64),
}

impl Numeric {
	/// Accepts optional surrounding ASCII whitespace, an optional sign, decimal
	/// digits with an optional fraction and an optional exponent. Rejects hex,
	/// `inf` and `nan`.
	fn parse(s: &str) -> Option<Self> {
		let s = s.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'));
		if !is_decimal_literal(s) {
			return None;
		}
		if let Ok(v) = s.parse::<i64>() {
			return Some(Self::Int(v));
		}
		s.parse::<f64>().ok().filter(|v| v.is_finite()).map(Self::Float)
	}

	fn as_f64(self) -> f64 {
		match self {
			Self::Int(v) => v as f64,
			Self::Float(v) => v,
		}
	}
}

impl PartialEq for Numeric {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Int(a), Self::Int(b)) => a == b,
			_ => self.as_f64() == other.as_f64(),
		}
	}
}

fn is_decimal_literal(s: &str) -> bool {
	let bytes = s.as_bytes();
	let mut i = 0;

	if matches!(bytes.first(), Some(b'+' | b'-')) {
		i += 1;
	}

	let int_start = i;
	while bytes.get(i).is_some_and(u8::is_ascii_digit) {
		i += 1;
	}
	let mut digits = i - int_start;

	if bytes.get(i) == Some(&b'.') {
		i += 1;
		let frac_start = i;
		while bytes.get(i).is_some_and(u8::is_ascii_digit) {
			i += 1;
		}
		digits += i - frac_start;
	}

	if digits == 0 {
		return false;
	}

	if matches!(bytes.get(i), Some(b'e' | b'E')) {
		i += 1;
		if matches!(bytes.get(i), Some(b'+' | b'-')) {
			i += 1;
		}
		let exp_start = i;
		while bytes.get(i).is_some_and(u8::is_ascii_digit) {
			i += 1;
		}
		if i == exp_start {
			return false;
		}
	}

	i == bytes.len()
}

/// Lookup by a custom id, for types that expose one.
pub trait ById: EnumType {
	fn id(&self) -> IdValue;

	/// Finds the first enumerator whose id loosely equals `id`.
	fn by_id(id: impl Into<IdValue>) -> Result<&'static Enumerator<Self>, EnumError> {
		let id = id.into();
		Self::lookup(QueryField::Id, &id, |e| id.loose_eq(&e.id()))
	}

	/// Finds the first enumerator whose id has the same kind and value as `id`.
	fn by_id_strict(id: impl Into<IdValue>) -> Result<&'static Enumerator<Self>, EnumError> {
		let id = id.into();
		Self::lookup(QueryField::Id, &id, |e| e.id() == id)
	}
}
