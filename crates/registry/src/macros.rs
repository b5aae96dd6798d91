//! Declaration macro for enumeration types.

/// Declares the constants of an enumeration type and implements
/// [`EnumType`](crate::EnumType) for it.
///
/// The parameter list names the constructor arguments and their types. Each
/// constant lists its payload positionally, and the constructor is called with
/// it once, on first access. Constants without parentheses take no arguments.
///
/// One accessor per constant is generated with the constant's exact name
/// (`Color::GREEN()`), resolving through
/// [`EnumType::by_name`](crate::EnumType::by_name). Upper-case constants never
/// clash with keywords or with the snake-case [`EnumType`](crate::EnumType)
/// methods. A constant spelled like an inherent method of the type fails to
/// compile, and a lower-case one spelled like an `EnumType` method (`first`)
/// shadows it.
///
/// ```ignore
/// pub struct Color {
///     value: i64,
/// }
///
/// impl Color {
///     fn new(value: i64) -> Result<Self, Rejection> {
///         Ok(Self { value })
///     }
/// }
///
/// enumeration! {
///     Color(value: i64) => Color::new {
///         RED(1),
///         GREEN(2),
///         BLUE(3),
///     }
/// }
///
/// assert_eq!(Color::GREEN()?.ordinal(), 1);
/// ```
#[macro_export]
macro_rules! enumeration {
	(
		$ty:ident ( $($arg:ident : $arg_ty:ty),* $(,)? ) => $ctor:path {
			$(
				$(#[$variant_meta:meta])*
				$variant:ident $( ( $($value:expr),* $(,)? ) )?
			),* $(,)?
		}
	) => {
		impl $crate::EnumType for $ty {
			const NAME: &'static str = stringify!($ty);
			type Args = ( $($arg_ty,)* );

			fn declarations() -> $crate::Declarations<Self::Args> {
				$crate::Declarations::from(vec![
					$( (stringify!($variant), ( $($($value,)*)? )) ),*
				])
			}

			fn construct(
				( $($arg,)* ): Self::Args,
			) -> ::core::result::Result<Self, $crate::Rejection> {
				$ctor($($arg),*)
			}
		}

		#[allow(dead_code, non_snake_case)]
		impl $ty {
			$(
				$(#[$variant_meta])*
				pub fn $variant()
					-> ::core::result::Result<&'static $crate::Enumerator<$ty>, $crate::EnumError>
				{
					<$ty as $crate::EnumType>::by_name(stringify!($variant))
				}
			)*
		}
	};
}
