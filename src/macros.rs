//! This module contains the [`make_id!()`] macro, which will generate the
//! boilerplate for an "ID"-like type.
//!
//! Most database tables have IDs, and using raw integers makes it easy to mix
//! them up accidentally. [`make_id!()`] will generate a wrapper type for every
//! unique ID type you need, so you can't mix them up!

/// Creates a new "ID" type.
///
/// This will produce a thin wrapper around a SQLite row ID that implements all
/// the typical traits you'd expect.
///
/// # Example
///
/// ```ignore
/// crate::macros::make_id! {
///     /// Some useful documentation.
///     MyID
/// }
/// ```
macro_rules! make_id {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[repr(transparent)]
		#[derive(
			Debug,
			Clone,
			Copy,
			PartialEq,
			Eq,
			PartialOrd,
			Ord,
			Hash,
			serde::Serialize,
			serde::Deserialize,
			sqlx::Type,
			derive_more::Display,
			derive_more::From,
		)]
		#[serde(transparent)]
		#[sqlx(transparent)]
		pub struct $name(pub i64);

		impl std::ops::Deref for $name
		{
			type Target = i64;

			fn deref(&self) -> &Self::Target
			{
				&self.0
			}
		}

		impl From<$name> for i64
		{
			fn from(value: $name) -> Self
			{
				value.0
			}
		}

		impl std::str::FromStr for $name
		{
			type Err = <i64 as std::str::FromStr>::Err;

			fn from_str(s: &str) -> std::result::Result<Self, Self::Err>
			{
				<i64 as std::str::FromStr>::from_str(s).map(Self)
			}
		}
	};
}

pub(crate) use make_id;
