//! Query parameters shared between endpoints.

use serde::{Deserialize, Deserializer};

/// Limits how many results a request returns.
///
/// Missing values default to `DEFAULT`, values above `MAX` are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub struct Limit<const DEFAULT: u32 = 50, const MAX: u32 = 500>(pub u32);

impl<const DEFAULT: u32, const MAX: u32> Default for Limit<DEFAULT, MAX>
{
	fn default() -> Self
	{
		Self(DEFAULT)
	}
}

impl<'de, const DEFAULT: u32, const MAX: u32> Deserialize<'de> for Limit<DEFAULT, MAX>
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		use serde::de::{Error as E, Unexpected as U};

		match Option::<u32>::deserialize(deserializer)? {
			None => Ok(Self(DEFAULT)),
			Some(limit) if limit <= MAX => Ok(Self(limit)),
			Some(too_high) => {
				Err(E::invalid_value(U::Unsigned(too_high.into()), &"a smaller limit"))
			},
		}
	}
}

/// How many results to skip.
#[derive(
	Debug,
	Default,
	Clone,
	Copy,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Hash,
	Deserialize,
	derive_more::Display,
)]
#[serde(transparent)]
pub struct Offset(pub u32);

#[cfg(test)]
mod tests
{
	use serde::Deserialize;

	use super::*;

	#[derive(Debug, Deserialize)]
	struct Params
	{
		#[serde(default)]
		limit: Limit<10, 20>,

		#[serde(default)]
		offset: Offset,
	}

	#[test]
	fn defaults_apply()
	{
		let params = serde_json::from_str::<Params>("{}").expect("valid params");

		assert_eq!(params.limit, Limit(10), "default limit");
		assert_eq!(params.offset, Offset(0), "default offset");
	}

	#[test]
	fn limit_is_capped()
	{
		let params = serde_json::from_str::<Params>(r#"{ "limit": 20, "offset": 5 }"#)
			.expect("valid params");

		assert_eq!(params.limit, Limit(20), "limit at maximum");
		assert_eq!(params.offset, Offset(5), "explicit offset");

		let error = serde_json::from_str::<Params>(r#"{ "limit": 21 }"#);

		assert!(error.is_err(), "limit above maximum should be rejected");
	}
}
