pub mod comment;
pub mod post;
pub mod user;
pub mod vote;

pub use comment::*;
pub use post::*;
pub use user::*;
pub use vote::*;

use serde::{Deserialize, Deserializer};
use validator::ValidationError;

/// Derived counts travel as decimal strings on the wire (`"comment_count": "0"`).
pub mod count {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text.parse().map_err(D::Error::custom),
            Raw::Number(number) => Ok(number),
        }
    }
}

/// The viewer's own vote travels as a boolean: `true` for up, `false` for
/// down, `null` when there is none.
pub mod vote_status {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::VoteDirection;

    pub fn serialize<S: Serializer>(
        value: &Option<VoteDirection>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(direction) => serializer.serialize_bool(*direction == VoteDirection::Up),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<VoteDirection>, D::Error> {
        Ok(Option::<bool>::deserialize(deserializer)?.map(|up| {
            if up {
                VoteDirection::Up
            } else {
                VoteDirection::Down
            }
        }))
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`). Pair with `#[serde(default)]`.
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}
