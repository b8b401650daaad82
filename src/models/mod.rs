use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{error::Error, result::Result};

/// Image comments.
pub mod comment;
/// Tag filters, system wide or per user.
pub mod filter;
pub mod forum;
/// User curated galleries.
pub mod gallery;
/// Images with their intensities and representations.
pub mod image;
/// oEmbed descriptions of images.
pub mod oembed;
/// Tags.
pub mod tag;
/// User profiles, with their links and awards.
pub mod user;

/// How [`Model::from_value`] treats keys it does not expect.
///
/// The API grows fields over time, so the default tolerates both unknown and
/// missing keys. `Strict` is meant for tests that want to notice such drift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Unknown keys are ignored, missing keys take the field's default.
    #[default]
    Lenient,
    /// The object's keys must be exactly [`Model::FIELDS`].
    Strict,
}

/// A record type returned by the API.
pub trait Model: DeserializeOwned {
    /// Type name used in errors.
    const NAME: &'static str;

    /// Every key the API documents for this type.
    const FIELDS: &'static [&'static str];

    /// Builds the model from a decoded JSON object.
    ///
    /// Only the top level of the object is checked in strict mode; nested
    /// models are always deserialized leniently.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not an object, if it does not fit the
    /// model, or if `strictness` is [`Strictness::Strict`] and the key set
    /// differs from [`Model::FIELDS`].
    fn from_value(value: Value, strictness: Strictness) -> Result<Self> {
        let Value::Object(map) = &value else {
            return Err(Error::UnexpectedShape {
                expected: "an object",
                found: Error::json_kind(&value),
            });
        };

        if strictness == Strictness::Strict {
            let unexpected: Vec<String> = map
                .keys()
                .filter(|key| !Self::FIELDS.contains(&key.as_str()))
                .cloned()
                .collect();
            if !unexpected.is_empty() {
                return Err(Error::UnexpectedKeys {
                    model: Self::NAME,
                    keys: unexpected,
                });
            }

            let missing: Vec<String> = Self::FIELDS
                .iter()
                .filter(|field| !map.contains_key(**field))
                .map(ToString::to_string)
                .collect();
            if !missing.is_empty() {
                return Err(Error::MissingKeys {
                    model: Self::NAME,
                    keys: missing,
                });
            }
        }

        serde_json::from_value(value).map_err(Into::into)
    }
}

/// One page of search hits together with the total number of matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<T> {
    /// The models on this page.
    pub hits: Vec<T>,
    /// Total amount of results, e.g. for pagination.
    pub total: u64,
}

impl<T> std::ops::Deref for SearchResult<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.hits
    }
}

/// Parses an `RFC3339 datetime` as sent by the API.
///
/// Some endpoints drop the offset (`2019-05-02T05:33:36`); those are UTC.
///
/// # Errors
///
/// Fails if `raw` matches neither form.
pub fn parse_datetime(raw: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|date| date.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|date| date.and_utc())
        })
}

/// Deserializes a datetime with [`parse_datetime`]'s rules, for use in
/// `#[serde(deserialize_with)]`.
///
/// # Errors
///
/// Fails if the value is not a string or not a datetime.
pub fn de_datetime<'de, D>(d: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: String = Deserialize::deserialize(d)?;
    parse_datetime(&raw).map_err(serde::de::Error::custom)
}

/// Like [`de_datetime`] for fields that may be `null`.
///
/// # Errors
///
/// Fails if the value is neither `null` nor a datetime string.
pub fn maybe_de_datetime<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = <Option<String> as Deserialize>::deserialize(deserializer)?;
    value
        .as_deref()
        .map(parse_datetime)
        .transpose()
        .map_err(serde::de::Error::custom)
}

pub(crate) mod macros {
    macro_rules! str_opt_ref {
        ($x:expr) => {
            $x.as_ref().map(|x| x.as_ref())
        };
    }

    pub(crate) use str_opt_ref;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Pony {
        name: String,
        wings: Option<bool>,
    }

    impl Model for Pony {
        const NAME: &'static str = "Pony";
        const FIELDS: &'static [&'static str] = &["name", "wings"];
    }

    #[test]
    fn lenient_tolerates_unknown_and_missing_keys() {
        let pony = Pony::from_value(json!({"name": "Gallus", "age": 4}), Strictness::Lenient)
            .unwrap();
        assert_eq!(pony.name, "Gallus");
        assert_eq!(pony.wings, None);
    }

    #[test]
    fn strict_rejects_unknown_keys() {
        let err = Pony::from_value(
            json!({"name": "Gallus", "wings": true, "age": 4}),
            Strictness::Strict,
        )
        .unwrap_err();
        match err {
            Error::UnexpectedKeys { model, keys } => {
                assert_eq!(model, "Pony");
                assert_eq!(keys, vec!["age".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn strict_rejects_missing_keys() {
        let err = Pony::from_value(json!({"name": "Sandbar"}), Strictness::Strict).unwrap_err();
        assert!(matches!(err, Error::MissingKeys { ref keys, .. } if keys == &["wings"]));
    }

    #[test]
    fn strict_accepts_exact_keys() {
        let pony = Pony::from_value(json!({"name": "Sandbar", "wings": false}), Strictness::Strict)
            .unwrap();
        assert_eq!(pony.wings, Some(false));
    }

    #[test]
    fn non_objects_are_rejected() {
        let err = Pony::from_value(json!([1, 2]), Strictness::Lenient).unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedShape {
                found: "an array",
                ..
            }
        ));
    }

    #[test]
    fn datetimes_with_and_without_offset() {
        let naive = parse_datetime("2019-05-02T05:33:36").unwrap();
        assert_eq!((naive.year(), naive.month(), naive.day()), (2019, 5, 2));
        assert_eq!((naive.hour(), naive.minute(), naive.second()), (5, 33, 36));

        let offset = parse_datetime("2019-05-02T07:33:36+02:00").unwrap();
        assert_eq!(offset, naive);

        let zulu = parse_datetime("2020-04-10T00:14:35.123Z").unwrap();
        assert_eq!(zulu.timestamp_subsec_millis(), 123);

        assert!(parse_datetime("yesterday").is_err());
    }
}
