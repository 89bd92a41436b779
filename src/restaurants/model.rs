//! Restaurant entity and the permitted request parameters.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::http::request::Payload;

/// Parameter key every create/update payload is nested under.
pub const PARAM_KEY: &str = "restaurant";

/// Fields a client may set. Everything else in a payload is dropped.
pub const PERMITTED_FIELDS: [&str; 3] = ["name", "address", "rating"];

/// A persisted restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub rating: Option<i64>,
}

impl Restaurant {
    /// The mutable attributes, without the id.
    pub fn draft(&self) -> RestaurantDraft {
        RestaurantDraft {
            name: self.name.clone(),
            address: self.address.clone(),
            rating: self.rating,
        }
    }
}

/// Restaurant attributes that have not been assigned an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantDraft {
    pub name: String,
    pub address: String,
    pub rating: Option<i64>,
}

impl RestaurantDraft {
    pub fn new(name: impl Into<String>, address: impl Into<String>, rating: Option<i64>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            rating,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("param is missing or the value is empty: {0}")]
    ParameterMissing(&'static str),
}

/// Whitelisted restaurant parameters.
///
/// `None` means the field was not supplied. For `rating`, `Some(None)` means
/// it was supplied blank and clears the stored rating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantParams {
    pub name: Option<String>,
    pub address: Option<String>,
    pub rating: Option<Option<i64>>,
}

impl RestaurantParams {
    /// Require the `restaurant` parameter and keep only permitted fields.
    pub fn permit(payload: &Payload) -> Result<Self, ParamsError> {
        match payload {
            Payload::Form(pairs) => Self::from_form(pairs),
            Payload::Json(value) => Self::from_json(value),
            Payload::Empty => Err(ParamsError::ParameterMissing(PARAM_KEY)),
        }
    }

    fn from_form(pairs: &[(String, String)]) -> Result<Self, ParamsError> {
        let mut nested = false;
        let mut params = Self::default();

        for (key, value) in pairs {
            let Some(field) = key
                .strip_prefix(PARAM_KEY)
                .and_then(|rest| rest.strip_prefix('['))
                .and_then(|rest| rest.strip_suffix(']'))
            else {
                continue;
            };
            nested = true;
            params.assign(field, value);
        }

        if nested {
            Ok(params)
        } else {
            Err(ParamsError::ParameterMissing(PARAM_KEY))
        }
    }

    fn from_json(value: &Value) -> Result<Self, ParamsError> {
        let object = match value.get(PARAM_KEY) {
            Some(Value::Object(inner)) => inner,
            Some(_) => return Err(ParamsError::ParameterMissing(PARAM_KEY)),
            // Bare attribute objects are treated as if nested under the key
            None => match value {
                Value::Object(outer) if has_permitted_field(outer) => outer,
                _ => return Err(ParamsError::ParameterMissing(PARAM_KEY)),
            },
        };

        if object.is_empty() {
            return Err(ParamsError::ParameterMissing(PARAM_KEY));
        }

        let mut params = Self::default();
        for (key, value) in object {
            match value {
                Value::String(s) => params.assign(key, s),
                Value::Number(n) => params.assign(key, &n.to_string()),
                Value::Null => params.clear(key),
                Value::Bool(b) => params.assign(key, &b.to_string()),
                // Nested structures are never scalar attributes
                Value::Array(_) | Value::Object(_) => {}
            }
        }
        Ok(params)
    }

    fn assign(&mut self, field: &str, value: &str) {
        match field {
            "name" => self.name = Some(value.to_string()),
            "address" => self.address = Some(value.to_string()),
            "rating" => self.rating = Some(cast_rating(value)),
            _ => {}
        }
    }

    fn clear(&mut self, field: &str) {
        match field {
            "name" => self.name = Some(String::new()),
            "address" => self.address = Some(String::new()),
            "rating" => self.rating = Some(None),
            _ => {}
        }
    }

    /// True when no permitted field was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.address.is_none() && self.rating.is_none()
    }

    /// Overlay the supplied fields on `base`.
    pub fn merge_into(self, base: RestaurantDraft) -> RestaurantDraft {
        RestaurantDraft {
            name: self.name.unwrap_or(base.name),
            address: self.address.unwrap_or(base.address),
            rating: self.rating.unwrap_or(base.rating),
        }
    }
}

fn has_permitted_field(object: &Map<String, Value>) -> bool {
    PERMITTED_FIELDS.iter().any(|field| object.contains_key(*field))
}

/// Cast a submitted rating to an integer.
///
/// Blank input is no rating. Otherwise the leading integer is used, and text
/// without one casts to zero. No range checks are applied.
pub fn cast_rating(raw: &str) -> Option<i64> {
    if raw.trim().is_empty() {
        return None;
    }
    Some(leading_integer(raw).unwrap_or(0))
}

/// The optionally signed integer at the start of `raw`, after leading
/// whitespace. `None` when there are no leading digits.
///
/// `"1-tonys"` is 1 and `"4.7"` is 4. Values beyond the `i64` range
/// saturate at `i64::MAX` / `i64::MIN`.
pub fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value = digits[..end].bytes().fold(0i64, |acc, d| {
        let d = i64::from(d - b'0');
        let acc = acc.saturating_mul(10);
        if negative {
            acc.saturating_sub(d)
        } else {
            acc.saturating_add(d)
        }
    });
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(pairs: &[(&str, &str)]) -> Payload {
        Payload::Form(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_form_params_whitelisted() {
        let payload = form(&[
            ("restaurant[name]", "Tonys"),
            ("restaurant[address]", "1 Main St"),
            ("restaurant[rating]", "4"),
            ("restaurant[id]", "99"),
            ("restaurant[owner]", "mallory"),
            ("authenticity_token", "abc"),
        ]);

        let params = RestaurantParams::permit(&payload).unwrap();
        assert_eq!(
            params,
            RestaurantParams {
                name: Some("Tonys".into()),
                address: Some("1 Main St".into()),
                rating: Some(Some(4)),
            }
        );
    }

    #[test]
    fn test_form_requires_nested_key() {
        let payload = form(&[("name", "Tonys"), ("rating", "4")]);
        assert_eq!(
            RestaurantParams::permit(&payload),
            Err(ParamsError::ParameterMissing("restaurant"))
        );
        assert_eq!(
            RestaurantParams::permit(&Payload::Empty),
            Err(ParamsError::ParameterMissing("restaurant"))
        );
    }

    #[test]
    fn test_form_with_only_unknown_fields() {
        let params = RestaurantParams::permit(&form(&[("restaurant[owner]", "x")])).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_json_nested_and_wrapped() {
        let nested = Payload::Json(json!({"restaurant": {"name": "Tonys", "rating": 4}}));
        let flat = Payload::Json(json!({"name": "Tonys", "rating": 4, "admin": true}));

        let expected = RestaurantParams {
            name: Some("Tonys".into()),
            address: None,
            rating: Some(Some(4)),
        };
        assert_eq!(RestaurantParams::permit(&nested).unwrap(), expected);
        assert_eq!(RestaurantParams::permit(&flat).unwrap(), expected);
    }

    #[test]
    fn test_json_missing_param() {
        for value in [json!({}), json!({"owner": "x"}), json!([1, 2]), json!({"restaurant": {}})] {
            assert_eq!(
                RestaurantParams::permit(&Payload::Json(value.clone())),
                Err(ParamsError::ParameterMissing("restaurant")),
                "{}",
                value
            );
        }
    }

    #[test]
    fn test_json_unknown_fields_only_under_key() {
        // A non-empty `restaurant` object satisfies the requirement even when
        // every key in it is then filtered out
        let payload = Payload::Json(json!({"restaurant": {"owner": "x"}}));
        let params = RestaurantParams::permit(&payload).unwrap();
        assert!(params.is_empty());
        assert_eq!(params.merge_into(RestaurantDraft::default()), RestaurantDraft::default());
    }

    #[test]
    fn test_json_null_rating_clears() {
        let payload = Payload::Json(json!({"restaurant": {"rating": null}}));
        let params = RestaurantParams::permit(&payload).unwrap();
        assert_eq!(params.rating, Some(None));
    }

    #[test]
    fn test_merge_keeps_unsupplied_fields() {
        let base = RestaurantDraft::new("Tonys", "1 Main St", Some(4));
        let params = RestaurantParams {
            rating: Some(Some(5)),
            ..Default::default()
        };
        assert_eq!(
            params.merge_into(base),
            RestaurantDraft::new("Tonys", "1 Main St", Some(5))
        );

        let clear = RestaurantParams {
            rating: Some(None),
            ..Default::default()
        };
        let merged = clear.merge_into(RestaurantDraft::new("a", "b", Some(3)));
        assert_eq!(merged.rating, None);
    }

    #[test]
    fn test_cast_rating() {
        assert_eq!(cast_rating("4"), Some(4));
        assert_eq!(cast_rating(" 5 "), Some(5));
        assert_eq!(cast_rating("4.7"), Some(4));
        assert_eq!(cast_rating("-2"), Some(-2));
        assert_eq!(cast_rating("+3"), Some(3));
        assert_eq!(cast_rating("3 stars"), Some(3));
        assert_eq!(cast_rating("great"), Some(0));
        assert_eq!(cast_rating("-"), Some(0));
        assert_eq!(cast_rating(""), None);
        assert_eq!(cast_rating("   "), None);
        // Out-of-range input is not rejected
        assert_eq!(cast_rating("11"), Some(11));
    }

    #[test]
    fn test_cast_rating_saturates() {
        assert_eq!(cast_rating("99999999999999999999"), Some(i64::MAX));
        assert_eq!(cast_rating("-99999999999999999999"), Some(i64::MIN));
        assert_eq!(cast_rating("9223372036854775807"), Some(i64::MAX));
        assert_eq!(cast_rating("-9223372036854775808"), Some(i64::MIN));
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("1"), Some(1));
        assert_eq!(leading_integer("1-tonys"), Some(1));
        assert_eq!(leading_integer(" 12abc"), Some(12));
        assert_eq!(leading_integer("007"), Some(7));
        assert_eq!(leading_integer("-3"), Some(-3));
        assert_eq!(leading_integer("new"), None);
        assert_eq!(leading_integer("-"), None);
        assert_eq!(leading_integer(""), None);
    }

    #[test]
    fn test_draft_from_restaurant() {
        let restaurant = Restaurant {
            id: 1,
            name: "Tonys".into(),
            address: "1 Main St".into(),
            rating: None,
        };
        assert_eq!(restaurant.draft(), RestaurantDraft::new("Tonys", "1 Main St", None));
    }
}
