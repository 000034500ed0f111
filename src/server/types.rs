use axum::body::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::server::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct FavoriteRequest {
    pub user_id: Option<i32>,
}

impl FavoriteRequest {
    /// Ids start at 1, so zero or a negative `user_id` counts as absent.
    pub fn owning_user(&self) -> Result<i32, ApiError> {
        self.user_id
            .filter(|id| *id > 0)
            .ok_or(ApiError::MissingData)
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    pub msg: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RouteEntry {
    pub method: &'static str,
    pub path: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SitemapResponse {
    pub routes: Vec<RouteEntry>,
}

/// Parses a `{id}` path segment. Anything that cannot name a row, including
/// integers beyond the key column's range, is reported as a missing `resource`.
pub fn row_id(raw: &str, resource: &'static str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| ApiError::NotFound(resource))
}

/// Body of a create request: must be a JSON object.
pub fn required_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ApiError::MissingData)?;
    if !value.is_object() {
        return Err(ApiError::MissingData);
    }
    serde_json::from_value(value).map_err(|_| ApiError::MissingData)
}

/// Body of an update request: an empty body carries no fields.
pub fn optional_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    required_body(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::helpers::PlanetFields;

    #[test]
    fn empty_create_body_is_missing_data() {
        let parsed = required_body::<PlanetFields>(&Bytes::new());
        assert!(matches!(parsed, Err(ApiError::MissingData)));
    }

    #[test]
    fn non_object_body_is_missing_data() {
        let parsed = required_body::<PlanetFields>(&Bytes::from_static(b"[1, 2]"));
        assert!(matches!(parsed, Err(ApiError::MissingData)));
    }

    #[test]
    fn wrongly_typed_field_is_missing_data() {
        let parsed = required_body::<FavoriteRequest>(&Bytes::from_static(br#"{"user_id":"one"}"#));
        assert!(matches!(parsed, Err(ApiError::MissingData)));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let parsed: PlanetFields =
            required_body(&Bytes::from_static(br#"{"name":"Hoth","moons":3}"#)).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("Hoth"));
        assert!(parsed.terrain.is_none());
    }

    #[test]
    fn out_of_range_id_is_not_found() {
        assert_eq!(row_id("42", "User").unwrap(), 42);
        for raw in ["3000000000", "2147483648", "99999999999999999999", "tatooine"] {
            let parsed = row_id(raw, "User");
            assert!(matches!(parsed, Err(ApiError::NotFound("User"))), "{raw}");
        }
    }

    #[test]
    fn zero_user_id_is_missing_data() {
        let request: FavoriteRequest =
            required_body(&Bytes::from_static(br#"{"user_id":0}"#)).unwrap();
        assert!(matches!(request.owning_user(), Err(ApiError::MissingData)));

        let request: FavoriteRequest =
            required_body(&Bytes::from_static(br#"{"user_id":7}"#)).unwrap();
        assert_eq!(request.owning_user().unwrap(), 7);
    }

    #[test]
    fn blank_update_body_has_no_fields() {
        let parsed: PlanetFields = optional_body(&Bytes::from_static(b"  \n")).unwrap();
        assert!(parsed.name.is_none() && parsed.terrain.is_none() && parsed.climate.is_none());
    }
}
