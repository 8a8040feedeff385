//! Shape checks shared by the per-service scenarios.

use reqwest::StatusCode;
use serde_json::Value;

use crate::client::ApiResponse;
use crate::error::HarnessError;

/// Minimal members every JSON error body must carry.
const REQUIRED_ERROR_KEYS: [&str; 2] = ["id", "message"];

/// Check that a response believed to be an error carries the minimal
/// `{id, message}` JSON contract, with both members non-empty.
///
/// Success is silent; failures name the missing key(s).
pub fn assert_error_shape(res: &ApiResponse) -> Result<(), HarnessError> {
    let body = match res.json.as_ref() {
        Some(body) => body,
        None => return Err(shape_error(res, "body is missing or not valid JSON")),
    };
    let object = match body.as_object() {
        Some(object) => object,
        None => return Err(shape_error(res, "body is not a JSON object")),
    };

    let missing: Vec<&str> = REQUIRED_ERROR_KEYS
        .into_iter()
        .filter(|key| !has_content(object.get(*key)))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(shape_error(
            res,
            &format!("missing or empty key(s): {}", missing.join(", ")),
        ))
    }
}

/// Check that the status is one of `allowed`.
pub fn expect_status(res: &ApiResponse, allowed: &[StatusCode]) -> Result<(), HarnessError> {
    if allowed.contains(&res.status) {
        return Ok(());
    }
    let expected = allowed
        .iter()
        .map(|status| status.as_u16().to_string())
        .collect::<Vec<_>>()
        .join(" or ");
    Err(HarnessError::UnexpectedStatus {
        url: res.url.clone(),
        expected,
        actual: res.status.as_u16(),
    })
}

fn has_content(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn shape_error(res: &ApiResponse, reason: &str) -> HarnessError {
    HarnessError::InvalidErrorShape {
        url: res.url.clone(),
        reason: reason.to_string(),
    }
}
