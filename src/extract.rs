use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::{error::AppError, validation::ValidationErrors};

/// `Json<T>` whose rejections come back as validation errors in the usual
/// error envelope instead of axum's plain-text body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidJson(value)),
            Err(rejection) => Err(rejection_to_error(&rejection)),
        }
    }
}

fn rejection_to_error(rejection: &JsonRejection) -> AppError {
    let mut errors = ValidationErrors::new();
    match rejection {
        JsonRejection::JsonDataError(_) => {
            let (field, message) = field_violation(&rejection.body_text());
            errors.add(field, message);
        }
        _ => errors.add("body", rejection.body_text()),
    }
    tracing::debug!(error = %rejection.body_text(), "request body rejected");
    AppError::Validation(errors)
}

/// Splits a serde data error such as
/// `...target type: items[0]: missing field `quantity` at line 1 column 9`
/// into the offending field path and a short message.
fn field_violation(detail: &str) -> (String, String) {
    let detail = detail
        .split_once("target type: ")
        .map_or(detail, |(_, rest)| rest);
    let detail = match detail.rfind(" at line ") {
        Some(at) if detail[at..].contains(" column ") => &detail[..at],
        _ => detail,
    };

    let (path, message) = match detail.split_once(": ") {
        Some((path, message)) if !path.is_empty() && !path.contains(char::is_whitespace) => {
            (path, message)
        }
        _ => ("", detail),
    };

    let missing = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.strip_suffix('`'));
    let field = match (path, missing) {
        ("", Some(name)) => name.to_string(),
        (path, Some(name)) => format!("{path}.{name}"),
        ("", None) => "body".to_string(),
        (path, None) => path.to_string(),
    };
    let message = if missing.is_some() {
        "is required".to_string()
    } else {
        message.to_string()
    };
    (field, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

    #[test]
    fn missing_top_level_field() {
        let (field, message) =
            field_violation(&format!("{PREFIX}missing field `price` at line 1 column 28"));
        assert_eq!(field, "price");
        assert_eq!(message, "is required");
    }

    #[test]
    fn wrongly_typed_nested_field() {
        let (field, message) = field_violation(&format!(
            "{PREFIX}items[0].quantity: invalid type: string \"two\", expected i32 at line 1 column 60"
        ));
        assert_eq!(field, "items[0].quantity");
        assert_eq!(message, "invalid type: string \"two\", expected i32");
    }

    #[test]
    fn missing_nested_field() {
        let (field, _) =
            field_violation(&format!("{PREFIX}items[1]: missing field `quantity` at line 1 column 90"));
        assert_eq!(field, "items[1].quantity");
    }

    #[test]
    fn root_type_mismatch_names_the_body() {
        let (field, message) = field_violation(&format!(
            "{PREFIX}invalid type: sequence, expected struct CreateProductRequest at line 1 column 0"
        ));
        assert_eq!(field, "body");
        assert!(message.starts_with("invalid type: sequence"));
    }
}
