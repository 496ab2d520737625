use access::errors::ErrorResponse;
use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use validator::{Validate, ValidationError, ValidationErrors};

pub type ValidationRejection = (StatusCode, Json<ErrorResponse>);

/// JSON body that has also passed its `validator` rules.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let mut body = ErrorResponse::fail(rejection.body_text());
                body.code = Some("invalid_json".into());
                (rejection.status(), Json(body))
            })?;

        value.validate().map_err(|errors| {
            let (summary, details) = describe(&errors);
            let mut body = ErrorResponse::fail(summary);
            body.code = Some("validation_failed".into());
            body.details = Some(details);
            (StatusCode::BAD_REQUEST, Json(body))
        })?;

        Ok(Self(value))
    }
}

fn message_for(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    match error.code.as_ref() {
        "email" => "Invalid email format".to_string(),
        "length" => "Invalid length".to_string(),
        "range" => "Value out of range".to_string(),
        _ => format!("Invalid {field}"),
    }
}

/// One-line summary plus a `field -> [messages]` map.
fn describe(errors: &ValidationErrors) -> (String, Value) {
    let mut lines = Vec::new();
    let mut by_field = Map::new();

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| message_for(&field, e))
            .collect();
        lines.extend(messages.iter().map(|m| format!("{field}: {m}")));
        by_field.insert(field.to_string(), json!(messages));
    }

    let summary = if lines.is_empty() {
        "Validation failed".to_string()
    } else {
        lines.join("; ")
    };

    (summary, Value::Object(by_field))
}
