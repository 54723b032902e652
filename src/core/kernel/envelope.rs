use crate::core::errors::ExchangeError;
use serde_json::Value;

/// Classify a raw response as success payload or error
///
/// A non-200 status is a transport error regardless of body. A 200 body that
/// is a JSON object with `"status": "error"` is a domain error; anything else
/// is returned unexamined.
pub fn parse(raw_body: &[u8], http_status: u16) -> Result<Value, ExchangeError> {
    if http_status != 200 {
        return Err(ExchangeError::HttpStatus {
            status: http_status,
        });
    }

    let value: Value = serde_json::from_slice(raw_body)?;

    if let Some(object) = value.as_object() {
        if object.get("status").and_then(Value::as_str) == Some("error") {
            return Err(ExchangeError::ApiError {
                reason: object.get("reason").map(render_reason).unwrap_or_default(),
                code: object
                    .get("code")
                    .map(render_scalar)
                    .unwrap_or_default(),
            });
        }
    }

    Ok(value)
}

// `reason` is usually a string but field errors arrive as an object of lists
fn render_reason(reason: &Value) -> String {
    match reason {
        Value::Object(fields) => fields
            .iter()
            .map(|(field, messages)| {
                let text = match messages {
                    Value::Array(items) => items
                        .iter()
                        .map(render_scalar)
                        .collect::<Vec<_>>()
                        .join(" "),
                    other => render_scalar(other),
                };
                if field == "__all__" {
                    text
                } else {
                    format!("{}: {}", field, text)
                }
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => render_scalar(other),
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
