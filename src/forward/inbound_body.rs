use axum::response::{IntoResponse, Response};
use http::StatusCode;
use mime::Mime;
use serde_json::{Map, Value};

pub(crate) const INVALID_JSON_BODY_MESSAGE: &str = "Invalid JSON body";

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum InboundBodyError {
    #[error("malformed JSON body: {0}")]
    Malformed(String),

    #[error("JSON body must be an object or an array")]
    NotAContainer,
}

impl IntoResponse for InboundBodyError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, INVALID_JSON_BODY_MESSAGE).into_response()
    }
}

/// Turns the raw `/api/fetch` body into the JSON value sent upstream.
///
/// JSON bodies are parsed strictly, URL-encoded forms become an object of strings and
/// every other media type forwards an empty object.
pub fn decode_inbound_body(content_type: Option<&str>, body: &[u8]) -> Result<Value, InboundBodyError> {
    match body_decoder(content_type) {
        Some(BodyDecoder::Json) => decode_json(body),
        Some(BodyDecoder::Form) => Ok(decode_form(body)),
        None => Ok(Value::Object(Map::new())),
    }
}

/// Whether a body of this media type is decoded at all. Other bodies are never buffered.
pub fn reads_body(content_type: Option<&str>) -> bool {
    body_decoder(content_type).is_some()
}

enum BodyDecoder {
    Json,
    Form,
}

fn body_decoder(content_type: Option<&str>) -> Option<BodyDecoder> {
    let media_type = content_type.and_then(|value| value.parse::<Mime>().ok())?;

    if media_type.type_() != mime::APPLICATION {
        None
    } else if media_type.subtype() == mime::JSON {
        Some(BodyDecoder::Json)
    } else if media_type.subtype() == mime::WWW_FORM_URLENCODED {
        Some(BodyDecoder::Form)
    } else {
        None
    }
}

fn decode_json(body: &[u8]) -> Result<Value, InboundBodyError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| InboundBodyError::Malformed(e.to_string()))?;

    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        _ => Err(InboundBodyError::NotAContainer),
    }
}

fn decode_form(body: &[u8]) -> Value {
    let mut fields = Map::new();

    for (key, value) in url::form_urlencoded::parse(body) {
        let value = Value::String(value.into_owned());
        match fields.get_mut(key.as_ref()) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                fields.insert(key.into_owned(), value);
            }
        }
    }

    Value::Object(fields)
}
