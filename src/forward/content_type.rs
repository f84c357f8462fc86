use mime::Mime;

#[derive(Debug, thiserror::Error)]
#[error("unparseable content-type {value:?}: {source}")]
pub struct ContentTypeError {
    value: String,
    #[source]
    source: mime::FromStrError,
}

/// Reduces a `Content-Type` header to its `type/subtype`, dropping every parameter.
/// A missing header yields an empty string.
pub fn base_media_type(header: Option<&str>) -> Result<String, ContentTypeError> {
    let Some(value) = header else {
        return Ok(String::new());
    };

    // Whitespace is allowed around the `;` that opens the parameter list.
    let essence = value.split(';').next().unwrap_or_default().trim();

    let media_type: Mime = essence.parse().map_err(|source| ContentTypeError {
        value: value.to_string(),
        source,
    })?;

    Ok(media_type.essence_str().to_string())
}
