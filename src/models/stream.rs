use serde::Deserialize;

/// Index reported for a stream event whose record carried no usable index.
pub const MISSING_INDEX: i64 = -1;

/// Raw wire record for one line of the streaming response body.
///
/// `index` is kept as a loose JSON value so a non-numeric index degrades to
/// the [`MISSING_INDEX`] sentinel instead of failing the whole line.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamLine {
    #[serde(default)]
    pub index: Option<serde_json::Value>,
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One decoded unit from the streaming endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEvent {
    pub index: i64,
    pub image_base64: String,
}

impl StreamEvent {
    /// Build an event from a parsed line that carries an image payload.
    pub(crate) fn from_line(line: &StreamLine, image_base64: String) -> Self {
        let index = line
            .index
            .as_ref()
            .and_then(|value| value.as_i64())
            .unwrap_or(MISSING_INDEX);
        StreamEvent {
            index,
            image_base64,
        }
    }
}
