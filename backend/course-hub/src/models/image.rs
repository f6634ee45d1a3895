use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Serialize, Serializer};

/// Content type recorded when an upload part does not declare one
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/png";

/// Uploaded image stored alongside a record.
///
/// The bytes are opaque to the service; they are returned base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    #[serde(serialize_with = "serialize_base64")]
    pub data: Vec<u8>,
    #[serde(rename = "contentType")]
    pub content_type: String,
}

impl Image {
    pub fn new(data: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            data,
            content_type: content_type
                .filter(|ct| !ct.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE_CONTENT_TYPE.to_string()),
        }
    }

    /// Rebuild from the nullable column pair used by the SQL store
    pub fn from_columns(data: Option<Vec<u8>>, content_type: Option<String>) -> Option<Self> {
        data.map(|data| Self::new(data, content_type))
    }
}

fn serialize_base64<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(data))
}
