//! Avatar descriptor

use serde::{Deserialize, Serialize};

/// Reference to an avatar image, as consumed by the mail client
///
/// Cached as JSON (`{"isExternal":true,"mime":"image/jpeg","url":"..."}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarDescriptor {
    /// Whether the image is hosted outside the mail platform
    pub is_external: bool,
    /// MIME type of the image
    pub mime: String,
    /// Image location
    pub url: String,
}

impl AvatarDescriptor {
    /// Descriptor for a JPEG hosted by the directory
    pub fn external_jpeg(url: impl Into<String>) -> Self {
        Self {
            is_external: true,
            mime: "image/jpeg".to_string(),
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_jpeg_sets_fixed_fields() {
        let avatar = AvatarDescriptor::external_jpeg("https://img.example.com/face/1.jpg");
        assert!(avatar.is_external);
        assert_eq!(avatar.mime, "image/jpeg");
        assert_eq!(avatar.url, "https://img.example.com/face/1.jpg");
    }

    #[test]
    fn json_uses_camel_case() {
        let avatar = AvatarDescriptor::external_jpeg("u");
        let json = serde_json::to_value(&avatar).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"isExternal": true, "mime": "image/jpeg", "url": "u"})
        );
    }
}
