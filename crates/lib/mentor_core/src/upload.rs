//! Image upload validation.
//!
//! Attachments are checked before the relay sees them: the declared MIME type
//! must be `image/*` and the payload must not exceed the size limit. The HTTP
//! layer calls [`UploadPolicy::check_size`] while streaming so oversized
//! uploads are rejected without buffering the whole body.

use thiserror::Error;

/// Maximum accepted image size (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Typed rejection for an image attachment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("File size too large. Maximum {}MB allowed.", .limit / (1024 * 1024))]
    TooLarge { limit: usize },

    #[error("Only image files are allowed")]
    UnsupportedType(String),
}

/// Size and type constraints for image attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: MAX_IMAGE_BYTES,
        }
    }
}

impl UploadPolicy {
    /// Accept only `image/*` content types; returns the normalized MIME type.
    pub fn check_mime(&self, content_type: Option<&str>) -> Result<String, UploadError> {
        let mime = content_type.unwrap_or_default().trim();
        // Drop parameters such as `; charset=...`.
        let essence = mime.split(';').next().unwrap_or_default().trim().to_lowercase();
        match essence.strip_prefix("image/") {
            Some(subtype) if !subtype.is_empty() => Ok(essence),
            _ => Err(UploadError::UnsupportedType(mime.to_string())),
        }
    }

    pub fn check_size(&self, len: usize) -> Result<(), UploadError> {
        if len > self.max_bytes {
            return Err(UploadError::TooLarge {
                limit: self.max_bytes,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_image_types() {
        let policy = UploadPolicy::default();
        assert_eq!(policy.check_mime(Some("image/png")).unwrap(), "image/png");
        assert_eq!(policy.check_mime(Some("IMAGE/JPEG")).unwrap(), "image/jpeg");
        assert_eq!(
            policy.check_mime(Some("image/webp; q=0.9")).unwrap(),
            "image/webp"
        );
    }

    #[test]
    fn rejects_non_image_types() {
        let policy = UploadPolicy::default();
        for ct in [None, Some(""), Some("text/plain"), Some("application/pdf"), Some("image/")] {
            assert!(
                matches!(policy.check_mime(ct), Err(UploadError::UnsupportedType(_))),
                "{ct:?} should be rejected"
            );
        }
    }

    #[test]
    fn six_megabyte_image_is_too_large() {
        let policy = UploadPolicy::default();
        let err = policy.check_size(6 * 1024 * 1024).unwrap_err();
        assert_eq!(err, UploadError::TooLarge { limit: MAX_IMAGE_BYTES });
        assert_eq!(err.to_string(), "File size too large. Maximum 5MB allowed.");
    }

    #[test]
    fn exactly_at_limit_is_accepted() {
        let policy = UploadPolicy::default();
        assert!(policy.check_size(MAX_IMAGE_BYTES).is_ok());
        assert!(policy.check_size(MAX_IMAGE_BYTES + 1).is_err());
    }
}
