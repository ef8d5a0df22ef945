//! Media upload gateway
//!
//! Forwards image uploads to the hosted media CDN using its unsigned
//! multipart contract and returns the CDN's `secure_url` / `public_id`
//! pair. Uploads are not retried; a failure surfaces to the caller and the
//! upload is abandoned.

use serde::Deserialize;
use tracing::{info, instrument};

use crate::dto::MediaUploadResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Shape of the CDN's upload response (only the fields we persist)
#[derive(Debug, Deserialize)]
struct CdnUploadResponse {
    secure_url: String,
    public_id: String,
}

/// Media upload service
pub struct MediaService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MediaService<'a> {
    /// Create a new MediaService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Upload one image to the media CDN.
    ///
    /// The CDN contract is a multipart POST with a `file` part and an
    /// `upload_preset` part; the response JSON exposes `secure_url` (what
    /// message images persist) and `public_id` (what avatars persist).
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(
        &self,
        filename: String,
        content_type: String,
        bytes: Vec<u8>,
    ) -> ServiceResult<MediaUploadResponse> {
        let config = self.ctx.media_config();

        let file_part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename)
            .mime_str(&content_type)
            .map_err(|e| ServiceError::validation(format!("Invalid content type: {e}")))?;

        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("upload_preset", config.upload_preset.clone());

        let response = self
            .ctx
            .http_client()
            .post(config.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| ServiceError::external(format!("Upload request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ServiceError::external(format!(
                "Upload rejected with status {}",
                response.status()
            )));
        }

        let body: CdnUploadResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::external(format!("Invalid upload response: {e}")))?;

        info!(public_id = %body.public_id, "Image uploaded");

        Ok(MediaUploadResponse {
            secure_url: body.secure_url,
            public_id: body.public_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdn_response_parsing() {
        let json = r#"{
            "secure_url": "https://res.cloudinary.com/demo/image/upload/v1/sample.png",
            "public_id": "v1/sample",
            "width": 640,
            "height": 480
        }"#;
        let parsed: CdnUploadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.public_id, "v1/sample");
        assert!(parsed.secure_url.starts_with("https://"));
    }
}
