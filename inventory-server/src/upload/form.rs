//! Product form extractor

use std::collections::HashMap;
use std::path::Path;

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{Form, FromRequest, Multipart, Request};
use http::StatusCode;
use http::header::CONTENT_TYPE;
use image::ImageFormat;

use super::{IMAGE_FIELD, MAX_FILE_SIZE, SUPPORTED_CONTENT_TYPES, SUPPORTED_EXTENSIONS};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Validated image taken from the `image` part
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Filename sent by the browser, if any
    pub original_name: Option<String>,
    pub content_type: String,
    /// Format identified from the magic bytes
    pub format: ImageFormat,
    /// Lower-case extension used for the stored file (no dot)
    pub ext: String,
    pub bytes: Vec<u8>,
}

/// Body of a product create/update request
///
/// Accepts `multipart/form-data` (with an optional `image` part) and
/// `application/x-www-form-urlencoded`.
#[derive(Debug, Default)]
pub struct ProductForm {
    pub fields: HashMap<String, String>,
    pub image: Option<ImageUpload>,
}

impl<S> FromRequest<S> for ProductForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state).await.map_err(|e| {
                AppError::invalid_request(format!("Invalid multipart request: {}", e.body_text()))
            })?;
            read_multipart(multipart).await
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| AppError::invalid_request(e.body_text()))?;
            Ok(Self {
                fields,
                image: None,
            })
        } else {
            Err(AppError::invalid_request(
                "Expected multipart/form-data or application/x-www-form-urlencoded body",
            ))
        }
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::new(ErrorCode::FileTooLarge).with_detail("max_bytes", MAX_FILE_SIZE);
    }
    AppError::validation(format!("Invalid multipart request: {}", err.body_text()))
}

async fn read_multipart(mut multipart: Multipart) -> AppResult<ProductForm> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == IMAGE_FIELD {
            // Browsers send an empty part when no file was chosen
            let Some(image) = read_image(field).await? else {
                continue;
            };
            if form.image.is_some() {
                return Err(AppError::new(ErrorCode::TooManyFiles));
            }
            form.image = Some(image);
        } else if field.file_name().is_some() {
            return Err(
                AppError::invalid_request(format!("Unexpected file field '{name}'"))
                    .with_detail("field", name),
            );
        } else {
            let value = field.text().await.map_err(multipart_error)?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

async fn read_image(mut field: Field<'_>) -> AppResult<Option<ImageUpload>> {
    let original_name = field
        .file_name()
        .filter(|n| !n.is_empty())
        .map(str::to_string);
    let content_type = field
        .content_type()
        .unwrap_or_default()
        .to_ascii_lowercase();

    let mut bytes = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if bytes.len() + chunk.len() > MAX_FILE_SIZE {
            return Err(AppError::new(ErrorCode::FileTooLarge).with_detail("max_bytes", MAX_FILE_SIZE));
        }
        bytes.extend_from_slice(&chunk);
    }

    if bytes.is_empty() {
        return Ok(None);
    }

    if !SUPPORTED_CONTENT_TYPES.contains(&content_type.as_str()) {
        return Err(AppError::new(ErrorCode::UnsupportedFileFormat).with_detail("content_type", content_type));
    }

    let format = match image::guess_format(&bytes) {
        Ok(f @ (ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP)) => f,
        _ => return Err(AppError::new(ErrorCode::InvalidImageFile)),
    };

    let ext = original_name
        .as_deref()
        .and_then(|n| Path::new(n).extension())
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|e| SUPPORTED_EXTENSIONS.contains(&e.as_str()))
        .unwrap_or_else(|| format_extension(format).to_string());

    Ok(Some(ImageUpload {
        original_name,
        content_type,
        format,
        ext,
        bytes,
    }))
}

fn format_extension(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "png",
        ImageFormat::WebP => "webp",
        _ => "jpg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use std::io::Cursor;

    const BOUNDARY: &str = "----inventory-test-boundary";

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbImage::new(2, 2);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a str, &'a [u8]),
    }

    fn multipart_request(parts: &[Part<'_>]) -> Request {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                            .as_bytes(),
                    );
                }
                Part::File(name, filename, content_type, data) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(data);
                    body.extend_from_slice(b"\r\n");
                }
            }
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/products")
            .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(body))
            .unwrap()
    }

    async fn extract(req: Request) -> AppResult<ProductForm> {
        ProductForm::from_request(req, &()).await
    }

    #[tokio::test]
    async fn test_multipart_fields_and_image() {
        let png = png_bytes();
        let form = extract(multipart_request(&[
            Part::Text("name", "Widget"),
            Part::Text("price", "9.99"),
            Part::File("image", "Photo.PNG", "image/png", &png),
        ]))
        .await
        .unwrap();

        assert_eq!(form.fields["name"], "Widget");
        assert_eq!(form.fields["price"], "9.99");
        let image = form.image.unwrap();
        assert_eq!(image.format, ImageFormat::Png);
        assert_eq!(image.ext, "png");
        assert_eq!(image.original_name.as_deref(), Some("Photo.PNG"));
        assert_eq!(image.bytes, png);
    }

    #[tokio::test]
    async fn test_empty_image_part_is_none() {
        let form = extract(multipart_request(&[
            Part::Text("name", "Widget"),
            Part::File("image", "", "application/octet-stream", b""),
        ]))
        .await
        .unwrap();
        assert!(form.image.is_none());
    }

    #[tokio::test]
    async fn test_rejects_disallowed_content_type() {
        let err = extract(multipart_request(&[Part::File(
            "image",
            "notes.txt",
            "text/plain",
            b"hello",
        )]))
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedFileFormat);
    }

    #[tokio::test]
    async fn test_rejects_spoofed_image() {
        let err = extract(multipart_request(&[Part::File(
            "image",
            "fake.png",
            "image/png",
            b"definitely not a png",
        )]))
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidImageFile);
    }

    #[tokio::test]
    async fn test_rejects_second_image() {
        let png = png_bytes();
        let err = extract(multipart_request(&[
            Part::File("image", "a.png", "image/png", &png),
            Part::File("image", "b.png", "image/png", &png),
        ]))
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::TooManyFiles);
    }

    #[tokio::test]
    async fn test_extension_falls_back_to_format() {
        let png = png_bytes();
        let form = extract(multipart_request(&[Part::File(
            "image",
            "upload",
            "image/png",
            &png,
        )]))
        .await
        .unwrap();
        assert_eq!(form.image.unwrap().ext, "png");
    }

    #[tokio::test]
    async fn test_urlencoded_body() {
        let req = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("name=Blue+Pen&stock_quantity=3"))
            .unwrap();
        let form = extract(req).await.unwrap();
        assert_eq!(form.fields["name"], "Blue Pen");
        assert_eq!(form.fields["stock_quantity"], "3");
        assert!(form.image.is_none());
    }

    #[tokio::test]
    async fn test_rejects_json_body() {
        let req = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        assert_eq!(extract(req).await.unwrap_err().code, ErrorCode::InvalidRequest);
    }
}
