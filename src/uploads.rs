//! Image upload pipeline for listing photos and blog covers.

use crate::auth::token::generate_token_default;
use crate::errors::ServerError;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::path::{Path, PathBuf};

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
const MAX_EDGE_PX: u32 = 2000;
const JPEG_QUALITY: u8 = 85;

/// Where an upload lands under the upload dir, mirrored in the public URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Properties,
    Posts,
}

impl UploadKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "properties" => Some(UploadKind::Properties),
            "posts" => Some(UploadKind::Posts),
            _ => None,
        }
    }

    fn dir_name(&self) -> &'static str {
        match self {
            UploadKind::Properties => "properties",
            UploadKind::Posts => "posts",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoredImage {
    /// Public URL like "/uploads/properties/<token>.jpg".
    pub url: String,
    pub width: u32,
    pub height: u32,
}

fn format_from_content_type(content_type: &str) -> Option<ImageFormat> {
    match content_type {
        "image/jpeg" => Some(ImageFormat::Jpeg),
        "image/png" => Some(ImageFormat::Png),
        "image/webp" => Some(ImageFormat::WebP),
        _ => None,
    }
}

fn resize_if_needed(img: DynamicImage) -> DynamicImage {
    let (width, height) = img.dimensions();
    if width <= MAX_EDGE_PX && height <= MAX_EDGE_PX {
        return img;
    }
    // keep aspect ratio, longest edge capped
    img.resize(MAX_EDGE_PX, MAX_EDGE_PX, FilterType::Lanczos3)
}

/// Validate, decode, downscale and persist one uploaded image.
///
/// The byte limit is checked before decoding; PNG input stays PNG to keep
/// transparency, everything else is re-encoded as JPEG.
pub fn store_image(
    upload_dir: &Path,
    kind: UploadKind,
    content_type: &str,
    bytes: &[u8],
) -> Result<StoredImage, ServerError> {
    if bytes.is_empty() {
        return Err(ServerError::UploadError("arquivo vazio".into()));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ServerError::UploadError("arquivo maior que 5 MB".into()));
    }
    let format = format_from_content_type(content_type).ok_or_else(|| {
        ServerError::UploadError("formato não suportado (use JPEG, PNG ou WebP)".into())
    })?;

    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ServerError::UploadError(format!("imagem inválida: {e}")))?;
    let img = resize_if_needed(img);
    let (width, height) = img.dimensions();

    let (out_format, extension) = match format {
        ImageFormat::Png => (ImageFormat::Png, "png"),
        _ => (ImageFormat::Jpeg, "jpg"),
    };

    let dir = upload_dir.join(kind.dir_name());
    std::fs::create_dir_all(&dir)
        .map_err(|e| ServerError::UploadError(format!("falha ao criar diretório: {e}")))?;

    let filename = format!("{}.{extension}", generate_token_default());
    let path: PathBuf = dir.join(&filename);

    write_image(&img, &path, out_format)?;

    Ok(StoredImage {
        url: format!("/uploads/{}/{filename}", kind.dir_name()),
        width,
        height,
    })
}

fn write_image(img: &DynamicImage, path: &Path, format: ImageFormat) -> Result<(), ServerError> {
    let file = std::fs::File::create(path)
        .map_err(|e| ServerError::UploadError(format!("falha ao gravar arquivo: {e}")))?;
    let mut writer = std::io::BufWriter::new(file);

    match format {
        ImageFormat::Jpeg => {
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
            img.to_rgb8()
                .write_with_encoder(encoder)
                .map_err(|e| ServerError::UploadError(format!("falha ao codificar: {e}")))?;
        }
        _ => {
            img.write_to(&mut writer, format)
                .map_err(|e| ServerError::UploadError(format!("falha ao codificar: {e}")))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            image::Rgb([120, 80, 40]),
        ));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Jpeg).unwrap();
        out.into_inner()
    }

    #[test]
    fn stores_jpeg_and_reports_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = jpeg_bytes(640, 480);

        let stored =
            store_image(dir.path(), UploadKind::Properties, "image/jpeg", &bytes).unwrap();
        assert!(stored.url.starts_with("/uploads/properties/"));
        assert!(stored.url.ends_with(".jpg"));
        assert_eq!((stored.width, stored.height), (640, 480));

        let on_disk = dir.path().join(stored.url.trim_start_matches("/uploads/"));
        assert!(on_disk.exists());
    }

    #[test]
    fn downscales_oversized_images() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = jpeg_bytes(3000, 1500);

        let stored = store_image(dir.path(), UploadKind::Posts, "image/jpeg", &bytes).unwrap();
        assert_eq!(stored.width, 2000);
        assert_eq!(stored.height, 1000);
    }

    #[test]
    fn rejects_wrong_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let err = store_image(dir.path(), UploadKind::Properties, "image/gif", &[1, 2, 3])
            .unwrap_err();
        assert!(matches!(err, ServerError::UploadError(_)));
    }

    #[test]
    fn rejects_oversized_body() {
        let dir = tempfile::tempdir().unwrap();
        let big = vec![0u8; MAX_UPLOAD_BYTES + 1];
        let err =
            store_image(dir.path(), UploadKind::Properties, "image/jpeg", &big).unwrap_err();
        assert!(matches!(err, ServerError::UploadError(_)));
    }

    #[test]
    fn rejects_garbage_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let err = store_image(dir.path(), UploadKind::Properties, "image/jpeg", &[0u8; 64])
            .unwrap_err();
        assert!(matches!(err, ServerError::UploadError(_)));
    }
}
