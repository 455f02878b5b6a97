use std::io::Read;

use image::DynamicImage;

use crate::error::ExportError;

/// A fetched and decoded image with its intrinsic pixel dimensions.
#[derive(Debug)]
pub struct LoadedImage {
    pub width_px: u32,
    pub height_px: u32,
    pub image: DynamicImage,
}

/// Fetch-and-decode collaborator. Behind a trait so layout code can be
/// tested with stubbed failures.
pub trait ImageLoader {
    fn load(&self, source: &str) -> Result<LoadedImage, ExportError>;
}

/// Loads http(s) URLs via ureq; anything else is read as a file path.
pub struct UreqImageLoader;

impl ImageLoader for UreqImageLoader {
    fn load(&self, source: &str) -> Result<LoadedImage, ExportError> {
        let bytes = if source.starts_with("http://") || source.starts_with("https://") {
            let response = ureq::get(source)
                .call()
                .map_err(|e| ExportError::ImageLoad(format!("Failed to fetch URL: {}", e)))?;

            let mut bytes = Vec::new();
            response
                .into_reader()
                .read_to_end(&mut bytes)
                .map_err(|e| ExportError::ImageLoad(format!("Failed to read response: {}", e)))?;
            bytes
        } else {
            std::fs::read(source)
                .map_err(|e| ExportError::ImageLoad(format!("{}: {}", source, e)))?
        };

        let image = image::load_from_memory(&bytes)
            .map_err(|e| ExportError::ImageLoad(format!("Failed to decode image: {}", e)))?;

        let rgba = image.to_rgba8();
        let (width_px, height_px) = rgba.dimensions();
        Ok(LoadedImage {
            width_px,
            height_px,
            image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_typed_failure() {
        let err = UreqImageLoader
            .load("definitely/not/here.png")
            .expect_err("load should fail");
        assert!(matches!(err, ExportError::ImageLoad(_)));
    }
}
