use crate::error::OverlayError;
use crate::image_utils::image_io::read_image_as_rgba8;
use image::RgbaImage;
use percent_encoding::percent_decode_str;
use std::path::PathBuf;

/// An opaque reference to bitmap data: a filesystem path or a `file://` URL.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageReference {
    url: String,
}

impl ImageReference {
    pub fn new(url: impl Into<String>) -> Self {
        ImageReference { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The filesystem path to read. `file://` URLs have their `%XX` escapes decoded; plain paths
    /// are used as given.
    pub fn path(&self) -> PathBuf {
        match self.url.strip_prefix("file://") {
            Some(rest) => PathBuf::from(percent_decode_str(rest).decode_utf8_lossy().into_owned()),
            None => PathBuf::from(&self.url),
        }
    }
}

/// Pixels of a decoded image together with the reference they were decoded from.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub reference: ImageReference,
    pub pixels: RgbaImage,
}

impl DecodedImage {
    pub fn natural_width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn natural_height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Identifies one decode request. Only the ticket of the latest request may commit its result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeTicket {
    pub generation: u64,
    pub reference: ImageReference,
}

#[derive(Debug)]
pub struct DecodeOutcome {
    pub ticket: DecodeTicket,
    pub result: Result<RgbaImage, OverlayError>,
}

/// Decodes the ticket's image on the blocking pool.
///
/// The outcome carries the ticket back so the caller can drop results for images that were
/// swapped out while decoding.
pub async fn decode_image(ticket: DecodeTicket) -> DecodeOutcome {
    let path = ticket.reference.path();
    let result = match tokio::task::spawn_blocking(move || read_image_as_rgba8(&path)).await {
        Ok(result) => result,
        Err(err) => Err(OverlayError::DecodeTask(err.to_string())),
    };
    DecodeOutcome { ticket, result }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_utils::image_io::save_png;
    use image::Rgba;

    #[test]
    fn file_urls_resolve_to_paths() {
        assert_eq!(
            ImageReference::new("file:///tmp/leaf.jpg").path(),
            PathBuf::from("/tmp/leaf.jpg")
        );
        assert_eq!(ImageReference::new("leaf.jpg").path(), PathBuf::from("leaf.jpg"));
    }

    #[test]
    fn file_urls_are_percent_decoded() {
        assert_eq!(
            ImageReference::new("file:///tmp/my%20leaf.jpg").path(),
            PathBuf::from("/tmp/my leaf.jpg")
        );
        // plain paths may legitimately contain '%'
        assert_eq!(ImageReference::new("50%20.jpg").path(), PathBuf::from("50%20.jpg"));
    }

    #[tokio::test]
    async fn decodes_on_blocking_pool() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaf.png");
        save_png(&RgbaImage::from_pixel(6, 4, Rgba([10, 200, 10, 255])), &path).unwrap();
        let ticket = DecodeTicket {
            generation: 3,
            reference: ImageReference::new(path.to_string_lossy()),
        };

        let outcome = decode_image(ticket.clone()).await;
        assert_eq!(outcome.ticket, ticket);
        assert_eq!(outcome.result.unwrap().dimensions(), (6, 4));
    }

    #[tokio::test]
    async fn missing_file_reports_error() {
        let ticket = DecodeTicket {
            generation: 1,
            reference: ImageReference::new("./missing.png"),
        };
        let outcome = decode_image(ticket).await;
        assert!(outcome.result.is_err());
    }
}
