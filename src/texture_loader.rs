use std::io::Cursor;
use log::{debug, warn};
use raylib::prelude::*;
use exif::{Reader, Tag, Value, In};

use crate::error::TextureError;

/// File type hint raylib needs to decode from memory, taken from the label.
pub fn extension_hint(label: &str) -> String {
    match label.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && !ext.contains('/') => format!(".{}", ext.to_lowercase()),
        _ => ".png".to_string(),
    }
}

/// EXIF orientation tag of JPEG bytes; 1 (no rotation) when absent or unreadable.
pub fn exif_orientation(label: &str, bytes: &[u8]) -> u16 {
    let hint = extension_hint(label);
    if hint != ".jpg" && hint != ".jpeg" {
        return 1;
    }

    match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => match exif.get_field(Tag::Orientation, In::PRIMARY).map(|f| &f.value) {
            Some(Value::Short(values)) if !values.is_empty() => values[0],
            _ => 1,
        },
        Err(e) => {
            // Non-critical: show the image unrotated
            warn!("Could not read EXIF data for {}: {}", label, e);
            1
        }
    }
}

/// Decodes downloaded bytes, applies EXIF rotation and uploads a texture.
/// Must run on the thread that owns the window.
pub fn texture_from_bytes(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    label: &str,
    bytes: &[u8],
) -> Result<Texture2D, TextureError> {
    let orientation = exif_orientation(label, bytes);

    let mut image = Image::load_image_from_mem(&extension_hint(label), bytes)
        .map_err(|e| TextureError::Decode { label: label.to_string(), reason: e.to_string() })?;

    // 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise.
    // Flipped orientations are shown as stored.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if orientation != 1 {
        debug!("Applied EXIF orientation {} to {}", orientation, label);
    }

    let texture = rl
        .load_texture_from_image(thread, &image)
        .map_err(|e| TextureError::Upload { label: label.to_string(), reason: e.to_string() })?;

    // Free the CPU-side copy now that the GPU has it
    drop(image);

    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_comes_from_label_extension() {
        assert_eq!(extension_hint("IMG_0001.JPG"), ".jpg");
        assert_eq!(extension_hint("holiday.photo.png"), ".png");
        assert_eq!(extension_hint("no_extension"), ".png");
    }

    #[test]
    fn non_jpeg_bytes_are_not_rotated() {
        assert_eq!(exif_orientation("a.png", b"\x89PNG"), 1);
    }

    #[test]
    fn unreadable_jpeg_exif_means_no_rotation() {
        assert_eq!(exif_orientation("a.jpg", b"not a jpeg"), 1);
    }

    /// Smallest JPEG carrying an APP1 EXIF block with one Orientation entry.
    fn jpeg_with_orientation(orientation: u8) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x22];
        bytes.extend_from_slice(b"Exif\0\0");
        // Big-endian TIFF header, first IFD at offset 8
        bytes.extend_from_slice(&[0x4D, 0x4D, 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08]);
        // One entry: Orientation (0x0112), SHORT, count 1
        bytes.extend_from_slice(&[0x00, 0x01]);
        bytes.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, 0x00, orientation, 0x00, 0x00]);
        bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        bytes.extend_from_slice(&[0xFF, 0xD9]);
        bytes
    }

    #[test]
    fn reads_orientation_from_jpeg_exif() {
        assert_eq!(exif_orientation("rotated.jpg", &jpeg_with_orientation(6)), 6);
        assert_eq!(exif_orientation("upside_down.JPEG", &jpeg_with_orientation(3)), 3);
    }

    #[test]
    fn orientation_is_ignored_for_non_jpeg_labels() {
        assert_eq!(exif_orientation("rotated.png", &jpeg_with_orientation(6)), 1);
    }
}
