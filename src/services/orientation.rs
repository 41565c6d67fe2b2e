use exif::{In, Tag, Value};
use image::DynamicImage;
use std::io::Cursor;

/// Read the EXIF orientation tag from an encoded photo.
///
/// Photos without EXIF data, or without the tag, are upright (1).
/// Returns `None` when the tag is present but not a value in 1..=8.
pub fn read_orientation(bytes: &[u8]) -> Option<u32> {
    let exif = match exif::Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(e) => e,
        Err(_) => return Some(1),
    };

    let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) else {
        return Some(1);
    };

    let value = match field.value {
        Value::Short(ref v) => v.first().map(|&x| x as u32),
        Value::Long(ref v) => v.first().copied(),
        _ => None,
    };

    value.filter(|v| (1..=8).contains(v))
}

/// Apply an EXIF orientation so the image is upright.
pub fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.fliph().rotate90(),
        6 => img.rotate90(),
        7 => img.fliph().rotate270(),
        8 => img.rotate270(),
        _ => img,
    }
}
