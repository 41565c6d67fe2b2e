use crate::models::photo_types::Photo;
use serde::{Serialize, Serializer};

/// One publish operation addressed to the display surface.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DisplayEvent {
    Image {
        #[serde(rename = "size", serialize_with = "serialize_photo_size")]
        photo: Photo,
    },
    Message {
        text: String,
    },
    RevealResults,
    HideOnboarding,
}

// Event logs carry the photo's size, not its bytes.
fn serialize_photo_size<S: Serializer>(photo: &Photo, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(photo.len() as u64)
}
