//! Test doubles shared by the unit tests.

use crate::error::AppError;
use crate::models::display_types::DisplayEvent;
use crate::models::photo_types::Photo;
use crate::models::prediction_types::Prediction;
use crate::services::classifier::ImageClassifier;
use crate::services::display::DisplaySurface;
use image::{DynamicImage, ImageFormat, RgbImage};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Mutex};

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Png)
}

/// A 4x2 JPEG carrying an EXIF orientation tag with the given value.
pub fn jpeg_with_orientation(orientation: u16) -> Vec<u8> {
    let jpeg = encode(4, 2, ImageFormat::Jpeg);

    let mut exif = Vec::new();
    exif.extend_from_slice(b"Exif\0\0");
    // Big-endian TIFF header, first IFD at offset 8.
    exif.extend_from_slice(&[b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08]);
    // One entry: Orientation (0x0112), SHORT, count 1.
    exif.extend_from_slice(&[0x00, 0x01]);
    exif.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01]);
    exif.extend_from_slice(&orientation.to_be_bytes());
    exif.extend_from_slice(&[0x00, 0x00]);
    // No next IFD.
    exif.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

    let segment_len = (exif.len() + 2) as u16;
    let mut out = Vec::with_capacity(jpeg.len() + exif.len() + 4);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(&exif);
    out.extend_from_slice(&jpeg[2..]);
    out
}

fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

struct Script {
    result: Result<Vec<Prediction>, String>,
    gate: Option<Mutex<mpsc::Receiver<()>>>,
    panics: bool,
}

/// Classifier that answers by the width of the image it receives.
#[derive(Default)]
pub struct ScriptedClassifier {
    scripts: HashMap<u32, Script>,
    calls: AtomicUsize,
    seen: Mutex<Vec<(u32, u32)>>,
}

impl ScriptedClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, width: u32, predictions: Vec<Prediction>) -> Self {
        self.scripts.insert(
            width,
            Script {
                result: Ok(predictions),
                gate: None,
                panics: false,
            },
        );
        self
    }

    pub fn fail(mut self, width: u32, message: &str) -> Self {
        self.scripts.insert(
            width,
            Script {
                result: Err(message.to_string()),
                gate: None,
                panics: false,
            },
        );
        self
    }

    /// The classifier panics with `message` instead of answering.
    pub fn panic(mut self, width: u32, message: &str) -> Self {
        self.scripts.insert(
            width,
            Script {
                result: Err(message.to_string()),
                gate: None,
                panics: true,
            },
        );
        self
    }

    /// Like `respond`, but the call blocks until the returned sender fires.
    pub fn gated(mut self, width: u32, predictions: Vec<Prediction>) -> (Self, mpsc::Sender<()>) {
        let (tx, rx) = mpsc::channel();
        self.scripts.insert(
            width,
            Script {
                result: Ok(predictions),
                gate: Some(Mutex::new(rx)),
                panics: false,
            },
        );
        (self, tx)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<(u32, u32)> {
        self.seen.lock().unwrap().clone()
    }
}

impl ImageClassifier for ScriptedClassifier {
    fn classify(&self, image: &DynamicImage) -> Result<Vec<Prediction>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push((image.width(), image.height()));

        let script = self
            .scripts
            .get(&image.width())
            .ok_or_else(|| AppError::from(format!("no script for width {}", image.width())))?;

        if let Some(gate) = &script.gate {
            gate.lock().unwrap().recv().unwrap();
        }

        match &script.result {
            Err(message) if script.panics => panic!("{}", message),
            result => result.clone().map_err(AppError::from),
        }
    }
}

/// Display that remembers everything published to it.
#[derive(Default)]
pub struct RecordingDisplay {
    events: Mutex<Vec<DisplayEvent>>,
}

impl RecordingDisplay {
    pub fn events(&self) -> Vec<DisplayEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                DisplayEvent::Message { text } => Some(text),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: DisplayEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl DisplaySurface for RecordingDisplay {
    fn show_image(&self, photo: &Photo) {
        self.push(DisplayEvent::Image {
            photo: photo.clone(),
        });
    }

    fn show_message(&self, text: &str) {
        self.push(DisplayEvent::Message {
            text: text.to_string(),
        });
    }

    fn reveal_results(&self) {
        self.push(DisplayEvent::RevealResults);
    }

    fn hide_onboarding(&self) {
        self.push(DisplayEvent::HideOnboarding);
    }
}
