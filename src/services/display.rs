use crate::models::display_types::DisplayEvent;
use crate::models::photo_types::Photo;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::warn;

/// The surface the presenter publishes to.
///
/// Calls are fire-and-forget and may come from any thread; implementations
/// hand them over to whatever owns the screen.
pub trait DisplaySurface: Send + Sync {
    fn show_image(&self, photo: &Photo);

    fn show_message(&self, text: &str);

    /// Make the result area visible.
    fn reveal_results(&self);

    fn hide_onboarding(&self);
}

/// Forwards every publish onto a channel drained by the interactive loop.
#[derive(Clone)]
pub struct ChannelDisplay {
    tx: UnboundedSender<DisplayEvent>,
}

impl ChannelDisplay {
    pub fn new() -> (Self, UnboundedReceiver<DisplayEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn emit(&self, event: DisplayEvent) {
        // A closed receiver means the interactive loop is gone.
        if let Err(e) = self.tx.send(event) {
            warn!(event = ?e.0, "display event dropped, receiver closed");
        }
    }
}

impl DisplaySurface for ChannelDisplay {
    fn show_image(&self, photo: &Photo) {
        self.emit(DisplayEvent::Image {
            photo: photo.clone(),
        });
    }

    fn show_message(&self, text: &str) {
        self.emit(DisplayEvent::Message {
            text: text.to_string(),
        });
    }

    fn reveal_results(&self) {
        self.emit(DisplayEvent::RevealResults);
    }

    fn hide_onboarding(&self) {
        self.emit(DisplayEvent::HideOnboarding);
    }
}
