pub mod config;
pub mod error;
pub mod models;
pub mod services;

#[cfg(test)]
mod test_support;

pub use config::{ClassifierConfig, Config, PresenterConfig};
pub use error::{AppError, PredictionError, PredictionErrorKind};
pub use models::display_types::DisplayEvent;
pub use models::photo_types::Photo;
pub use models::prediction_types::{Prediction, PredictionList};
pub use services::classifier::ImageClassifier;
pub use services::display::{ChannelDisplay, DisplaySurface};
pub use services::predictor::Predictor;
pub use services::presenter::{format_predictions, render_predictions, PresentationState, Presenter};

/// Install the `tracing` subscriber, honouring `RUST_LOG` and defaulting to
/// `info`.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
