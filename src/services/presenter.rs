use crate::config::PresenterConfig;
use crate::error::{AppError, PredictionError};
use crate::models::photo_types::Photo;
use crate::models::prediction_types::{Prediction, PredictionList};
use crate::services::display::DisplaySurface;
use crate::services::predictor::Predictor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Process-wide presentation flags.
#[derive(Debug)]
pub struct PresentationState {
    first_run: AtomicBool,
}

impl Default for PresentationState {
    fn default() -> Self {
        Self {
            first_run: AtomicBool::new(true),
        }
    }
}

impl PresentationState {
    pub fn is_first_run(&self) -> bool {
        self.first_run.load(Ordering::Acquire)
    }

    /// Flip the first-run flag. Returns `true` only for the call that did it.
    pub fn complete_first_run(&self) -> bool {
        self.first_run
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Sequences the display around one prediction per selected photo.
#[derive(Clone)]
pub struct Presenter {
    predictor: Predictor,
    display: Arc<dyn DisplaySurface>,
    state: Arc<PresentationState>,
    config: Arc<PresenterConfig>,
    runtime: Handle,
}

impl Presenter {
    /// Build a presenter that classifies on the current tokio runtime.
    ///
    /// Fails outside a runtime; use [`Presenter::with_runtime`] there.
    pub fn new(
        predictor: Predictor,
        display: Arc<dyn DisplaySurface>,
        config: PresenterConfig,
    ) -> Result<Self, AppError> {
        let runtime = Handle::try_current().map_err(|e| AppError {
            message: format!("Presenter needs a tokio runtime: {}", e),
        })?;
        Self::with_runtime(runtime, predictor, display, config)
    }

    pub fn with_runtime(
        runtime: Handle,
        predictor: Predictor,
        display: Arc<dyn DisplaySurface>,
        config: PresenterConfig,
    ) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self {
            predictor,
            display,
            state: Arc::new(PresentationState::default()),
            config: Arc::new(config),
            runtime,
        })
    }

    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    /// Entry point for the photo picker. May be called from any thread.
    ///
    /// The photo and the working message are published before this returns.
    /// Classification continues on a spawned task whose handle is returned;
    /// dropping the handle does not cancel it. Overlapping selections are not
    /// serialized: whichever finishes last owns the message.
    pub fn user_selected_photo(&self, photo: Photo) -> JoinHandle<()> {
        self.display.show_image(&photo);
        self.display.show_message(&self.config.working_message);
        debug!(bytes = photo.len(), "photo submitted");

        let presenter = self.clone();
        self.runtime.spawn(async move {
            let outcome = presenter.predictor.predict(&photo).await;
            presenter.finish(outcome);
        })
    }

    /// Publish the outcome of one classification.
    fn finish(&self, outcome: Result<PredictionList, PredictionError>) {
        match outcome {
            Ok(predictions) => {
                let text = render_predictions(predictions.as_slice(), &self.config);
                info!(result = %text, "publishing prediction");
                self.display.show_message(&text);

                if self.state.complete_first_run() {
                    self.display.reveal_results();
                    self.display.hide_onboarding();
                }
            }
            Err(e) => {
                error!(kind = %e.kind(), "unable to make a prediction: {}", e);
                self.display.show_message(&self.config.no_predictions_message);
            }
        }
    }
}

/// Render the first `predictions_to_show` predictions as `"<name> - <pct>%"`.
///
/// The input order is kept; only the first synonym of each name is shown.
pub fn format_predictions(predictions: &[Prediction], config: &PresenterConfig) -> Vec<String> {
    predictions
        .iter()
        .take(config.predictions_to_show)
        .map(|p| format!("{} - {}%", p.primary_name(), p.confidence_percentage()))
        .collect()
}

pub fn render_predictions(predictions: &[Prediction], config: &PresenterConfig) -> String {
    format_predictions(predictions, config).join(&config.line_separator)
}
