use clap::Parser;
use photo_label::services::classifier::onnx::OnnxClassifier;
use photo_label::{init_logging, AppError, ChannelDisplay, Config, DisplayEvent, Photo, Predictor, Presenter};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "photo-label", version, about = "Label the dominant content of a photo")]
struct Args {
    /// TOML configuration file.
    #[arg(long, env = "PHOTO_LABEL_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the model and its label config; overrides the config file.
    #[arg(long, env = "PHOTO_LABEL_MODEL_DIR")]
    model_dir: Option<PathBuf>,

    /// Photo to classify.
    photo: PathBuf,
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run(Args::parse()).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(dir) = args.model_dir {
        config.classifier.model_dir = dir;
    }

    let classifier_config = config.classifier.clone();
    let classifier = tokio::task::spawn_blocking(move || OnnxClassifier::load(&classifier_config))
        .await
        .map_err(|e| AppError {
            message: format!("Failed to spawn model loading task: {}", e),
        })??;

    let (display, mut events) = ChannelDisplay::new();
    let presenter = Presenter::new(
        Predictor::new(Arc::new(classifier)),
        Arc::new(display),
        config.presenter.clone(),
    )?;

    let photo = Photo::open(&args.photo)?;
    info!(photo = %args.photo.display(), "photo selected");
    let pending = presenter.user_selected_photo(photo);
    // The presenter holds the only sender; release it so the loop below ends.
    drop(presenter);

    // Interactive loop: everything shown on screen arrives here.
    while let Some(event) = events.recv().await {
        match &event {
            DisplayEvent::Message { text } => println!("{}", text),
            other => info!(event = %serde_json::to_string(other)?, "display"),
        }
    }

    pending.await.map_err(|e| AppError {
        message: format!("Classification task failed: {}", e),
    })?;
    Ok(())
}
