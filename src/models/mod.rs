pub mod display_types;
pub mod photo_types;
pub mod prediction_types;
