pub mod classifier;
pub mod display;
pub mod orientation;
pub mod predictor;
pub mod presenter;
