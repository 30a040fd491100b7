pub mod deviation;
pub mod matrix;
pub mod predictor;
pub mod recommendations;

pub use deviation::DeviationModel;
pub use matrix::build_rating_matrix;
pub use predictor::predict;
pub use recommendations::Recommender;
