pub mod controller;
pub mod providers;
pub mod renderer;
pub mod trailer;

pub use controller::SearchController;
pub use providers::{HttpBackend, RecommendationBackend};
