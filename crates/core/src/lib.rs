pub mod color;
pub mod error;
pub mod export;
pub mod format;
pub mod hierarchy;
pub mod model;
pub mod render;
pub mod search;
pub mod treemap;

pub use color::ColorMap;
pub use error::ChartError;
pub use model::*;
pub use render::ChartOptions;
