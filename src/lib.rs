pub mod batch;
pub mod core;
pub mod rendering;

// Curated re-exports
pub use crate::core::color::Color;
pub use crate::core::config::{Job, JobSet, PlaceholderConfig};
pub use crate::core::error::RenderError;
pub use rendering::{DiamondCut, RenderRequest, RenderedAsset, Renderer, ShapeKind};
