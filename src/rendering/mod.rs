pub mod bitmap_font;
pub mod canvas;
pub mod renderer;
pub mod scenes;
pub mod shapes;
pub mod text;

pub use canvas::{Canvas, ColorMode};
pub use renderer::{DiamondCut, RenderRequest, RenderedAsset, Renderer, ShapeKind};
pub use text::{load_font, Anchor, FontBook, LoadedFont};
