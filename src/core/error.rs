use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unsupported shape kind {0:?} (expected ring, necklace, diamond:<cut>, color-chart, clarity-chart or card)")]
    UnsupportedShape(String),
    #[error("unsupported diamond cut {0:?} (expected round, princess, cushion, oval or emerald)")]
    UnsupportedCut(String),
    #[error("cannot infer an encodable image format from {0:?} (use .png or .jpg)")]
    UnsupportedFormat(PathBuf),
    #[error("{role} {name:?} is not defined in the palette")]
    UnknownColor { role: &'static str, name: String },
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to serialize manifest {path:?}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("config: {0}")]
    Config(String),
}
