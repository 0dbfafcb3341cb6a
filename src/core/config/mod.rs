pub mod config;

pub use config::{
    CardStyle, ColorGrade, DiamondStyle, FontConfig, GradeTables, Job, JobSet, Palette,
    PlaceholderConfig, StyleConfig,
};
