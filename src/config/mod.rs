//! Configuration module for post conversion
//!
//! This module provides `ConverterOptions`, its builder, and the Markdown
//! style enums shared with the command line.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::ConverterOptionsBuilder;
pub use types::{
    BulletMarker, CodeBlockStyle, CodeFence, ConverterOptions, EmphasisDelimiter, FigureStyle,
    HeadingStyle, LinkReferenceStyle, LinkStyle, RenderOptions, StrongDelimiter, ThematicBreak,
};
