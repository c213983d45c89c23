//! Terminal presentation for the preview surface

pub mod console;
pub mod context;
pub mod error;
pub mod json;
pub mod live_region;
pub mod markup;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
