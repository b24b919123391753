// src/chart/mod.rs

//! Chart documents handed to the browser-side renderers.
//!
//! - Line, bubble and bar panels → Vega-Lite JSON
//! - Heatmap panel → deck.gl JSON (the format pydeck emits)
//!
//! Non-finite numbers serialize as `null`, which both renderers skip.

pub mod deck;
pub mod vegalite;

pub use deck::DeckWriter;
pub use vegalite::VegaLiteWriter;
