//! Presentation
//!
//! Renders scan results as a text table or JSON.

mod render;

pub use render::{NO_DATA_MESSAGE, render_json, render_table};
