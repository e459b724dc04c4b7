//! User Interface module
//!
//! Terminal UI using ratatui: screen rendering, the map canvas and
//! keyboard mapping.

pub mod app;
pub mod canvas;
pub mod input;

pub use app::{App, LogReveal};
pub use canvas::MapCanvas;
pub use input::KeyboardInput;
