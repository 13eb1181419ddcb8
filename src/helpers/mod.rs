//! Helper functions for page markup

mod html;

pub use html::*;
