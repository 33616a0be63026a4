//! Line rendering: the template that orders the parts of a line, and the colors the
//! console decorator paints with.

mod color;
mod format;

pub use color::Color;
pub use format::{
    Caller, DEFAULT_TEMPLATE, DEFAULT_TIMESTAMP, LineFormat, LineTemplate, LineValues,
    Placeholder, Segment,
};
