//! Client-side helpers shared by UIs built on the broker

mod normalize;
mod progress;

pub use normalize::extract_translated_text;
pub use progress::{display_name, BoardChange, ProgressBoard};
