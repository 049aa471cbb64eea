pub mod handler;

pub use handler::{DirectionFilter, InputHandler, KeyAction};
