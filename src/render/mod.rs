pub mod renderer;

pub use renderer::{HudFlags, Renderer};
