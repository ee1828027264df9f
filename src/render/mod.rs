pub mod renderer;
pub mod text;

pub use renderer::{Hud, Renderer};
pub use text::render_text;
