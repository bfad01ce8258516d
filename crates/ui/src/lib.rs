use gpui::App;

mod animation;
mod geometry;
mod theme;

pub mod progress;

pub use animation::*;
pub use geometry::*;
pub use theme::*;

/// Initialize the component globals, e.g. the [`Theme`].
///
/// Call this once at startup, before any view reads `cx.theme()`.
pub fn init(cx: &mut App) {
    theme::init(cx);
}
