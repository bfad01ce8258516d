mod evaluator;
mod labelled;
mod layout;
mod state;
mod style;

pub use evaluator::*;
pub use labelled::*;
pub use layout::*;
pub use state::*;
pub use style::*;

/// Clamp a progress value to `0.0..=1.0`, NaN is treated as `0.0`.
#[inline]
pub fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.
    } else {
        progress.clamp(0., 1.)
    }
}
