use gpui::Pixels;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The direction a progress fill grows in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum FillDirection {
    /// Fill starts at the left edge and grows to the right.
    #[default]
    #[serde(rename = "ltr")]
    LeftToRight,
    /// Fill starts at the right edge and grows to the left.
    #[serde(rename = "rtl")]
    RightToLeft,
}

/// A trait for converting [`Pixels`] to `f32`.
pub trait PixelsExt {
    fn as_f32(&self) -> f32;
}

impl PixelsExt for Pixels {
    fn as_f32(&self) -> f32 {
        f32::from(self)
    }
}
