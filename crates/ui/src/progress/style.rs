use std::{path::Path, time::Duration};

use anyhow::{Context as _, Result};
use gpui::{Hsla, Pixels, px};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::theme::{black, cyan, hex_color, white};
use crate::{Easing, FillDirection, Theme};

/// The sliver width used when only `show_sliver_on_empty` is enabled.
pub(crate) const LEGACY_SLIVER_WIDTH: Pixels = px(1.);

/// Line height of the label, relative to the text size.
pub(crate) const LINE_HEIGHT_RATIO: f32 = 1.25;

/// Visual and animation settings of a [`super::LabelledProgressBar`].
///
/// The style can be built in code or loaded from a JSON file, every field
/// is optional in the file:
///
/// ```json
/// { "fill": "#4caf50", "radius": 4, "direction": "rtl", "duration_ms": 5000 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LabelledProgressStyle {
    /// Color of the unfilled track.
    #[serde(with = "hex_color")]
    #[schemars(with = "String")]
    pub background: Hsla,
    /// Color of the filled region.
    #[serde(with = "hex_color")]
    #[schemars(with = "String")]
    pub fill: Hsla,
    /// Label color when the label is drawn on the fill.
    #[serde(with = "hex_color")]
    #[schemars(with = "String")]
    pub label_on_fill: Hsla,
    /// Label color when the label is drawn on the track.
    #[serde(with = "hex_color")]
    #[schemars(with = "String")]
    pub label_on_background: Hsla,
    /// Height of the bar.
    pub height: Pixels,
    pub radius: Pixels,
    pub text_size: Pixels,
    /// Gap between the fill edge and the label.
    pub text_padding: Pixels,
    /// Minimum visible fill width, `0` disables the sliver.
    pub sliver_width: Pixels,
    /// Legacy switch, a 1px sliver is used when this is set and `sliver_width` is 0.
    pub show_sliver_on_empty: bool,
    #[serde(rename = "duration_ms", with = "duration_ms")]
    #[schemars(with = "u64")]
    pub duration: Duration,
    pub easing: Easing,
    pub direction: FillDirection,
    /// Progress applied when the bar is created.
    pub initial_progress: f32,
    /// Animate to `initial_progress` on creation instead of jumping to it.
    pub initial_animate: bool,
}

impl Default for LabelledProgressStyle {
    fn default() -> Self {
        Self {
            background: white(),
            fill: cyan(),
            label_on_fill: white(),
            label_on_background: black(),
            height: px(32.),
            radius: px(0.),
            text_size: px(16.),
            text_padding: px(8.),
            sliver_width: px(0.),
            show_sliver_on_empty: false,
            duration: Duration::from_millis(1000),
            easing: Easing::default(),
            direction: FillDirection::default(),
            initial_progress: 0.,
            initial_animate: true,
        }
    }
}

fn non_negative(value: Pixels) -> Pixels {
    let v = f32::from(value);
    if v.is_nan() || v < 0. { px(0.) } else { value }
}

impl LabelledProgressStyle {
    /// A style with colors taken from the given theme.
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            background: theme.progress_track,
            fill: theme.progress_bar,
            label_on_fill: theme.progress_bar_foreground,
            label_on_background: theme.foreground,
            radius: theme.radius,
            text_size: theme.font_size,
            ..Default::default()
        }
    }

    /// Parse a style from JSON, missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let style: Self = serde_json::from_str(json).context("failed to parse progress style")?;
        Ok(style.normalized())
    }

    /// Load a style from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read progress style: {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("invalid progress style: {}", path.display()))
    }

    /// Returns a copy with sizes clamped to non-negative values and
    /// `initial_progress` clamped to `0.0..=1.0`.
    pub fn normalized(mut self) -> Self {
        self.height = non_negative(self.height);
        self.radius = non_negative(self.radius);
        self.text_size = non_negative(self.text_size);
        self.text_padding = non_negative(self.text_padding);
        self.sliver_width = non_negative(self.sliver_width);
        self.initial_progress = super::clamp_progress(self.initial_progress);

        if self.show_sliver_on_empty && self.sliver_width == px(0.) {
            tracing::debug!(
                "show_sliver_on_empty is deprecated, using a {}px sliver, set sliver_width instead",
                f32::from(LEGACY_SLIVER_WIDTH)
            );
            self.sliver_width = LEGACY_SLIVER_WIDTH;
        }

        self
    }

    /// The height of a single label line.
    pub fn line_height(&self) -> Pixels {
        self.text_size * LINE_HEIGHT_RATIO
    }

    pub fn background(mut self, color: impl Into<Hsla>) -> Self {
        self.background = color.into();
        self
    }

    pub fn fill(mut self, color: impl Into<Hsla>) -> Self {
        self.fill = color.into();
        self
    }

    pub fn label_on_fill(mut self, color: impl Into<Hsla>) -> Self {
        self.label_on_fill = color.into();
        self
    }

    pub fn label_on_background(mut self, color: impl Into<Hsla>) -> Self {
        self.label_on_background = color.into();
        self
    }

    pub fn height(mut self, height: impl Into<Pixels>) -> Self {
        self.height = non_negative(height.into());
        self
    }

    pub fn radius(mut self, radius: impl Into<Pixels>) -> Self {
        self.radius = non_negative(radius.into());
        self
    }

    pub fn text_size(mut self, size: impl Into<Pixels>) -> Self {
        self.text_size = non_negative(size.into());
        self
    }

    pub fn text_padding(mut self, padding: impl Into<Pixels>) -> Self {
        self.text_padding = non_negative(padding.into());
        self
    }

    /// Set the minimum visible fill width, `0` turns the sliver off.
    pub fn sliver_width(mut self, width: impl Into<Pixels>) -> Self {
        self.sliver_width = non_negative(width.into());
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn direction(mut self, direction: FillDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn initial_progress(mut self, progress: f32, animate: bool) -> Self {
        self.initial_progress = super::clamp_progress(progress);
        self.initial_animate = animate;
        self
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize as _, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ThemeColor, to_hex};

    #[test]
    fn test_default_style() {
        let style = LabelledProgressStyle::default();
        assert_eq!(to_hex(style.background), "#ffffff");
        assert_eq!(to_hex(style.fill), "#00ffff");
        assert_eq!(to_hex(style.label_on_fill), "#ffffff");
        assert_eq!(to_hex(style.label_on_background), "#000000");
        assert_eq!(style.duration, Duration::from_millis(1000));
        assert_eq!(style.text_padding, px(8.));
        assert_eq!(style.sliver_width, px(0.));
        assert_eq!(style.direction, FillDirection::LeftToRight);
        assert_eq!(style.easing, Easing::Decelerate);
        assert_eq!(style.line_height(), px(20.));
    }

    #[test]
    fn test_from_json() {
        let style = LabelledProgressStyle::from_json(
            r##"{
                "fill": "#4caf50",
                "label_on_background": "#333333",
                "radius": 4,
                "height": 24,
                "sliver_width": 2,
                "duration_ms": 5000,
                "direction": "rtl",
                "easing": "linear",
                "initial_progress": 0.75,
                "initial_animate": false
            }"##,
        )
        .unwrap();

        assert_eq!(to_hex(style.fill), "#4caf50");
        assert_eq!(to_hex(style.label_on_background), "#333333");
        assert_eq!(style.radius, px(4.));
        assert_eq!(style.height, px(24.));
        assert_eq!(style.sliver_width, px(2.));
        assert_eq!(style.duration, Duration::from_secs(5));
        assert_eq!(style.direction, FillDirection::RightToLeft);
        assert_eq!(style.easing, Easing::Linear);
        assert_eq!(style.initial_progress, 0.75);
        assert!(!style.initial_animate);
        // Unset fields keep the defaults.
        assert_eq!(to_hex(style.background), "#ffffff");
        assert_eq!(style.text_size, px(16.));
    }

    #[test]
    fn test_from_json_errors() {
        assert!(LabelledProgressStyle::from_json("{").is_err());
        assert!(LabelledProgressStyle::from_json(r#"{ "fill": "green" }"#).is_err());
        assert!(LabelledProgressStyle::from_json(r#"{ "direction": "up" }"#).is_err());
        assert!(LabelledProgressStyle::load("/nonexistent/progress-style.json").is_err());
    }

    #[test]
    fn test_normalized() {
        let style = LabelledProgressStyle::from_json(
            r#"{ "radius": -3, "text_padding": -1, "sliver_width": -5, "initial_progress": 4.2 }"#,
        )
        .unwrap();
        assert_eq!(style.radius, px(0.));
        assert_eq!(style.text_padding, px(0.));
        assert_eq!(style.sliver_width, px(0.));
        assert_eq!(style.initial_progress, 1.);

        let style = LabelledProgressStyle::default().radius(px(-2.)).sliver_width(px(-1.));
        assert_eq!(style.radius, px(0.));
        assert_eq!(style.sliver_width, px(0.));
    }

    #[test]
    fn test_legacy_sliver() {
        let style = LabelledProgressStyle::from_json(r#"{ "show_sliver_on_empty": true }"#).unwrap();
        assert_eq!(style.sliver_width, LEGACY_SLIVER_WIDTH);

        let style =
            LabelledProgressStyle::from_json(r#"{ "show_sliver_on_empty": true, "sliver_width": 6 }"#)
                .unwrap();
        assert_eq!(style.sliver_width, px(6.));
    }

    #[test]
    fn test_serialize_round_trip() {
        let style = LabelledProgressStyle::default()
            .fill(crate::try_parse_color("#ff8800").unwrap())
            .direction(FillDirection::RightToLeft)
            .duration(Duration::from_millis(250));
        let json = serde_json::to_string(&style).unwrap();
        assert!(json.contains(r##""fill":"#ff8800""##));
        assert!(json.contains(r#""duration_ms":250"#));

        let parsed = LabelledProgressStyle::from_json(&json).unwrap();
        assert_eq!(to_hex(parsed.fill), "#ff8800");
        assert_eq!(to_hex(parsed.background), "#ffffff");
        assert_eq!(parsed.direction, FillDirection::RightToLeft);
        assert_eq!(parsed.duration, Duration::from_millis(250));
    }

    #[test]
    fn test_from_theme() {
        let theme = Theme::from(ThemeColor::light());
        let style = LabelledProgressStyle::from_theme(&theme);
        assert_eq!(style.fill, ThemeColor::light().progress_bar);
        assert_eq!(style.background, ThemeColor::light().progress_track);
        assert_eq!(style.radius, theme.radius);
        assert_eq!(style.text_padding, px(8.));
    }
}
