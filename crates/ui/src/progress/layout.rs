use gpui::{Bounds, Hsla, Pixels, Point, SharedString, Size, point, px, size};

use super::LabelledProgressStyle;
use crate::{FillDirection, PixelsExt as _};

/// Measures the rendered width of a label.
pub trait TextMeasure {
    fn measure(&mut self, text: &SharedString, text_size: Pixels) -> Pixels;
}

impl<F> TextMeasure for F
where
    F: FnMut(&SharedString, Pixels) -> Pixels,
{
    fn measure(&mut self, text: &SharedString, text_size: Pixels) -> Pixels {
        (self)(text, text_size)
    }
}

/// Where and how the label is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressLabel {
    pub text: SharedString,
    /// Top left corner of the label line, relative to the bar.
    pub origin: Point<Pixels>,
    pub width: Pixels,
    pub line_height: Pixels,
    pub color: Hsla,
    /// True when the label sits on the fill, false when it sits on the track.
    pub on_fill: bool,
}

/// A single paint operation, relative to the bar's origin.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawPrimitive {
    Rect {
        bounds: Bounds<Pixels>,
        radius: Pixels,
        color: Hsla,
    },
    Text {
        text: SharedString,
        origin: Point<Pixels>,
        line_height: Pixels,
        color: Hsla,
    },
}

/// The geometry of a labelled progress bar for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressLayout {
    pub background: Bounds<Pixels>,
    pub fill: Bounds<Pixels>,
    pub radius: Pixels,
    pub background_color: Hsla,
    pub fill_color: Hsla,
    pub label: ProgressLabel,
}

/// Decide whether the label of the target value fits inside the final fill.
///
/// `label_width` is the measured width of the target label.
pub fn label_fits_on_fill(
    label_width: Pixels,
    padding: Pixels,
    max_progress: f32,
    bar_width: Pixels,
) -> bool {
    label_width + padding * 2. < bar_width * max_progress
}

/// The drawn fill width for `progress`.
///
/// While the target `max_progress` is zero a non-zero `sliver_width` replaces
/// the fill, capped at the bar width.
pub fn fill_width(
    progress: f32,
    max_progress: f32,
    bar_width: Pixels,
    sliver_width: Pixels,
) -> Pixels {
    let bar_width = bar_width.max(px(0.));
    if sliver_width > px(0.) && max_progress == 0. {
        sliver_width.min(bar_width)
    } else {
        bar_width * progress
    }
}

impl ProgressLayout {
    /// Lay out a bar of `bar_size`.
    ///
    /// - `current` is the value being drawn, `max` the target value.
    /// - `label` is the evaluated text of `current`, `max_label` of `max`.
    ///
    /// The label placement only depends on `max`, so the label stays on the
    /// same side for the whole animation.
    pub fn compute(
        bar_size: Size<Pixels>,
        current: f32,
        max: f32,
        style: &LabelledProgressStyle,
        label: SharedString,
        max_label: &SharedString,
        measure: &mut impl TextMeasure,
    ) -> Self {
        let width = bar_size.width.max(px(0.));
        let height = bar_size.height.max(px(0.));
        let padding = style.text_padding;

        let fill_w = fill_width(current, max, width, style.sliver_width);
        let max_label_w = measure.measure(max_label, style.text_size);
        let on_fill = label_fits_on_fill(max_label_w, padding, max, width);

        let text_w = if &label == max_label {
            max_label_w
        } else {
            measure.measure(&label, style.text_size)
        };

        let (fill_origin, label_x) = match (style.direction, on_fill) {
            (FillDirection::LeftToRight, true) => (px(0.), fill_w - padding - text_w),
            (FillDirection::LeftToRight, false) => (px(0.), fill_w + padding),
            (FillDirection::RightToLeft, true) => (width - fill_w, width - fill_w + padding),
            (FillDirection::RightToLeft, false) => {
                (width - fill_w, width - fill_w - padding - text_w)
            }
        };

        let line_height = style.line_height();
        let label_y = (height - line_height) / 2.;

        Self {
            background: Bounds::new(point(px(0.), px(0.)), size(width, height)),
            fill: Bounds::new(point(fill_origin, px(0.)), size(fill_w, height)),
            radius: style.radius,
            background_color: style.background,
            fill_color: style.fill,
            label: ProgressLabel {
                text: label,
                origin: point(label_x, label_y),
                width: text_w,
                line_height,
                color: if on_fill {
                    style.label_on_fill
                } else {
                    style.label_on_background
                },
                on_fill,
            },
        }
    }

    /// The fill width as a fraction of the bar width.
    pub fn fill_fraction(&self) -> f32 {
        if self.background.size.width <= px(0.) {
            return 0.;
        }
        self.fill.size.width.as_f32() / self.background.size.width.as_f32()
    }

    /// The paint operations in back to front order.
    ///
    /// A zero width fill is skipped.
    pub fn primitives(&self) -> Vec<DrawPrimitive> {
        let mut primitives = Vec::with_capacity(3);
        primitives.push(DrawPrimitive::Rect {
            bounds: self.background,
            radius: self.radius,
            color: self.background_color,
        });
        if self.fill.size.width > px(0.) {
            primitives.push(DrawPrimitive::Rect {
                bounds: self.fill,
                radius: self.radius,
                color: self.fill_color,
            });
        }
        if !self.label.text.is_empty() {
            primitives.push(DrawPrimitive::Text {
                text: self.label.text.clone(),
                origin: self.label.origin,
                line_height: self.label.line_height,
                color: self.label.color,
            });
        }
        primitives
    }
}
