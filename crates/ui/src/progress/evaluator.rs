use std::rc::Rc;

use gpui::SharedString;

/// Maps a progress fraction in `0.0..=1.0` to the label drawn on the bar.
///
/// Any `Fn(f32) -> impl Into<SharedString>` closure is an evaluator:
///
/// ```ignore
/// bar.animate_progress_with(0.8, true, |p: f32| format!("{:.0}", 500. + 1000. * p), cx);
/// ```
pub trait ProgressEvaluator: 'static {
    fn evaluate(&self, progress: f32) -> SharedString;
}

impl<F, S> ProgressEvaluator for F
where
    F: Fn(f32) -> S + 'static,
    S: Into<SharedString>,
{
    fn evaluate(&self, progress: f32) -> SharedString {
        (self)(progress).into()
    }
}

/// The default evaluator, renders the truncated percentage, e.g.: `42%`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentEvaluator;

impl ProgressEvaluator for PercentEvaluator {
    fn evaluate(&self, progress: f32) -> SharedString {
        format!("{}%", (progress * 100.) as i32).into()
    }
}

pub(crate) fn default_evaluator() -> Rc<dyn ProgressEvaluator> {
    Rc::new(PercentEvaluator)
}
