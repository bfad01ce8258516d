use std::rc::Rc;

use gpui::{
    AnyElement, Bounds, Context, ElementId, EventEmitter, InteractiveElement as _, IntoElement,
    ParentElement, Pixels, Render, SharedString, Styled, Window, canvas, div,
};
use instant::Instant;

use super::{
    DrawPrimitive, LabelledProgressStyle, PercentEvaluator, ProgressEvaluator, ProgressLayout,
    ProgressState, Tick, default_evaluator,
};

/// Events emitted by [`LabelledProgressBar`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelledProgressEvent {
    /// A new target value was set, with or without animation.
    Changed(f32),
    /// The animation reached its target value.
    AnimationFinished(f32),
}

/// A horizontal progress bar with a label that follows the edge of the fill.
///
/// The label is drawn inside the fill when the label of the target value
/// fits there, otherwise next to the fill on the track.
///
/// ```ignore
/// let bar = cx.new(|cx| LabelledProgressBar::new(cx));
/// bar.update(cx, |bar, cx| bar.animate_progress(0.75, cx));
/// ```
pub struct LabelledProgressBar {
    style: LabelledProgressStyle,
    state: ProgressState,
    evaluator: Rc<dyn ProgressEvaluator>,
    bounds: Bounds<Pixels>,
}

impl EventEmitter<LabelledProgressEvent> for LabelledProgressBar {}

impl LabelledProgressBar {
    /// Create a progress bar with the default style.
    pub fn new(cx: &mut Context<Self>) -> Self {
        Self::with_style(LabelledProgressStyle::default(), cx)
    }

    /// Create a progress bar, applying the style's initial progress.
    pub fn with_style(style: LabelledProgressStyle, _: &mut Context<Self>) -> Self {
        let style = style.normalized();
        let mut state = ProgressState::default();
        let initial = style.initial_progress;
        if initial != 0. {
            if style.initial_animate {
                state.animate(initial, true, style.duration, style.easing, Instant::now());
            } else {
                state.set(initial);
            }
        }

        Self {
            style,
            state,
            evaluator: default_evaluator(),
            bounds: Bounds::default(),
        }
    }

    /// The value currently drawn.
    pub fn progress(&self) -> f32 {
        self.state.current()
    }

    /// The target value, equal to [`Self::progress`] when not animating.
    pub fn max_progress(&self) -> f32 {
        self.state.max()
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    /// The label for the value currently drawn.
    pub fn label(&self) -> SharedString {
        self.evaluator.evaluate(self.state.current())
    }

    /// A description of the target value for assistive technologies.
    ///
    /// Falls back to a percentage when the evaluator returns blank text.
    pub fn accessible_label(&self) -> SharedString {
        let max = self.state.max();
        let label = self.evaluator.evaluate(max);
        if label.trim().is_empty() {
            PercentEvaluator.evaluate(max)
        } else {
            label
        }
    }

    pub fn style(&self) -> &LabelledProgressStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: LabelledProgressStyle, cx: &mut Context<Self>) {
        self.style = style.normalized();
        cx.notify();
    }

    /// Modify the style in place.
    pub fn update_style(
        &mut self,
        f: impl FnOnce(&mut LabelledProgressStyle),
        cx: &mut Context<Self>,
    ) {
        f(&mut self.style);
        self.style = self.style.clone().normalized();
        cx.notify();
    }

    /// Set the progress immediately, labelled as a percentage.
    pub fn set_progress(&mut self, progress: f32, cx: &mut Context<Self>) {
        self.set_progress_with(progress, PercentEvaluator, cx);
    }

    /// Set the progress immediately with a custom label evaluator.
    ///
    /// Values outside `0.0..=1.0` are clamped, a running animation is dropped.
    pub fn set_progress_with(
        &mut self,
        progress: f32,
        evaluator: impl ProgressEvaluator,
        cx: &mut Context<Self>,
    ) {
        self.evaluator = Rc::new(evaluator);
        self.state.set(progress);
        cx.emit(LabelledProgressEvent::Changed(self.state.max()));
        cx.notify();
    }

    /// Animate from zero to `progress`, labelled as a percentage.
    pub fn animate_progress(&mut self, progress: f32, cx: &mut Context<Self>) {
        self.animate_progress_with(progress, true, PercentEvaluator, cx);
    }

    /// Animate to `progress` with a custom label evaluator.
    ///
    /// With `from_beginning` the fill restarts at zero, otherwise it moves on
    /// from the value currently drawn. A running animation is superseded.
    pub fn animate_progress_with(
        &mut self,
        progress: f32,
        from_beginning: bool,
        evaluator: impl ProgressEvaluator,
        cx: &mut Context<Self>,
    ) {
        self.evaluator = Rc::new(evaluator);
        self.state.animate(
            progress,
            from_beginning,
            self.style.duration,
            self.style.easing,
            Instant::now(),
        );
        tracing::trace!(
            "animate progress {} -> {} in {:?}",
            self.state.current(),
            self.state.max(),
            self.style.duration
        );
        cx.emit(LabelledProgressEvent::Changed(self.state.max()));
        cx.notify();
    }

    /// Skip to the end of a running animation.
    pub fn finish_animation(&mut self, cx: &mut Context<Self>) {
        if self.state.finish() {
            cx.emit(LabelledProgressEvent::AnimationFinished(self.state.max()));
            cx.notify();
        }
    }

    pub(crate) fn tick(&mut self, now: Instant, cx: &mut Context<Self>) -> Tick {
        let tick = self.state.tick(now);
        if tick == Tick::Finished {
            tracing::trace!("progress animation finished at {}", self.state.max());
            cx.emit(LabelledProgressEvent::AnimationFinished(self.state.max()));
        }
        tick
    }

    fn layout(&self, window: &Window) -> ProgressLayout {
        let text_style = window.text_style();
        let mut measure = |text: &SharedString, text_size: Pixels| {
            let run = text_style.to_run(text.len());
            window
                .text_system()
                .shape_line(text.clone(), text_size, &[run], None)
                .width
        };

        let max_label = self.evaluator.evaluate(self.state.max());
        let mut bar_size = self.bounds.size;
        bar_size.height = self.style.height;

        ProgressLayout::compute(
            bar_size,
            self.state.current(),
            self.state.max(),
            &self.style,
            self.label(),
            &max_label,
            &mut measure,
        )
    }

    fn render_primitive(&self, primitive: DrawPrimitive) -> AnyElement {
        match primitive {
            DrawPrimitive::Rect {
                bounds,
                radius,
                color,
            } => div()
                .absolute()
                .left(bounds.origin.x)
                .top(bounds.origin.y)
                .w(bounds.size.width)
                .h(bounds.size.height)
                .rounded(radius)
                .bg(color)
                .into_any_element(),
            DrawPrimitive::Text {
                text,
                origin,
                line_height,
                color,
            } => div()
                .absolute()
                .left(origin.x)
                .top(origin.y)
                .line_height(line_height)
                .text_size(self.style.text_size)
                .text_color(color)
                .whitespace_nowrap()
                .child(text)
                .into_any_element(),
        }
    }
}

impl Render for LabelledProgressBar {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        if self.tick(Instant::now(), cx) == Tick::Running {
            window.request_animation_frame();
        }

        let layout = self.layout(window);
        let view = cx.entity();

        div()
            .id(ElementId::NamedInteger(
                "labelled-progress".into(),
                cx.entity_id().as_u64(),
            ))
            .relative()
            .w_full()
            .h(self.style.height)
            .overflow_hidden()
            .children(
                layout
                    .primitives()
                    .into_iter()
                    .map(|primitive| self.render_primitive(primitive)),
            )
            .child(
                // Keep the bar bounds of the last frame for the next layout.
                canvas(
                    move |bounds, _, cx| {
                        view.update(cx, |this, cx| {
                            if this.bounds.size != bounds.size {
                                this.bounds = bounds;
                                cx.notify();
                            }
                        })
                    },
                    |_, _, _, _| {},
                )
                .absolute()
                .size_full(),
            )
    }
}
