use std::time::Duration;

use gpui::{
    App, AppContext as _, Context, Entity, FocusHandle, Focusable, InteractiveElement as _,
    IntoElement, ParentElement, Render, SharedString, StatefulInteractiveElement as _, Styled,
    Subscription, Window, div, px,
};
use gpui_labelled_progress::{
    ActiveTheme as _, FillDirection,
    progress::{
        LabelledProgressBar, LabelledProgressEvent, LabelledProgressStyle, PercentEvaluator,
    },
};

use crate::{h_flex, section, v_flex};

const RANGE_START: f32 = 500.;
const RANGE_END: f32 = 1500.;

/// Label a progress as a value in `start..=end`.
pub(crate) fn range_label(start: f32, end: f32) -> impl Fn(f32) -> String + 'static {
    move |progress| ((start + (end - start) * progress) as i32).to_string()
}

/// Label a progress with a grade.
pub(crate) fn grade_label(progress: f32) -> &'static str {
    match progress {
        p if p <= 0.2 => "poor",
        p if p <= 0.4 => "bad",
        p if p <= 0.6 => "average",
        p if p <= 0.8 => "good",
        _ => "excellent",
    }
}

pub struct ProgressStory {
    focus_handle: FocusHandle,
    percent_bar: Entity<LabelledProgressBar>,
    range_bar: Entity<LabelledProgressBar>,
    grade_bar: Entity<LabelledProgressBar>,
    rtl_bar: Entity<LabelledProgressBar>,
    finished: usize,
    _subscriptions: Vec<Subscription>,
}

impl ProgressStory {
    pub fn view(style: LabelledProgressStyle, _: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| Self::new(style, cx))
    }

    pub(crate) fn new(style: LabelledProgressStyle, cx: &mut Context<Self>) -> Self {
        let percent_bar = cx.new(|cx| LabelledProgressBar::with_style(style.clone(), cx));
        let range_bar = cx.new(|cx| {
            LabelledProgressBar::with_style(
                style
                    .clone()
                    .duration(Duration::from_millis(5000))
                    .radius(px(6.)),
                cx,
            )
        });
        let grade_bar = cx.new(|cx| LabelledProgressBar::with_style(style.clone(), cx));
        let rtl_bar = cx.new(|cx| {
            LabelledProgressBar::with_style(
                style
                    .direction(FillDirection::RightToLeft)
                    .sliver_width(px(4.)),
                cx,
            )
        });

        let _subscriptions = [&percent_bar, &range_bar, &grade_bar, &rtl_bar]
            .into_iter()
            .map(|bar| {
                cx.subscribe(bar, |this, _, event: &LabelledProgressEvent, cx| {
                    if let LabelledProgressEvent::AnimationFinished(value) = event {
                        tracing::debug!("progress animation finished at {}", value);
                        this.finished += 1;
                        cx.notify();
                    }
                })
            })
            .collect();

        let mut this = Self {
            focus_handle: cx.focus_handle(),
            percent_bar,
            range_bar,
            grade_bar,
            rtl_bar,
            finished: 0,
            _subscriptions,
        };
        this.replay(cx);
        this
    }

    /// Run every demo animation again from the beginning.
    fn replay(&mut self, cx: &mut Context<Self>) {
        self.percent_bar
            .update(cx, |bar, cx| bar.animate_progress(0.75, cx));
        self.range_bar.update(cx, |bar, cx| {
            bar.animate_progress_with(0.8, true, range_label(RANGE_START, RANGE_END), cx)
        });
        self.grade_bar.update(cx, |bar, cx| {
            bar.animate_progress_with(1., true, grade_label, cx)
        });
        self.rtl_bar.update(cx, |bar, cx| bar.set_progress(0., cx));
    }

    /// Move the right to left bar by `delta`, continuing from the value on screen.
    fn step(&mut self, delta: f32, cx: &mut Context<Self>) {
        self.rtl_bar.update(cx, |bar, cx| {
            let target = bar.max_progress() + delta;
            bar.animate_progress_with(target, false, PercentEvaluator, cx)
        });
    }

    fn button(
        &self,
        id: &'static str,
        label: impl Into<SharedString>,
        cx: &Context<Self>,
    ) -> gpui::Stateful<gpui::Div> {
        div()
            .id(id)
            .px_3()
            .py_1()
            .rounded(cx.theme().radius)
            .border_1()
            .border_color(cx.theme().muted_foreground)
            .cursor_pointer()
            .child(label.into())
    }
}

impl Focusable for ProgressStory {
    fn focus_handle(&self, _: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for ProgressStory {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        v_flex()
            .p_4()
            .gap_6()
            .max_w(px(560.))
            .child(section("Percentage", cx).child(self.percent_bar.clone()))
            .child(
                section(
                    format!("Range {}..{}, 5 seconds", RANGE_START, RANGE_END),
                    cx,
                )
                .child(self.range_bar.clone()),
            )
            .child(section("Grade", cx).child(self.grade_bar.clone()))
            .child(
                section("Right to left with sliver", cx)
                    .child(self.rtl_bar.clone())
                    .child(
                        h_flex()
                            .gap_2()
                            .child(
                                self.button("step-back", "-10%", cx)
                                    .on_click(cx.listener(|this, _, _, cx| this.step(-0.1, cx))),
                            )
                            .child(
                                self.button("step-forward", "+10%", cx)
                                    .on_click(cx.listener(|this, _, _, cx| this.step(0.1, cx))),
                            ),
                    ),
            )
            .child(
                h_flex()
                    .gap_3()
                    .child(
                        self.button("replay", "Replay", cx)
                            .on_click(cx.listener(|this, _, _, cx| this.replay(cx))),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(cx.theme().muted_foreground)
                            .child(format!("{} animations finished", self.finished)),
                    ),
            )
    }
}
