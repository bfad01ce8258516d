mod progress_story;

use gpui::{
    AnyView, App, AppContext as _, Bounds, Context, Div, IntoElement, ParentElement, Render,
    SharedString, Styled, Window, WindowBounds, WindowOptions, div, px, size,
};
use gpui_labelled_progress::{ActiveTheme as _, progress::LabelledProgressStyle};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

pub use progress_story::ProgressStory;

/// Initialize logging and the progress components.
pub fn init(cx: &mut App) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gpui_labelled_progress=debug")),
        )
        .init();

    gpui_labelled_progress::init(cx);
}

/// Load the style passed on the command line.
///
/// Without a path, or when the file can't be loaded, the style follows the
/// active theme.
pub fn load_style(path: Option<&str>, cx: &App) -> LabelledProgressStyle {
    let Some(path) = path else {
        return LabelledProgressStyle::from_theme(cx.theme());
    };

    match LabelledProgressStyle::load(path) {
        Ok(style) => {
            tracing::info!("loaded progress style from {}", path);
            style
        }
        Err(err) => {
            tracing::error!("{:#}", err);
            LabelledProgressStyle::from_theme(cx.theme())
        }
    }
}

pub fn create_new_window<F, E>(title: &str, crate_view_fn: F, cx: &mut App)
where
    E: Into<AnyView>,
    F: FnOnce(&mut Window, &mut App) -> E + Send + 'static,
{
    let mut window_size = size(px(720.0), px(560.0));
    if let Some(display) = cx.primary_display() {
        let display_size = display.bounds().size;
        window_size.width = window_size.width.min(display_size.width * 0.85);
        window_size.height = window_size.height.min(display_size.height * 0.85);
    }

    let window_bounds = Bounds::centered(None, window_size, cx);
    let title = SharedString::from(title.to_string());

    cx.spawn(async move |cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(window_bounds)),
            window_min_size: Some(gpui::Size {
                width: px(480.),
                height: px(360.),
            }),
            ..Default::default()
        };

        let window = cx.open_window(options, |window, cx| {
            let view = crate_view_fn(window, cx);
            cx.new(|_| StoryRoot::new(title.clone(), view))
        })?;

        window.update(cx, |_, window, _| {
            window.activate_window();
            window.set_window_title(&title);
        })?;

        Ok::<_, anyhow::Error>(())
    })
    .detach();
}

struct StoryRoot {
    title: SharedString,
    view: AnyView,
}

impl StoryRoot {
    fn new(title: impl Into<SharedString>, view: impl Into<AnyView>) -> Self {
        Self {
            title: title.into(),
            view: view.into(),
        }
    }
}

impl Render for StoryRoot {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        v_flex()
            .size_full()
            .bg(cx.theme().background)
            .text_color(cx.theme().foreground)
            .font_family(cx.theme().font_family.clone())
            .child(
                div()
                    .px_4()
                    .py_2()
                    .text_color(cx.theme().muted_foreground)
                    .child(self.title.clone()),
            )
            .child(div().flex_1().overflow_hidden().child(self.view.clone()))
    }
}

pub(crate) fn v_flex() -> Div {
    div().flex().flex_col()
}

pub(crate) fn h_flex() -> Div {
    div().flex().flex_row().items_center()
}

/// A titled block of the story.
pub(crate) fn section(title: impl Into<SharedString>, cx: &App) -> Div {
    v_flex().w_full().gap_2().child(
        div()
            .text_sm()
            .text_color(cx.theme().muted_foreground)
            .child(title.into()),
    )
}

#[cfg(test)]
mod tests {
    use gpui::{TestAppContext, px};
    use gpui_labelled_progress::{
        ActiveTheme as _, FillDirection, progress::LabelledProgressStyle,
    };

    use super::load_style;

    #[gpui::test]
    fn test_load_style_fallback(cx: &mut TestAppContext) {
        cx.update(|cx| {
            gpui_labelled_progress::init(cx);

            let themed = LabelledProgressStyle::from_theme(cx.theme());
            assert_eq!(themed.fill, cx.theme().progress_bar);
            assert_eq!(load_style(None, cx), themed);
            assert_eq!(load_style(Some("/nonexistent/style.json"), cx), themed);
        });
    }

    #[gpui::test]
    fn test_load_style_file(cx: &mut TestAppContext) {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/styles/rtl.json");
        cx.update(|cx| {
            gpui_labelled_progress::init(cx);

            let style = load_style(Some(path), cx);
            assert_eq!(style.direction, FillDirection::RightToLeft);
            assert!(style.sliver_width > px(0.));
        });
    }
}
