use gpui::Application;
use labelled_progress_story::{ProgressStory, create_new_window, init, load_style};

fn main() {
    let app = Application::new();

    // Parse `cargo run -- <style.json>`
    let style_path = std::env::args().nth(1);

    app.run(move |cx| {
        init(cx);
        cx.activate(true);
        cx.on_window_closed(|cx| {
            if cx.windows().is_empty() {
                cx.quit();
            }
        })
        .detach();

        let style = load_style(style_path.as_deref(), cx);
        create_new_window(
            "Labelled Progress",
            move |window, cx| ProgressStory::view(style, window, cx),
            cx,
        );
    });
}
