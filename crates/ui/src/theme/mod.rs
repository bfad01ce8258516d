use gpui::{App, Global, Hsla, Pixels, SharedString, Window, WindowAppearance, hsla, px};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod color;
pub use color::*;
pub(crate) use color::{black, cyan, hex_color, white};

pub(crate) fn init(cx: &mut App) {
    Theme::sync_system_appearance(None, cx);
}

pub trait ActiveTheme {
    fn theme(&self) -> &Theme;
}

impl ActiveTheme for App {
    #[inline(always)]
    fn theme(&self) -> &Theme {
        Theme::global(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ThemeColor {
    #[serde(with = "hex_color")]
    #[schemars(with = "String")]
    pub background: Hsla,
    #[serde(with = "hex_color")]
    #[schemars(with = "String")]
    pub foreground: Hsla,
    #[serde(with = "hex_color")]
    #[schemars(with = "String")]
    pub muted_foreground: Hsla,
    /// Track color of the progress bar.
    #[serde(with = "hex_color")]
    #[schemars(with = "String")]
    pub progress_track: Hsla,
    /// Fill color of the progress bar.
    #[serde(with = "hex_color")]
    #[schemars(with = "String")]
    pub progress_bar: Hsla,
    /// Label color when drawn on top of the fill.
    #[serde(with = "hex_color")]
    #[schemars(with = "String")]
    pub progress_bar_foreground: Hsla,
}

impl ThemeColor {
    pub fn light() -> Self {
        Self {
            background: white(),
            foreground: hsla(0., 0., 0.09, 1.),
            muted_foreground: hsla(0., 0., 0.45, 1.),
            progress_track: hsla(0., 0., 0.94, 1.),
            progress_bar: hsla(211. / 360., 0.97, 0.45, 1.),
            progress_bar_foreground: white(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: hsla(0., 0., 0.04, 1.),
            foreground: hsla(0., 0., 0.98, 1.),
            muted_foreground: hsla(0., 0., 0.64, 1.),
            progress_track: hsla(0., 0., 0.15, 1.),
            progress_bar: hsla(211. / 360., 0.97, 0.55, 1.),
            progress_bar_foreground: white(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Theme {
    pub colors: ThemeColor,
    pub mode: ThemeMode,
    pub font_family: SharedString,
    pub font_size: Pixels,
    /// Radius for the general elements.
    pub radius: Pixels,
}

impl std::ops::Deref for Theme {
    type Target = ThemeColor;

    fn deref(&self) -> &Self::Target {
        &self.colors
    }
}

impl std::ops::DerefMut for Theme {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.colors
    }
}

impl Global for Theme {}

impl Theme {
    /// Returns the global theme reference
    #[inline(always)]
    pub fn global(cx: &App) -> &Theme {
        cx.global::<Theme>()
    }

    /// Returns the global theme mutable reference
    #[inline(always)]
    pub fn global_mut(cx: &mut App) -> &mut Theme {
        cx.global_mut::<Theme>()
    }

    /// Returns true if the theme is dark.
    #[inline(always)]
    pub fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }

    /// Sync the theme with the system appearance
    pub fn sync_system_appearance(window: Option<&mut Window>, cx: &mut App) {
        // Prefer window.appearance(), the app level value can be stale on Linux.
        let appearance = window
            .as_ref()
            .map(|window| window.appearance())
            .unwrap_or_else(|| cx.window_appearance());

        Self::change(appearance, window, cx);
    }

    pub fn change(mode: impl Into<ThemeMode>, window: Option<&mut Window>, cx: &mut App) {
        let mode = mode.into();
        let colors = match mode {
            ThemeMode::Light => ThemeColor::light(),
            ThemeMode::Dark => ThemeColor::dark(),
        };

        if !cx.has_global::<Theme>() {
            cx.set_global(Theme::from(colors));
        }

        let theme = cx.global_mut::<Theme>();
        theme.mode = mode;
        theme.colors = colors;
        tracing::debug!("theme changed to {}", mode.name());

        if let Some(window) = window {
            window.refresh();
        }
    }
}

impl From<ThemeColor> for Theme {
    fn from(colors: ThemeColor) -> Self {
        Theme {
            mode: ThemeMode::default(),
            font_size: px(16.),
            font_family: if cfg!(target_os = "macos") {
                ".SystemUIFont".into()
            } else if cfg!(target_os = "windows") {
                "Segoe UI".into()
            } else {
                "FreeMono".into()
            },
            radius: px(6.),
            colors,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, PartialOrd, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    #[inline(always)]
    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Return lower_case theme name: `light`, `dark`.
    pub fn name(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl From<WindowAppearance> for ThemeMode {
    fn from(appearance: WindowAppearance) -> Self {
        match appearance {
            WindowAppearance::Dark | WindowAppearance::VibrantDark => Self::Dark,
            WindowAppearance::Light | WindowAppearance::VibrantLight => Self::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_mode() {
        assert!(ThemeMode::Dark.is_dark());
        assert!(!ThemeMode::Light.is_dark());
        assert_eq!(ThemeMode::from(WindowAppearance::VibrantLight), ThemeMode::Light);
        assert_eq!(ThemeMode::from(WindowAppearance::Dark), ThemeMode::Dark);
        assert_eq!(
            serde_json::to_string(&ThemeMode::Light).unwrap(),
            r#""light""#
        );
    }

    #[gpui::test]
    fn test_change_theme(cx: &mut gpui::TestAppContext) {
        cx.update(|cx| {
            Theme::change(ThemeMode::Light, None, cx);
            assert!(!cx.theme().is_dark());
            assert_eq!(cx.theme().background, ThemeColor::light().background);

            Theme::change(ThemeMode::Dark, None, cx);
            assert!(cx.theme().is_dark());
            assert_eq!(cx.theme().progress_bar, ThemeColor::dark().progress_bar);
        });
    }
}
