use anyhow::{Context as _, Result, anyhow};
use gpui::{Hsla, Rgba, hsla};

/// Parse a hex color string, e.g.: `#0ff`, `#00ffff`, `#00ffff80`.
pub fn try_parse_color(color: &str) -> Result<Hsla> {
    let color = color.trim();
    if !color.starts_with('#') {
        return Err(anyhow!("invalid color `{}`, expected `#RRGGBB`", color));
    }

    let rgba = Rgba::try_from(color).with_context(|| format!("invalid color `{}`", color))?;
    Ok(rgba.into())
}

/// Format a color as a `#rrggbb` string, alpha is appended when not opaque.
pub fn to_hex(color: Hsla) -> String {
    let rgba = color.to_rgb();
    let channel = |v: f32| (v.clamp(0., 1.) * 255.).round() as u8;
    let (r, g, b, a) = (
        channel(rgba.r),
        channel(rgba.g),
        channel(rgba.b),
        channel(rgba.a),
    );

    if a == 255 {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }
}

pub(crate) fn white() -> Hsla {
    hsla(0., 0., 1., 1.)
}

pub(crate) fn black() -> Hsla {
    hsla(0., 0., 0., 1.)
}

pub(crate) fn cyan() -> Hsla {
    hsla(180. / 360., 1., 0.5, 1.)
}

/// Serde adapter storing a [`Hsla`] as a hex string.
pub(crate) mod hex_color {
    use gpui::Hsla;
    use serde::{Deserialize as _, Deserializer, Serializer, de::Error as _};

    pub fn serialize<S: Serializer>(color: &Hsla, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Hsla, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::try_parse_color(&value).map_err(|err| D::Error::custom(format!("{:#}", err)))
    }
}
