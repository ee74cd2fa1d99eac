//! Styles for the text preview produced by [`Model::view`](crate::carousel::Model::view).

use lipgloss_extras::prelude::*;

/// Glyphs and styles of the text preview.
///
/// # Examples
///
/// ```rust
/// use carousel_widget::style::Styles;
/// use lipgloss_extras::prelude::*;
///
/// let styles = Styles {
///     active_dot: "◆".to_string(),
///     active: Style::new().foreground(Color::from("#FF5F87")),
///     ..Styles::default()
/// };
/// assert_eq!(styles.inactive_dot, "○");
/// ```
#[derive(Debug, Clone)]
pub struct Styles {
    /// Glyph of the current slide's indicator.
    pub active_dot: String,
    /// Glyph of every other indicator.
    pub inactive_dot: String,
    /// Style applied to the active glyph.
    pub active: Style,
    /// Base style of the caption line. The slide's background color is
    /// layered on top when it can be parsed.
    pub caption: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            active_dot: "●".to_string(),
            inactive_dot: "○".to_string(),
            active: Style::new().bold(true),
            caption: Style::new(),
        }
    }
}

/// Converts a CSS color to `#rrggbb`.
///
/// Understands `#rgb`, `#rrggbb` and `rgb(r, g, b)`. Anything else (named
/// colors, `hsl()`, alpha forms) returns `None`.
pub fn css_hex(color: &str) -> Option<String> {
    let color = color.trim();
    if let Some(hex) = color.strip_prefix('#') {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        return match hex.len() {
            3 => Some(format!(
                "#{}",
                hex.chars()
                    .flat_map(|c| [c, c])
                    .collect::<String>()
                    .to_ascii_lowercase()
            )),
            6 => Some(format!("#{}", hex.to_ascii_lowercase())),
            _ => None,
        };
    }

    let inner = color.strip_prefix("rgb(")?.strip_suffix(')')?;
    let channels: Vec<u8> = inner
        .split(',')
        .map(|c| c.trim().parse::<u8>().ok())
        .collect::<Option<_>>()?;
    match channels.as_slice() {
        [r, g, b] => Some(format!("#{r:02x}{g:02x}{b:02x}")),
        _ => None,
    }
}
