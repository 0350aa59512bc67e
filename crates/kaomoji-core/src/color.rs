use std::borrow::Cow;
use std::fmt;

/// A CSS-style color value ("blue", "#ff5733", ...).
///
/// The value is kept verbatim and never validated; backends call
/// [`Color::to_rgba`] and fall back to their own default when it cannot be
/// resolved.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color(Cow<'static, str>);

impl Default for Color {
    fn default() -> Self {
        Color::CURRENT
    }
}

const NAMED: &[(&str, [u8; 4])] = &[
    ("black", [0, 0, 0, 255]),
    ("white", [255, 255, 255, 255]),
    ("red", [255, 0, 0, 255]),
    ("green", [0, 128, 0, 255]),
    ("blue", [0, 0, 255, 255]),
    ("pink", [255, 192, 203, 255]),
    ("yellow", [255, 255, 0, 255]),
    ("orange", [255, 165, 0, 255]),
    ("purple", [128, 0, 128, 255]),
    ("gray", [128, 128, 128, 255]),
    ("grey", [128, 128, 128, 255]),
    ("transparent", [0, 0, 0, 0]),
];

impl Color {
    /// Inherit the backend's foreground color.
    pub const CURRENT: Color = Color(Cow::Borrowed("currentColor"));
    pub const BLACK: Color = Color(Cow::Borrowed("black"));
    pub const WHITE: Color = Color(Cow::Borrowed("white"));
    pub const RED: Color = Color(Cow::Borrowed("red"));

    pub const fn named(name: &'static str) -> Self {
        Color(Cow::Borrowed(name))
    }

    pub fn new(value: impl Into<String>) -> Self {
        Color(Cow::Owned(value.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves CSS named colors and `#rgb`, `#rrggbb`, `#rrggbbaa` hex.
    pub fn to_rgba(&self) -> Option<[u8; 4]> {
        let s = self.0.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        NAMED
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, rgba)| *rgba)
    }
}

fn parse_hex(s: &str) -> Option<[u8; 4]> {
    let byte = |i: usize| u8::from_str_radix(s.get(i..i + 2)?, 16).ok();
    match s.len() {
        3 => {
            let mut out = [0, 0, 0, 255];
            for (i, c) in s.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                out[i] = v * 17;
            }
            Some(out)
        }
        6 => Some([byte(0)?, byte(2)?, byte(4)?, 255]),
        8 => Some([byte(0)?, byte(2)?, byte(4)?, byte(6)?]),
        _ => None,
    }
}

impl From<&'static str> for Color {
    fn from(s: &'static str) -> Self {
        Color(Cow::Borrowed(s))
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Color(Cow::Owned(s))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
