use kaomoji_core::{Color, View};
use kaomoji_ui::Text;

pub const MESSAGE_FONT_SIZE: f32 = 18.0;

#[derive(Clone, Debug, PartialEq)]
pub struct MessageProps {
    pub color: Color,
    pub content: String,
}

impl MessageProps {
    pub fn new(color: impl Into<Color>, content: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            content: content.into(),
        }
    }
}

/// Colored message text. The color is handed to the renderer as given.
pub fn MessageLabel(props: &MessageProps) -> View {
    Text(props.content.clone())
        .color(props.color.clone())
        .font_size(MESSAGE_FONT_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaomoji_core::ViewKind;

    #[test]
    fn test_label_uses_props_and_fixed_size() {
        let v = MessageLabel(&MessageProps::new("blue", "How are you?"));
        let ViewKind::Text {
            text,
            color,
            font_size,
            ..
        } = v.kind
        else {
            panic!("expected a text view");
        };
        assert_eq!(text, "How are you?");
        assert_eq!(color, Color::from("blue"));
        assert_eq!(font_size, MESSAGE_FONT_SIZE);
    }

    #[test]
    fn test_invalid_color_passes_through() {
        let v = MessageLabel(&MessageProps::new("definitely not a color", "x"));
        match v.kind {
            ViewKind::Text { color, .. } => {
                assert_eq!(color.as_str(), "definitely not a color");
                assert_eq!(color.to_rgba(), None);
            }
            other => panic!("expected a text view, got {other:?}"),
        }
    }
}
