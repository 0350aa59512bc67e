#![allow(non_snake_case)]
//! Widgets and headless layout.

pub mod layout;

pub use layout::{BUTTON_PADDING, LINE_HEIGHT, layout_and_paint};

use std::rc::Rc;

use kaomoji_core::*;

/// Default body text size in px.
pub const TEXT_FONT_SIZE: f32 = 16.0;
/// Default heading size in px (2em).
pub const HEADING_FONT_SIZE: f32 = 32.0;
pub const BUTTON_FONT_SIZE: f32 = 16.0;

pub fn Column(children: Vec<View>) -> View {
    View::new(0, ViewKind::Column).with_children(children)
}

pub fn Text(text: impl Into<String>) -> View {
    View::new(
        0,
        ViewKind::Text {
            text: text.into(),
            color: Color::CURRENT,
            font_size: TEXT_FONT_SIZE,
            role: TextRole::Paragraph,
        },
    )
}

/// Body text that reads as its own block for assistive tech.
pub fn Paragraph(text: impl Into<String>) -> View {
    Text(text).semantics(Semantics::new(Role::Text))
}

pub fn Heading(text: impl Into<String>) -> View {
    View::new(
        0,
        ViewKind::Text {
            text: text.into(),
            color: Color::CURRENT,
            font_size: HEADING_FONT_SIZE,
            role: TextRole::Heading,
        },
    )
    .semantics(Semantics::new(Role::Heading))
}

pub fn Button(text: impl Into<String>, on_click: impl Fn() + 'static) -> View {
    let text = text.into();
    View::new(
        0,
        ViewKind::Button {
            text: text.clone(),
            on_click: Some(Rc::new(on_click)),
        },
    )
    .semantics(Semantics::new(Role::Button).label(text))
}

/// Child component. `render` is re-run only when `props` differ from the
/// previous render of the parent, or when a signal it read changes.
pub fn component<P, F>(render: F, props: P) -> View
where
    P: PartialEq + 'static,
    F: Fn(&P) -> View + 'static,
{
    View::new(0, ViewKind::Component(ComponentView::new(render, props)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_style_builders() {
        let v = Text("hi").color("pink").font_size(18.0);
        match v.kind {
            ViewKind::Text {
                text,
                color,
                font_size,
                role,
            } => {
                assert_eq!(text, "hi");
                assert_eq!(color.as_str(), "pink");
                assert_eq!(font_size, 18.0);
                assert_eq!(role, TextRole::Paragraph);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_style_builders_ignore_non_text() {
        let v = Button("ok", || {}).color("red").font_size(99.0);
        assert!(matches!(v.kind, ViewKind::Button { .. }));
        assert_eq!(
            v.semantics.and_then(|s| s.label),
            Some("ok".to_string())
        );
    }

    #[test]
    fn test_paragraph_is_body_text() {
        let v = Paragraph("7");
        assert!(matches!(
            v.kind,
            ViewKind::Text {
                role: TextRole::Paragraph,
                ..
            }
        ));
        assert_eq!(v.semantics.map(|s| s.role), Some(Role::Text));
    }

    #[derive(PartialEq)]
    struct Props(u8);

    fn child(p: &Props) -> View {
        Text(p.0.to_string())
    }

    #[test]
    fn test_component_placeholder() {
        let v = component(child, Props(3));
        let ViewKind::Component(c) = &v.kind else {
            panic!("expected component");
        };
        assert_eq!(c.name, "child");
        assert_eq!(c.props::<Props>().map(|p| p.0), Some(3));

        let same = ComponentView::new(child, Props(3));
        let other = ComponentView::new(child, Props(4));
        assert!(c.same_props(&same));
        assert!(!c.same_props(&other));
    }
}
