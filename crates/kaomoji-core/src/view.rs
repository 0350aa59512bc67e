use std::rc::Rc;

use crate::{Color, ComponentView, Rect};

pub type ViewId = u64;

pub type Callback = Rc<dyn Fn()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextRole {
    Heading,
    Paragraph,
}

#[derive(Clone)]
pub enum ViewKind {
    Column,
    Text {
        text: String,
        color: Color,
        font_size: f32,
        role: TextRole,
    },
    Button {
        text: String,
        on_click: Option<Callback>,
    },
    Component(ComponentView),
}

impl std::fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Column => write!(f, "Column"),
            ViewKind::Text {
                text,
                color,
                font_size,
                role,
            } => f
                .debug_struct("Text")
                .field("text", text)
                .field("color", color)
                .field("font_size", font_size)
                .field("role", role)
                .finish(),
            ViewKind::Button { text, .. } => f
                .debug_struct("Button")
                .field("text", text)
                .field("on_click", &"<callback>")
                .finish(),
            ViewKind::Component(c) => std::fmt::Debug::fmt(c, f),
        }
    }
}

#[derive(Clone, Debug)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
    pub children: Vec<View>,
    pub semantics: Option<crate::semantics::Semantics>,
}

impl View {
    pub fn new(id: ViewId, kind: ViewKind) -> Self {
        View {
            id,
            kind,
            children: vec![],
            semantics: None,
        }
    }
    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }
    pub fn semantics(mut self, s: crate::semantics::Semantics) -> Self {
        self.semantics = Some(s);
        self
    }
    /// Text color. No effect on non-text views.
    pub fn color(mut self, c: impl Into<Color>) -> Self {
        if let ViewKind::Text { color, .. } = &mut self.kind {
            *color = c.into();
        }
        self
    }
    /// Font size in px. No effect on non-text views.
    pub fn font_size(mut self, px: f32) -> Self {
        if let ViewKind::Text { font_size, .. } = &mut self.kind {
            *font_size = px;
        }
        self
    }

    /// Depth-first walk, parents before children.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a View)) {
        f(self);
        for c in &self.children {
            c.walk(f);
        }
    }

    /// All text content in tree order.
    pub fn texts(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.walk(&mut |v| {
            if let ViewKind::Text { text, .. } = &v.kind {
                out.push(text.clone());
            }
        });
        out
    }
}

/// Renderable scene
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub clear_color: Color,
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug)]
pub enum SceneNode {
    Border {
        rect: Rect,
        color: Color,
        width: f32,
    },
    Text {
        rect: Rect,
        text: String,
        color: Color,
        size: f32,
    },
}
