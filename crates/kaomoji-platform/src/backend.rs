use std::io::{self, Write};

use kaomoji_core::{Color, RenderBackend, Scene, SceneNode};

use crate::ColorMode;

/// Written after every frame.
pub const FRAME_RULE: &str = "----";
/// Text at or above this size is drawn bold.
const BOLD_FROM_PX: f32 = 24.0;

/// Draws a scene as lines of text, one per text node. A text node directly
/// after a border is drawn as a button: `[ label ]`.
pub struct TextBackend<W: Write> {
    out: W,
    color: ColorMode,
    frames: u64,
}

impl<W: Write> TextBackend<W> {
    pub fn new(out: W, color: ColorMode) -> Self {
        Self {
            out,
            color,
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Out-of-band line (help, errors).
    pub fn notice(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.out, "{msg}")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_text(&mut self, body: &str, color: &Color, size: f32) -> io::Result<()> {
        if self.color == ColorMode::Plain {
            return writeln!(self.out, "{body}");
        }
        let mut prefix = String::new();
        if size >= BOLD_FROM_PX {
            prefix.push_str("\x1b[1m");
        }
        if let Some([r, g, b, _]) = color.to_rgba() {
            prefix.push_str(&format!("\x1b[38;2;{r};{g};{b}m"));
        }
        if prefix.is_empty() {
            writeln!(self.out, "{body}")
        } else {
            writeln!(self.out, "{prefix}{body}\x1b[0m")
        }
    }
}

impl<W: Write> RenderBackend for TextBackend<W> {
    type Error = io::Error;

    // Lines are never wrapped or clipped.
    fn configure_surface(&mut self, width: u32, height: u32) {
        log::debug!("text surface {width}x{height}");
    }

    fn frame(&mut self, scene: &Scene) -> io::Result<()> {
        let mut boxed = false;
        for node in &scene.nodes {
            match node {
                SceneNode::Border { .. } => boxed = true,
                SceneNode::Text {
                    text, color, size, ..
                } => {
                    if boxed {
                        boxed = false;
                        self.write_text(&format!("[ {text} ]"), color, *size)?;
                    } else {
                        self.write_text(text, color, *size)?;
                    }
                }
            }
        }
        writeln!(self.out, "{FRAME_RULE}")?;
        self.frames += 1;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaomoji_core::Rect;

    fn text(t: &str, color: &'static str, size: f32) -> SceneNode {
        SceneNode::Text {
            rect: Rect::default(),
            text: t.to_string(),
            color: Color::from(color),
            size,
        }
    }

    fn draw(mode: ColorMode, nodes: Vec<SceneNode>) -> String {
        let mut backend = TextBackend::new(Vec::new(), mode);
        backend
            .frame(&Scene {
                clear_color: Color::CURRENT,
                nodes,
            })
            .unwrap();
        assert_eq!(backend.frames(), 1);
        String::from_utf8(backend.into_inner()).unwrap()
    }

    #[test]
    fn test_ansi_colors_and_bold() {
        let out = draw(
            ColorMode::Ansi,
            vec![
                text("Hello!", "red", 32.0),
                text("blue one", "blue", 18.0),
                text("plain", "currentColor", 16.0),
            ],
        );
        assert_eq!(
            out,
            "\x1b[1m\x1b[38;2;255;0;0mHello!\x1b[0m\n\
             \x1b[38;2;0;0;255mblue one\x1b[0m\n\
             plain\n\
             ----\n"
        );
    }

    #[test]
    fn test_unknown_color_draws_default() {
        let out = draw(ColorMode::Ansi, vec![text("x", "no-such-color", 16.0)]);
        assert_eq!(out, "x\n----\n");
    }

    #[test]
    fn test_border_marks_button_label() {
        let out = draw(
            ColorMode::Plain,
            vec![
                SceneNode::Border {
                    rect: Rect::default(),
                    color: Color::CURRENT,
                    width: 1.0,
                },
                text("on/off", "currentColor", 16.0),
                text("after", "red", 16.0),
            ],
        );
        assert_eq!(out, "[ on/off ]\nafter\n----\n");
    }
}
