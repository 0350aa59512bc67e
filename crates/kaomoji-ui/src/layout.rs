//! Single-column flow layout.
//!
//! Every leaf takes one line of the surface width; lines stack top to bottom
//! in tree order. Ids are assigned in paint order, starting at 1, so they are
//! stable while the tree shape above a node does not change.

use kaomoji_core::*;

use crate::BUTTON_FONT_SIZE;

/// Line box height as a multiple of the font size.
pub const LINE_HEIGHT: f32 = 1.25;
/// Vertical padding above and below button labels, in px.
pub const BUTTON_PADDING: f32 = 4.0;

struct Painter {
    width: f32,
    y: f32,
    next_id: u64,
    scene: Scene,
    hits: Vec<HitRegion>,
    sem: Vec<SemNode>,
}

impl Painter {
    fn id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn line(&mut self, h: f32) -> Rect {
        let rect = Rect {
            x: 0.0,
            y: self.y,
            w: self.width,
            h,
        };
        self.y += h;
        rect
    }

    fn visit(&mut self, v: &View) {
        match &v.kind {
            ViewKind::Column => {
                for child in &v.children {
                    self.visit(child);
                }
            }
            ViewKind::Text {
                text,
                color,
                font_size,
                role,
            } => {
                let id = self.id();
                let rect = self.line(font_size * LINE_HEIGHT);
                self.scene.nodes.push(SceneNode::Text {
                    rect,
                    text: text.clone(),
                    color: color.clone(),
                    size: *font_size,
                });
                let role = v.semantics.as_ref().map(|s| s.role).unwrap_or(match role {
                    TextRole::Heading => Role::Heading,
                    TextRole::Paragraph => Role::Text,
                });
                self.sem.push(SemNode {
                    id,
                    role,
                    label: Some(text.clone()),
                    rect,
                    focused: false,
                    enabled: true,
                });
            }
            ViewKind::Button { text, on_click } => {
                let id = self.id();
                let rect = self.line(BUTTON_FONT_SIZE * LINE_HEIGHT + 2.0 * BUTTON_PADDING);
                self.scene.nodes.push(SceneNode::Border {
                    rect,
                    color: Color::CURRENT,
                    width: 1.0,
                });
                self.scene.nodes.push(SceneNode::Text {
                    rect: Rect {
                        x: rect.x,
                        y: rect.y + BUTTON_PADDING,
                        w: rect.w,
                        h: BUTTON_FONT_SIZE * LINE_HEIGHT,
                    },
                    text: text.clone(),
                    color: Color::CURRENT,
                    size: BUTTON_FONT_SIZE,
                });
                self.hits.push(HitRegion {
                    id,
                    rect,
                    on_click: on_click.clone(),
                    focusable: true,
                });
                let sem = v.semantics.clone().unwrap_or_else(|| Semantics::new(Role::Button));
                self.sem.push(SemNode {
                    id,
                    role: sem.role,
                    label: sem.label.or_else(|| Some(text.clone())),
                    rect,
                    focused: sem.focused,
                    enabled: sem.enabled,
                });
            }
            ViewKind::Component(c) => {
                log::trace!("layout: unassembled component {} skipped", c.name);
            }
        }
    }
}

/// Lays out `root` on a surface of `size` px and paints it.
pub fn layout_and_paint(root: &View, size: (u32, u32)) -> (Scene, Vec<HitRegion>, Vec<SemNode>) {
    let mut p = Painter {
        width: size.0 as f32,
        y: 0.0,
        next_id: 1,
        scene: Scene::default(),
        hits: Vec::new(),
        sem: Vec::new(),
    };
    p.visit(root);
    if p.y > size.1 as f32 {
        log::debug!("layout overflows surface: {} > {}", p.y, size.1);
    }
    (p.scene, p.hits, p.sem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;

    fn sample() -> View {
        Column(vec![
            Heading("Title"),
            Text("body").font_size(18.0),
            Button("go", || {}),
            Text("tail"),
        ])
    }

    #[test]
    fn test_lines_stack_in_tree_order() {
        let (scene, hits, sem) = layout_and_paint(&sample(), (200, 400));

        let ys: Vec<f32> = sem.iter().map(|n| n.rect.y).collect();
        assert_eq!(ys, vec![0.0, 40.0, 62.5, 90.5]);
        assert_eq!(sem.iter().map(|n| n.id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 3);
        assert_eq!(hits[0].rect.h, 28.0);
        assert!(hits[0].rect.contains(Vec2 { x: 10.0, y: 70.0 }));

        // heading, body, button border + label, tail
        assert_eq!(scene.nodes.len(), 5);
    }

    #[test]
    fn test_semantics_roles() {
        let (_, _, sem) = layout_and_paint(&sample(), (200, 400));
        let dump: Vec<String> = sem
            .iter()
            .map(|n| format!("{:?} {}", n.role, n.label.as_deref().unwrap_or("")))
            .collect();
        insta::assert_snapshot!(dump.join("\n"), @r"
        Heading Title
        Text body
        Button go
        Text tail
        ");
    }

    #[test]
    fn test_unassembled_component_paints_nothing() {
        #[derive(PartialEq)]
        struct P;
        let v = Column(vec![component(|_: &P| Text("x"), P), Text("y")]);
        let (scene, _, sem) = layout_and_paint(&v, (100, 100));
        assert_eq!(scene.nodes.len(), 1);
        assert_eq!(sem.len(), 1);
    }
}
