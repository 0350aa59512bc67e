use hello_counter::*;
use kaomoji_core::{Scheduler, SchedulerConfig, View};
use kaomoji_platform::{TerminalConfig, run_with_io};
use kaomoji_ui::layout_and_paint;

fn mount() -> Scheduler {
    Scheduler::mount_root(RootView, SchedulerConfig::default()).unwrap()
}

fn press(s: &mut Scheduler, label: &str) {
    let id = s
        .frame(&layout_and_paint)
        .semantics_nodes
        .iter()
        .find(|n| n.label.as_deref() == Some(label))
        .map(|n| n.id)
        .unwrap_or_else(|| panic!("no button {label}"));
    assert!(s.dispatch_click(id).unwrap());
}

/// (counter, face shown), read back from the rendered tree.
fn observed(s: &Scheduler) -> (u64, bool) {
    let texts = s.view().texts();
    let face = texts.iter().any(|t| t == FACE);
    let count = texts
        .iter()
        .filter_map(|t| t.parse::<u64>().ok())
        .next()
        .unwrap_or_else(|| panic!("no counter in {texts:?}"));
    (count, face)
}

fn texts(v: &View) -> Vec<String> {
    v.texts()
}

#[test]
fn render_order_on_mount() {
    let mut s = mount();
    assert_eq!(
        texts(&s.view()),
        vec![HEADING, "How are you?", "I'm fine!", "0", FACE]
    );
    let labels: Vec<String> = s
        .frame(&layout_and_paint)
        .semantics_nodes
        .iter()
        .filter_map(|n| n.label.clone())
        .collect();
    assert_eq!(
        labels,
        vec![
            HEADING,
            "How are you?",
            "I'm fine!",
            COUNT_UP_LABEL,
            TOGGLE_LABEL,
            "0",
            FACE
        ]
    );
}

#[test]
fn labels_carry_their_colors() {
    let s = mount();
    let mut colors = Vec::new();
    s.view().walk(&mut |v| {
        if let kaomoji_core::ViewKind::Text {
            text,
            color,
            font_size,
            ..
        } = &v.kind
        {
            colors.push((text.clone(), color.as_str().to_string(), *font_size));
        }
    });
    assert_eq!(colors[0], (HEADING.to_string(), "red".to_string(), 32.0));
    assert_eq!(
        colors[1],
        ("How are you?".to_string(), "blue".to_string(), MESSAGE_FONT_SIZE)
    );
    assert_eq!(
        colors[2],
        ("I'm fine!".to_string(), "pink".to_string(), MESSAGE_FONT_SIZE)
    );
}

#[test]
fn documented_scenario() {
    let mut s = mount();
    assert_eq!(observed(&s), (0, true));

    press(&mut s, COUNT_UP_LABEL);
    assert_eq!(observed(&s), (1, false));
    press(&mut s, COUNT_UP_LABEL);
    assert_eq!(observed(&s), (2, false));
    press(&mut s, COUNT_UP_LABEL);
    assert_eq!(observed(&s), (3, true));
    press(&mut s, TOGGLE_LABEL);
    assert_eq!(observed(&s), (3, false));
    press(&mut s, COUNT_UP_LABEL);
    assert_eq!(observed(&s), (4, false));
}

#[test]
fn face_follows_multiples_of_three() {
    let mut s = mount();
    for n in 1..=24u64 {
        press(&mut s, COUNT_UP_LABEL);
        assert_eq!(observed(&s), (n, n % 3 == 0), "after {n} increments");
    }
}

#[test]
fn toggle_at_zero_is_user_controlled() {
    let mut s = mount();
    press(&mut s, TOGGLE_LABEL);
    assert_eq!(observed(&s), (0, false));
    press(&mut s, TOGGLE_LABEL);
    assert_eq!(observed(&s), (0, true));
}

#[test]
fn user_toggle_survives_until_next_increment() {
    let mut s = mount();
    press(&mut s, COUNT_UP_LABEL);
    press(&mut s, TOGGLE_LABEL);
    assert_eq!(observed(&s), (1, true));
    press(&mut s, COUNT_UP_LABEL);
    assert_eq!(observed(&s), (2, false));
}

#[test]
fn message_labels_render_once() {
    let mut s = mount();
    assert_eq!(s.render_count("MessageLabel"), 2);
    for _ in 0..5 {
        press(&mut s, COUNT_UP_LABEL);
        press(&mut s, TOGGLE_LABEL);
    }
    assert_eq!(s.render_count("MessageLabel"), 2);
    assert!(s.render_count("RootView") > 1);
}

#[test]
fn toggle_rerenders_without_running_the_reaction() {
    let mut s = mount();
    let renders = s.render_count("RootView");
    let commits = s.commit_count();
    press(&mut s, TOGGLE_LABEL);
    // a reaction write would have caused a second commit
    assert_eq!(s.commit_count(), commits + 1);
    assert_eq!(s.render_count("RootView"), renders + 1);
}

#[test]
fn increment_settles_in_two_commits_when_flag_flips() {
    let mut s = mount();
    let commits = s.commit_count();
    press(&mut s, COUNT_UP_LABEL); // 1: render, reaction hides the face, render
    assert_eq!(s.commit_count(), commits + 2);

    let commits = s.commit_count();
    press(&mut s, COUNT_UP_LABEL); // 2: face already hidden, no second pass
    assert_eq!(s.commit_count(), commits + 1);
}

#[test]
fn face_node_present_iff_flag() {
    let mut s = mount();
    for step in 0..12 {
        if step % 4 == 3 {
            press(&mut s, TOGGLE_LABEL);
        } else {
            press(&mut s, COUNT_UP_LABEL);
        }
        let (scene_has_face, sem_has_face) = {
            let frame = s.frame(&layout_and_paint);
            let sem = frame
                .semantics_nodes
                .iter()
                .any(|n| n.label.as_deref() == Some(FACE));
            let scene = frame.scene.nodes.iter().any(
                |n| matches!(n, kaomoji_core::SceneNode::Text { text, .. } if text == FACE),
            );
            (scene, sem)
        };
        let (_, flag) = observed(&s);
        assert_eq!(scene_has_face, flag);
        assert_eq!(sem_has_face, flag);
    }
}

#[test]
fn terminal_session() {
    let mut out = Vec::new();
    run_with_io(
        RootView,
        TerminalConfig::default().plain(),
        "press カウントアップ\nclick 1\nclick 1\nclick 2\nquit\n".as_bytes(),
        &mut out,
    )
    .unwrap();
    let out = String::from_utf8(out).unwrap();
    insta::assert_snapshot!(out.trim_end(), @r"
    Hello!
    How are you?
    I'm fine!
    [ カウントアップ ]
    [ on/off ]
    0
    (^_-)-☆
    ----
    Hello!
    How are you?
    I'm fine!
    [ カウントアップ ]
    [ on/off ]
    1
    ----
    Hello!
    How are you?
    I'm fine!
    [ カウントアップ ]
    [ on/off ]
    2
    ----
    Hello!
    How are you?
    I'm fine!
    [ カウントアップ ]
    [ on/off ]
    3
    (^_-)-☆
    ----
    Hello!
    How are you?
    I'm fine!
    [ カウントアップ ]
    [ on/off ]
    3
    ----
    ");
}
