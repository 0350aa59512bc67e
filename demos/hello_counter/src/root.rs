use kaomoji_core::{Color, Deps, Signal, View, deps, remember, signal, use_reaction};
use kaomoji_ui::{Button, Column, Heading, Paragraph, component};

use crate::message::{MessageLabel, MessageProps};

pub const HEADING: &str = "Hello!";
pub const COUNT_UP_LABEL: &str = "カウントアップ";
pub const TOGGLE_LABEL: &str = "on/off";
pub const FACE: &str = "(^_-)-☆";

/// The two state cells of [`RootView`] and the operations on them.
#[derive(Clone, Debug)]
pub struct RootState {
    counter: Signal<u64>,
    show_face: Signal<bool>,
}

impl Default for RootState {
    fn default() -> Self {
        Self::new()
    }
}

impl RootState {
    pub fn new() -> Self {
        Self {
            counter: signal(0),
            show_face: signal(true),
        }
    }

    pub fn counter(&self) -> &Signal<u64> {
        &self.counter
    }

    pub fn show_face(&self) -> &Signal<bool> {
        &self.show_face
    }

    pub fn increment_counter(&self) {
        self.counter.update(|n| *n += 1);
    }

    pub fn toggle_flag(&self) {
        self.show_face.update(|f| *f = !*f);
    }

    /// Face shown on positive multiples of three, hidden on other positive
    /// counts, left alone at zero. Repeated runs with the same count write
    /// nothing since the signal drops same-value writes.
    pub fn on_counter_changed(&self) {
        let n = self.counter.peek();
        log::debug!("on_counter_changed: counter={n}");
        if n > 0 {
            self.show_face.set(n % 3 == 0);
        }
    }

    /// Only the counter: flipping the flag must not re-run the reaction.
    pub fn reaction_deps(&self) -> Deps {
        deps![self.counter]
    }
}

pub fn RootView() -> View {
    let state = remember(RootState::new);
    use_reaction(state.reaction_deps(), {
        let state = (*state).clone();
        move || state.on_counter_changed()
    });

    let count = state.counter().get();
    let show_face = state.show_face().get();
    log::debug!("RootView render: counter={count} show_face={show_face}");

    let mut children = vec![
        Heading(HEADING).color(Color::RED),
        component(MessageLabel, MessageProps::new("blue", "How are you?")),
        component(MessageLabel, MessageProps::new("pink", "I'm fine!")),
        Button(COUNT_UP_LABEL, {
            let state = (*state).clone();
            move || state.increment_counter()
        }),
        Button(TOGGLE_LABEL, {
            let state = (*state).clone();
            move || state.toggle_flag()
        }),
        Paragraph(count.to_string()),
    ];
    if show_face {
        children.push(Paragraph(FACE));
    }
    Column(children)
}
