//! Reactions with an explicit dependency list.
//!
//! A reaction re-runs when a signal in its *declared* set changes. What the
//! effect closure reads or writes is irrelevant to scheduling, so a reaction
//! may read and write a signal that is not one of its dependencies without
//! ever re-triggering itself through it.

use std::rc::Rc;

use smallvec::SmallVec;

use crate::reactive::{self, ObserverId};
use crate::scope::current_scope;
use crate::{Signal, SignalId, remember};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deps(SmallVec<[SignalId; 4]>);

impl Deps {
    pub fn none() -> Self {
        Self(SmallVec::new())
    }

    pub fn with(mut self, id: SignalId) -> Self {
        if !self.0.contains(&id) {
            self.0.push(id);
        }
        self
    }

    pub fn as_slice(&self) -> &[SignalId] {
        &self.0
    }

    pub fn contains(&self, id: SignalId) -> bool {
        self.0.contains(&id)
    }
}

impl<T> From<&Signal<T>> for Deps {
    fn from(s: &Signal<T>) -> Self {
        Deps::none().with(s.id())
    }
}

impl FromIterator<SignalId> for Deps {
    fn from_iter<I: IntoIterator<Item = SignalId>>(iter: I) -> Self {
        iter.into_iter().fold(Deps::none(), Deps::with)
    }
}

/// `deps![a, b]` builds a [`Deps`] from signal handles.
#[macro_export]
macro_rules! deps {
    ($($s:expr),* $(,)?) => {
        $crate::Deps::none()$(.with(($s).id()))*
    };
}

#[derive(Clone, Debug)]
pub struct Reaction {
    id: ObserverId,
    deps: Deps,
}

impl Reaction {
    pub fn new(deps: impl Into<Deps>, effect: impl Fn() + 'static) -> Self {
        let deps = deps.into();
        let id = reactive::new_reaction(deps.as_slice(), Rc::new(effect));
        Self { id, deps }
    }

    pub fn id(&self) -> ObserverId {
        self.id
    }

    pub fn deps(&self) -> &Deps {
        &self.deps
    }

    /// Runs the effect immediately, outside the settle loop.
    pub fn run_now(&self) -> bool {
        reactive::run_reaction(self.id)
    }

    pub fn schedule(&self) {
        reactive::schedule(self.id);
    }

    pub fn is_alive(&self) -> bool {
        reactive::is_alive(self.id)
    }

    pub fn dispose(&self) {
        reactive::remove_observer(self.id);
    }
}

/// Component-local reaction. Created on the first render of the calling
/// component, run once after the mount commit, then only when `deps` change.
/// Later renders return the existing reaction; their `deps` and `effect` are
/// ignored.
pub fn use_reaction(deps: impl Into<Deps>, effect: impl Fn() + 'static) -> Reaction {
    let reaction = remember(move || {
        let reaction = Reaction::new(deps, effect);
        reaction.schedule();
        if let Some(scope) = current_scope() {
            let r = reaction.clone();
            scope.add_disposer(move || r.dispose());
        }
        log::debug!("reaction {:?} mounted", reaction.id());
        reaction
    });
    (*reaction).clone()
}
