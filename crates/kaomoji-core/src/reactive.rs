//! Thread-local dependency graph between signals and their observers.
//!
//! Notification never runs user code: a changed signal only queues the views
//! and reactions that depend on it. The [`Scheduler`](crate::Scheduler) drains
//! the queues in its settle loop.
//!
//! Several schedulers may share a thread. View observers belong to the
//! scheduler that mounted them, and a reaction created while one of its views
//! renders belongs to that scheduler too. Each scheduler only drains its own
//! entries plus the reactions nobody owns.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

use crate::component::NodeId;
use crate::signal::SignalId;

new_key_type! {
    pub struct ObserverId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SchedulerId(u64);

thread_local! {
    static NEXT_SCHEDULER: Cell<u64> = const { Cell::new(1) };
}

impl SchedulerId {
    pub(crate) fn next() -> Self {
        NEXT_SCHEDULER.with(|n| {
            let id = n.get();
            n.set(id + 1);
            SchedulerId(id)
        })
    }
}

#[derive(Clone)]
pub enum ObserverKind {
    /// A component instance. Dependencies are whatever it read during its
    /// last render.
    View(NodeId),
    /// A reaction. Dependencies are fixed at creation.
    Reaction(Rc<dyn Fn()>),
}

struct Observer {
    kind: ObserverKind,
    deps: HashSet<SignalId>,
    owner: Option<SchedulerId>,
}

enum Claim {
    Mine,
    Foreign,
    Gone,
}

impl Observer {
    fn tracked(&self) -> bool {
        matches!(self.kind, ObserverKind::View(_))
    }
}

thread_local! {
    static CURRENT_OBSERVER: RefCell<Option<ObserverId>> = const { RefCell::new(None) };
    static GRAPH: RefCell<DepGraph> = RefCell::new(DepGraph::default());
}

#[derive(Default)]
struct DepGraph {
    observers: SlotMap<ObserverId, Observer>,
    // signal -> observers that depend on it
    edges: HashMap<SignalId, BTreeSet<ObserverId>>,
    dirty_views: VecDeque<ObserverId>,
    pending_reactions: VecDeque<ObserverId>,
    queued: HashSet<ObserverId>,
}

impl DepGraph {
    fn remove_all_edges_for(&mut self, obs: ObserverId) {
        let Some(o) = self.observers.get_mut(obs) else {
            return;
        };
        for s in o.deps.drain() {
            if let Some(set) = self.edges.get_mut(&s) {
                set.remove(&obs);
                if set.is_empty() {
                    self.edges.remove(&s);
                }
            }
        }
    }

    fn add_edge(&mut self, sig: SignalId, obs: ObserverId) {
        if let Some(o) = self.observers.get_mut(obs) {
            o.deps.insert(sig);
            self.edges.entry(sig).or_default().insert(obs);
        }
    }

    /// Whether a settle of `owner` may run `obs`. Unowned reactions can be run
    /// by anyone.
    fn claim(&self, obs: ObserverId, owner: Option<SchedulerId>) -> Claim {
        match self.observers.get(obs) {
            None => Claim::Gone,
            Some(o) if o.owner.is_none() || o.owner == owner => Claim::Mine,
            Some(_) => Claim::Foreign,
        }
    }

    /// Splits `queue` into what `owner` may run and what stays queued. Entries
    /// of removed observers are dropped.
    fn claim_from(
        &mut self,
        queue: VecDeque<ObserverId>,
        owner: Option<SchedulerId>,
    ) -> (Vec<ObserverId>, VecDeque<ObserverId>) {
        let mut mine = Vec::new();
        let mut rest = VecDeque::new();
        for obs in queue {
            match self.claim(obs, owner) {
                Claim::Mine => {
                    self.queued.remove(&obs);
                    mine.push(obs);
                }
                Claim::Foreign => rest.push_back(obs),
                Claim::Gone => {
                    self.queued.remove(&obs);
                }
            }
        }
        (mine, rest)
    }

    fn enqueue(&mut self, obs: ObserverId) {
        let Some(o) = self.observers.get(obs) else {
            return;
        };
        if !self.queued.insert(obs) {
            return;
        }
        match o.kind {
            ObserverKind::View(_) => self.dirty_views.push_back(obs),
            ObserverKind::Reaction(_) => self.pending_reactions.push_back(obs),
        }
    }
}

pub fn new_view_observer(owner: SchedulerId, node: NodeId) -> ObserverId {
    GRAPH.with(|g| {
        g.borrow_mut().observers.insert(Observer {
            kind: ObserverKind::View(node),
            deps: HashSet::new(),
            owner: Some(owner),
        })
    })
}

/// The reaction is owned by the scheduler whose view is rendering, if any.
pub fn new_reaction(deps: &[SignalId], effect: Rc<dyn Fn()>) -> ObserverId {
    let current = CURRENT_OBSERVER.with(|co| *co.borrow());
    GRAPH.with(|g| {
        let mut g = g.borrow_mut();
        let owner = current.and_then(|o| g.observers.get(o)).and_then(|o| o.owner);
        let id = g.observers.insert(Observer {
            kind: ObserverKind::Reaction(effect),
            deps: HashSet::new(),
            owner,
        });
        for &sig in deps {
            g.add_edge(sig, id);
        }
        id
    })
}

/// Remove an observer and all of its dependency edges.
pub fn remove_observer(id: ObserverId) {
    // May run from scope drops during thread teardown.
    let removed = GRAPH
        .try_with(|g| {
            let mut g = g.borrow_mut();
            g.remove_all_edges_for(id);
            if g.queued.remove(&id) {
                g.dirty_views.retain(|o| *o != id);
                g.pending_reactions.retain(|o| *o != id);
            }
            g.observers.remove(id)
        })
        .ok()
        .flatten();
    // The effect may own the last handle of a signal, whose drop re-enters
    // the graph. Drop it only after the borrow is released.
    drop(removed);
}

pub(crate) fn forget_signal(sig: SignalId) {
    let _ = GRAPH.try_with(|g| {
        let Ok(mut g) = g.try_borrow_mut() else {
            // Edges of an unknown id are never followed; the observer's own
            // removal clears them.
            log::trace!("signal {sig:?} dropped while the graph is borrowed");
            return;
        };
        if let Some(observers) = g.edges.remove(&sig) {
            for obs in observers {
                if let Some(o) = g.observers.get_mut(obs) {
                    o.deps.remove(&sig);
                }
            }
        }
    });
}

pub fn is_alive(id: ObserverId) -> bool {
    GRAPH.with(|g| g.borrow().observers.contains_key(id))
}

pub fn register_signal_read(sig: SignalId) {
    CURRENT_OBSERVER.with(|co| {
        if let Some(obs) = *co.borrow() {
            GRAPH.with(|g| {
                let mut g = g.borrow_mut();
                if g.observers.get(obs).is_some_and(Observer::tracked) {
                    g.add_edge(sig, obs);
                }
            });
        }
    });
}

pub fn signal_changed(sig: SignalId) {
    GRAPH.with(|g| {
        let mut g = g.borrow_mut();
        let observers: Vec<ObserverId> = match g.edges.get(&sig) {
            Some(set) => set.iter().copied().collect(),
            None => return,
        };
        for obs in observers {
            g.enqueue(obs);
        }
    });
}

/// Queue a reaction as if one of its dependencies changed.
pub fn schedule(id: ObserverId) {
    GRAPH.with(|g| g.borrow_mut().enqueue(id));
}

/// Run `f` with `obs` as the current reader. Previous tracked dependencies of
/// `obs` are dropped first.
pub fn track<R>(obs: ObserverId, f: impl FnOnce() -> R) -> R {
    GRAPH.with(|g| g.borrow_mut().remove_all_edges_for(obs));
    with_current(Some(obs), f)
}

pub fn untracked<R>(f: impl FnOnce() -> R) -> R {
    with_current(None, f)
}

/// Puts the previous reader back, also when `f` unwinds.
struct RestoreObserver(Option<ObserverId>);

impl Drop for RestoreObserver {
    fn drop(&mut self) {
        let prev = self.0;
        let _ = CURRENT_OBSERVER.try_with(|co| co.replace(prev));
    }
}

fn with_current<R>(obs: Option<ObserverId>, f: impl FnOnce() -> R) -> R {
    let _restore = RestoreObserver(CURRENT_OBSERVER.with(|co| co.replace(obs)));
    f()
}

/// Drains the views of `owner` from the dirty queue. Views of other
/// schedulers stay queued.
pub fn take_dirty_views(owner: SchedulerId) -> Vec<NodeId> {
    GRAPH.with(|g| {
        let mut g = g.borrow_mut();
        let queue = std::mem::take(&mut g.dirty_views);
        let (mine, rest) = g.claim_from(queue, Some(owner));
        g.dirty_views = rest;
        mine.into_iter()
            .filter_map(|obs| match g.observers.get(obs).map(|o| &o.kind) {
                Some(ObserverKind::View(node)) => Some(*node),
                _ => None,
            })
            .collect()
    })
}

/// Drains the reactions `owner` may run: its own and the unowned ones. With
/// `None`, only unowned reactions.
pub fn take_pending_reactions(owner: Option<SchedulerId>) -> Vec<ObserverId> {
    GRAPH.with(|g| {
        let mut g = g.borrow_mut();
        let queue = std::mem::take(&mut g.pending_reactions);
        let (mine, rest) = g.claim_from(queue, owner);
        g.pending_reactions = rest;
        mine
    })
}

pub fn has_pending(owner: SchedulerId) -> bool {
    GRAPH.with(|g| {
        let g = g.borrow();
        g.dirty_views
            .iter()
            .chain(g.pending_reactions.iter())
            .any(|obs| matches!(g.claim(*obs, Some(owner)), Claim::Mine))
    })
}

/// Drops every queued entry `owner` would run.
pub(crate) fn clear_queues(owner: SchedulerId) {
    GRAPH.with(|g| {
        let mut g = g.borrow_mut();
        let views = std::mem::take(&mut g.dirty_views);
        let (_, views) = g.claim_from(views, Some(owner));
        g.dirty_views = views;
        let reactions = std::mem::take(&mut g.pending_reactions);
        let (_, reactions) = g.claim_from(reactions, Some(owner));
        g.pending_reactions = reactions;
    });
}

/// Invokes a reaction's effect untracked. Returns `false` if it was removed.
pub fn run_reaction(id: ObserverId) -> bool {
    let effect = GRAPH.with(|g| match g.borrow().observers.get(id) {
        Some(Observer {
            kind: ObserverKind::Reaction(f),
            ..
        }) => Some(f.clone()),
        _ => None,
    });
    match effect {
        Some(f) => {
            untracked(|| f());
            true
        }
        None => false,
    }
}

/// Current dependency set of an observer, sorted.
pub fn observer_deps(id: ObserverId) -> Vec<SignalId> {
    GRAPH.with(|g| {
        let mut deps: Vec<SignalId> = g
            .borrow()
            .observers
            .get(id)
            .map(|o| o.deps.iter().copied().collect())
            .unwrap_or_default();
        deps.sort();
        deps
    })
}
