//! Instance lifetimes.
//!
//! Each mounted component owns a `Scope`. Reactions, effects and `on_unmount`
//! callbacks created while the instance renders register their cleanup with
//! it. A child component's scope is linked under its parent's, so disposing a
//! scope tears down the subtree below it first.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

thread_local! {
    static CURRENT_SCOPE: RefCell<Option<Weak<ScopeState>>> = const { RefCell::new(None) };
}

type Cleanup = Box<dyn FnOnce()>;

#[derive(Clone, Default)]
pub struct Scope(Rc<ScopeState>);

#[derive(Default)]
struct ScopeState {
    cleanups: RefCell<Vec<Cleanup>>,
    // the child instances own their scopes
    children: RefCell<Vec<Weak<ScopeState>>>,
    disposed: Cell<bool>,
}

impl ScopeState {
    fn teardown(&self) {
        let children = std::mem::take(&mut *self.children.borrow_mut());
        for child in children.iter().filter_map(Weak::upgrade) {
            Scope(child).dispose();
        }
        let cleanups = std::mem::take(&mut *self.cleanups.borrow_mut());
        for cleanup in cleanups {
            cleanup();
        }
    }
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope that `self` disposes before running its own cleanups.
    pub fn child(&self) -> Scope {
        let child = Scope::new();
        let mut children = self.0.children.borrow_mut();
        children.retain(|c| c.strong_count() > 0);
        children.push(Rc::downgrade(&child.0));
        child
    }

    /// Runs `f` with `self` as the current scope.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        let prev = CURRENT_SCOPE.with(|c| c.replace(Some(Rc::downgrade(&self.0))));
        let _restore = RestoreScope(prev);
        f()
    }

    /// Cleanups run in registration order. Registering on a disposed scope
    /// runs the cleanup right away.
    pub fn add_disposer(&self, cleanup: impl FnOnce() + 'static) {
        if self.is_disposed() {
            cleanup();
            return;
        }
        self.0.cleanups.borrow_mut().push(Box::new(cleanup));
    }

    pub fn is_disposed(&self) -> bool {
        self.0.disposed.get()
    }

    /// Only the first call does anything.
    pub fn dispose(&self) {
        if !self.0.disposed.replace(true) {
            self.0.teardown();
        }
    }
}

struct RestoreScope(Option<Weak<ScopeState>>);

impl Drop for RestoreScope {
    fn drop(&mut self) {
        let prev = self.0.take();
        let _ = CURRENT_SCOPE.try_with(|c| c.replace(prev));
    }
}

/// Scope of the instance rendering right now.
pub fn current_scope() -> Option<Scope> {
    CURRENT_SCOPE.with(|c| c.borrow().as_ref().and_then(Weak::upgrade).map(Scope))
}

impl Drop for ScopeState {
    fn drop(&mut self) {
        if !self.disposed.replace(true) {
            self.teardown();
        }
    }
}
