use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::reactive;

pub type SubId = usize;

/// Process-unique (per thread) identity of a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignalId(u64);

thread_local! {
    static NEXT_SIGNAL: Cell<u64> = const { Cell::new(1) };
}

impl SignalId {
    fn next() -> Self {
        NEXT_SIGNAL.with(|n| {
            let id = n.get();
            n.set(id + 1);
            SignalId(id)
        })
    }
}

/// A state cell. Cloning the handle shares the cell.
pub struct Signal<T>(Rc<Inner<T>>);

struct Inner<T> {
    id: SignalId,
    value: RefCell<T>,
    version: Cell<u64>,
    next_sub: Cell<SubId>,
    subs: RefCell<Vec<(SubId, Rc<dyn Fn(&T)>)>>,
}

impl<T> Drop for Inner<T> {
    fn drop(&mut self) {
        reactive::forget_signal(self.id);
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(Inner {
            id: SignalId::next(),
            value: RefCell::new(value),
            version: Cell::new(0),
            next_sub: Cell::new(0),
            subs: RefCell::new(Vec::new()),
        }))
    }

    pub fn id(&self) -> SignalId {
        self.0.id
    }

    /// Tracked read: the view currently rendering will re-render when this
    /// signal changes.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        reactive::register_signal_read(self.0.id);
        self.0.value.borrow().clone()
    }

    /// Untracked read.
    pub fn peek(&self) -> T
    where
        T: Clone,
    {
        self.0.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        reactive::register_signal_read(self.0.id);
        f(&self.0.value.borrow())
    }

    /// Number of writes that actually changed the value.
    pub fn version(&self) -> u64 {
        self.0.version.get()
    }

    /// Writes `v`. A write equal to the current value is dropped without
    /// notifying anyone; returns whether the value changed.
    pub fn set(&self, v: T) -> bool
    where
        T: PartialEq,
    {
        {
            let mut value = self.0.value.borrow_mut();
            if *value == v {
                log::trace!("signal {:?}: same-value write suppressed", self.0.id);
                return false;
            }
            *value = v;
        }
        self.0.version.set(self.0.version.get() + 1);
        self.notify();
        true
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool
    where
        T: Clone + PartialEq,
    {
        let mut next = self.peek();
        f(&mut next);
        self.set(next)
    }

    /// Subscribers must not write this same signal from the callback.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let id = self.0.next_sub.get();
        self.0.next_sub.set(id + 1);
        self.0.subs.borrow_mut().push((id, Rc::new(f)));
        id
    }

    pub fn unsubscribe(&self, id: SubId) -> bool {
        let mut subs = self.0.subs.borrow_mut();
        let before = subs.len();
        subs.retain(|(sid, _)| *sid != id);
        subs.len() != before
    }

    fn notify(&self) {
        let subs: Vec<Rc<dyn Fn(&T)>> = self.0.subs.borrow().iter().map(|(_, s)| s.clone()).collect();
        if !subs.is_empty() {
            let value = self.0.value.borrow();
            for s in &subs {
                s(&value);
            }
        }
        reactive::signal_changed(self.0.id);
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("id", &self.0.id)
            .field("value", &*self.0.value.borrow())
            .field("version", &self.0.version.get())
            .finish()
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
