use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::remember;
use crate::scope::current_scope;

/// A cleanup handle. The wrapped closure runs at most once, however many
/// clones call [`Dispose::run`].
#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// A handle with nothing to clean up.
    pub fn noop() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }

    pub fn run(&self) {
        let f = self.0.borrow_mut().take();
        if let Some(f) = f {
            f()
        }
    }

    pub fn is_spent(&self) -> bool {
        self.0.borrow().is_none()
    }

    fn register_in_current_scope(&self) {
        if let Some(scope) = current_scope() {
            let d = self.clone();
            scope.add_disposer(move || d.run());
        }
    }
}

impl fmt::Debug for Dispose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Dispose").field(&!self.is_spent()).finish()
    }
}

/// Runs `setup` now. The returned cleanup also runs when the current scope
/// is disposed.
pub fn effect<F>(setup: F) -> Dispose
where
    F: FnOnce() -> Dispose,
{
    let d = setup();
    d.register_in_current_scope();
    d
}

/// Runs `f` when the component instance rendering right now unmounts.
pub fn on_unmount(f: impl FnOnce() + 'static) -> Dispose {
    let d = Dispose::new(f);
    d.register_in_current_scope();
    d
}

/// [`effect`] that runs once per component instance instead of on every
/// render. Later renders get the first render's handle back.
pub fn scoped_effect<F>(setup: F) -> Dispose
where
    F: FnOnce() -> Dispose,
{
    (*remember(|| effect(setup))).clone()
}
