use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;

use slotmap::new_key_type;

use crate::View;

new_key_type! {
    /// A mounted component instance inside a [`Scheduler`](crate::Scheduler).
    pub struct NodeId;
}

/// Placeholder for a child component inside a parent's output. The scheduler
/// mounts an instance for it and only re-renders that instance when the props
/// differ from the previous render.
#[derive(Clone)]
pub struct ComponentView {
    pub name: &'static str,
    pub props_type: TypeId,
    pub props: Rc<dyn Any>,
    props_eq: fn(&dyn Any, &dyn Any) -> bool,
    render: Rc<dyn Fn() -> View>,
}

fn props_eq<P: PartialEq + 'static>(a: &dyn Any, b: &dyn Any) -> bool {
    match (a.downcast_ref::<P>(), b.downcast_ref::<P>()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

pub(crate) fn short_name(full: &'static str) -> &'static str {
    full.rsplit("::").next().unwrap_or(full)
}

impl ComponentView {
    pub fn new<P, F>(render: F, props: P) -> Self
    where
        P: PartialEq + 'static,
        F: Fn(&P) -> View + 'static,
    {
        let props = Rc::new(props);
        let for_render = props.clone();
        Self {
            name: short_name(std::any::type_name::<F>()),
            props_type: TypeId::of::<P>(),
            props,
            props_eq: props_eq::<P>,
            render: Rc::new(move || render(&for_render)),
        }
    }

    /// A component without props.
    pub fn from_fn<F>(render: F) -> Self
    where
        F: Fn() -> View + 'static,
    {
        let mut c = Self::new(move |_: &()| render(), ());
        c.name = short_name(std::any::type_name::<F>());
        c
    }

    pub fn props<P: 'static>(&self) -> Option<&P> {
        self.props.downcast_ref::<P>()
    }

    /// Same component kind (name and props type).
    pub fn same_kind(&self, other: &ComponentView) -> bool {
        self.name == other.name && self.props_type == other.props_type
    }

    pub fn same_props(&self, other: &ComponentView) -> bool {
        self.props_type == other.props_type && (self.props_eq)(&*self.props, &*other.props)
    }

    pub(crate) fn render(&self) -> View {
        (self.render)()
    }
}

impl fmt::Debug for ComponentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component").field("name", &self.name).finish()
    }
}
