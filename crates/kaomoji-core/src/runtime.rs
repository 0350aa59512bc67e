use std::any::Any;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use slotmap::SlotMap;

use crate::component::NodeId;
use crate::reactive::{self, ObserverId, SchedulerId};
use crate::scope::Scope;
use crate::{ComponentView, Rect, RuntimeError, Scene, View, ViewKind, semantics::Role};

thread_local! {
    pub static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
}

/// Remember slots of the component instance that is currently rendering.
#[derive(Default)]
pub struct Composer {
    pub slots: Vec<Box<dyn Any>>,
    pub cursor: usize,
    pub keyed_slots: HashMap<String, Box<dyn Any>>,
}

/// Slot-based remember (sequential composition only)
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    let (cursor, existing) = COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let cursor = c.cursor;
        c.cursor += 1;

        if let Some(slot) = c.slots.get(cursor) {
            if let Some(rc) = slot.downcast_ref::<Rc<T>>() {
                return (cursor, Some(rc.clone()));
            }
            log::warn!(
                "remember: slot {} type changed; replacing. \
                 If this is due to conditional composition, prefer remember_with_key.",
                cursor
            );
        } else {
            // reserve the slot so remembers inside `init` get the next ones
            c.slots.push(Box::new(()));
        }
        (cursor, None)
    });
    if let Some(rc) = existing {
        return rc;
    }

    let rc: Rc<T> = Rc::new(init());
    COMPOSER.with(|c| {
        if let Some(slot) = c.borrow_mut().slots.get_mut(cursor) {
            *slot = Box::new(rc.clone());
        }
    });
    rc
}

/// Key-based remember
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    let key = key.into();
    let existing = COMPOSER.with(|c| {
        let c = c.borrow();
        match c.keyed_slots.get(&key) {
            Some(existing) => match existing.downcast_ref::<Rc<T>>() {
                Some(rc) => Some(rc.clone()),
                None => {
                    log::warn!(
                        "remember_with_key: key '{}' reused with a different type; replacing.",
                        key
                    );
                    None
                }
            },
            None => None,
        }
    });
    if let Some(rc) = existing {
        return rc;
    }

    let rc: Rc<T> = Rc::new(init());
    COMPOSER.with(|c| c.borrow_mut().keyed_slots.insert(key, Box::new(rc.clone())));
    rc
}

/// Output of layout and paint for one commit.
pub struct Frame {
    pub scene: Scene,
    pub hit_regions: Vec<HitRegion>,
    pub semantics_nodes: Vec<SemNode>,
    pub focus_chain: Vec<u64>,
}

#[derive(Clone)]
pub struct HitRegion {
    pub id: u64,
    pub rect: Rect,
    pub on_click: Option<Rc<dyn Fn()>>,
    pub focusable: bool,
}

impl std::fmt::Debug for HitRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRegion")
            .field("id", &self.id)
            .field("rect", &self.rect)
            .field("focusable", &self.focusable)
            .finish()
    }
}

/// Flattened semantics node produced by `layout_and_paint`.
#[derive(Clone, Debug)]
pub struct SemNode {
    /// Stable id, shared with the associated `HitRegion`.
    pub id: u64,
    pub role: Role,
    pub label: Option<String>,
    pub rect: Rect,
    pub focused: bool,
    pub enabled: bool,
}

pub type LayoutPaint = dyn Fn(&View, (u32, u32)) -> (Scene, Vec<HitRegion>, Vec<SemNode>);

#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Upper bound on render+reaction rounds per settle before it is treated
    /// as an update loop.
    pub max_settle_rounds: usize,
    pub size: (u32, u32),
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_settle_rounds: 64,
            size: (640, 480),
        }
    }
}

impl SchedulerConfig {
    pub fn max_settle_rounds(mut self, rounds: usize) -> Self {
        self.max_settle_rounds = rounds.max(1);
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }
}

struct Instance {
    name: &'static str,
    depth: usize,
    component: ComponentView,
    composer: Composer,
    scope: Scope,
    observer: ObserverId,
    /// Last render output. Child components are still placeholders here.
    output: View,
    children: Vec<NodeId>,
    render_count: u64,
}

/// Owns the mounted component tree and drives render passes and reactions.
pub struct Scheduler {
    id: SchedulerId,
    nodes: SlotMap<NodeId, Instance>,
    root: Option<NodeId>,
    config: SchedulerConfig,
    frame: Option<Frame>,
    commit_count: u64,
    rendered_this_pass: HashSet<NodeId>,
}

impl Scheduler {
    /// Mounts `root` and renders it once. Reactions created during that
    /// render are pending until [`Scheduler::settle`].
    pub fn new<F>(root: F, config: SchedulerConfig) -> Self
    where
        F: Fn() -> View + 'static,
    {
        let mut s = Self {
            id: SchedulerId::next(),
            nodes: SlotMap::with_key(),
            root: None,
            config,
            frame: None,
            commit_count: 0,
            rendered_this_pass: HashSet::new(),
        };
        let root = s.mount(ComponentView::from_fn(root), None);
        s.root = Some(root);
        s.commit();
        s
    }

    /// [`Scheduler::new`] followed by a settle, so mount reactions have run.
    pub fn mount_root<F>(root: F, config: SchedulerConfig) -> Result<Self, RuntimeError>
    where
        F: Fn() -> View + 'static,
    {
        let mut s = Self::new(root, config);
        s.settle()?;
        Ok(s)
    }

    pub fn id(&self) -> SchedulerId {
        self.id
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn size(&self) -> (u32, u32) {
        self.config.size
    }

    pub fn commit_count(&self) -> u64 {
        self.commit_count
    }

    /// Total renders of all instances named `name`.
    pub fn render_count(&self, name: &str) -> u64 {
        self.nodes
            .values()
            .filter(|n| n.name == name)
            .map(|n| n.render_count)
            .sum()
    }

    pub fn instance_count(&self) -> usize {
        self.nodes.len()
    }

    /// Runs render passes and reactions until nothing is pending.
    ///
    /// Each round re-renders the dirty views, commits, then runs the pending
    /// reactions, so a reaction always observes the committed render of the
    /// change that triggered it. Returns the number of rounds.
    pub fn settle(&mut self) -> Result<usize, RuntimeError> {
        let mut rounds = 0;
        while reactive::has_pending(self.id) {
            if rounds == self.config.max_settle_rounds {
                reactive::clear_queues(self.id);
                log::error!("update loop detected after {rounds} settle rounds");
                return Err(RuntimeError::UpdateLoop { rounds });
            }
            rounds += 1;

            let dirty = reactive::take_dirty_views(self.id);
            if !dirty.is_empty() {
                self.render_dirty(dirty);
                self.commit();
            }

            for reaction in reactive::take_pending_reactions(Some(self.id)) {
                log::debug!("run reaction {reaction:?}");
                reactive::run_reaction(reaction);
            }
        }
        if rounds > 0 {
            log::trace!("settled in {rounds} rounds");
        }
        Ok(rounds)
    }

    fn render_dirty(&mut self, mut dirty: Vec<NodeId>) {
        self.rendered_this_pass.clear();
        dirty.retain(|id| self.nodes.contains_key(*id));
        dirty.sort_by_key(|id| self.nodes.get(*id).map(|n| n.depth).unwrap_or(usize::MAX));
        for node in dirty {
            if self.nodes.contains_key(node) && !self.rendered_this_pass.contains(&node) {
                self.render_node(node);
            }
        }
    }

    fn commit(&mut self) {
        self.commit_count += 1;
        self.frame = None;
    }

    /// A child instance's scope hangs off its parent's.
    fn mount(&mut self, component: ComponentView, parent: Option<NodeId>) -> NodeId {
        let name = component.name;
        let owner = self.id;
        let (depth, scope) = match parent.and_then(|p| self.nodes.get(p)) {
            Some(p) => (p.depth + 1, p.scope.child()),
            None => (0, Scope::new()),
        };
        let id = self.nodes.insert_with_key(|key| Instance {
            name,
            depth,
            component,
            composer: Composer::default(),
            scope,
            observer: reactive::new_view_observer(owner, key),
            output: View::new(0, ViewKind::Column),
            children: Vec::new(),
            render_count: 0,
        });
        log::debug!("mount {name} at depth {depth}");
        self.render_node(id);
        id
    }

    fn unmount(&mut self, id: NodeId) {
        let Some(inst) = self.nodes.remove(id) else {
            return;
        };
        // disposes the child scopes first
        inst.scope.dispose();
        reactive::remove_observer(inst.observer);
        for child in inst.children {
            self.unmount(child);
        }
        log::debug!("unmount {}", inst.name);
    }

    fn render_node(&mut self, id: NodeId) {
        let Some(inst) = self.nodes.get_mut(id) else {
            return;
        };
        let component = inst.component.clone();
        let observer = inst.observer;
        let scope = inst.scope.clone();
        let mut composer = std::mem::take(&mut inst.composer);
        composer.cursor = 0;

        COMPOSER.with(|c| std::mem::swap(&mut *c.borrow_mut(), &mut composer));
        let output = reactive::track(observer, || scope.run(|| component.render()));
        COMPOSER.with(|c| std::mem::swap(&mut *c.borrow_mut(), &mut composer));

        let Some(inst) = self.nodes.get_mut(id) else {
            return;
        };
        inst.composer = composer;
        inst.render_count += 1;
        log::debug!("render {} (#{})", inst.name, inst.render_count);
        self.rendered_this_pass.insert(id);
        self.reconcile(id, output);
    }

    /// Matches child component placeholders in `output` against the
    /// instance's previous children, by position.
    fn reconcile(&mut self, id: NodeId, output: View) {
        let Some(inst) = self.nodes.get(id) else {
            return;
        };
        let old_children = inst.children.clone();

        let mut wanted = Vec::new();
        output.walk(&mut |v| {
            if let ViewKind::Component(c) = &v.kind {
                wanted.push(c.clone());
            }
        });

        let mut children = Vec::with_capacity(wanted.len());
        for (i, next) in wanted.into_iter().enumerate() {
            let reuse = old_children.get(i).copied().filter(|old| {
                self.nodes
                    .get(*old)
                    .is_some_and(|o| o.component.same_kind(&next))
            });
            match reuse {
                Some(child) => {
                    let changed = self
                        .nodes
                        .get(child)
                        .is_some_and(|o| !o.component.same_props(&next));
                    if changed {
                        if let Some(c) = self.nodes.get_mut(child) {
                            c.component = next;
                        }
                        self.render_node(child);
                    }
                    children.push(child);
                }
                None => {
                    if let Some(old) = old_children.get(i).copied() {
                        self.unmount(old);
                    }
                    children.push(self.mount(next, Some(id)));
                }
            }
        }
        for old in old_children.iter().skip(children.len()) {
            self.unmount(*old);
        }

        if let Some(inst) = self.nodes.get_mut(id) {
            inst.output = output;
            inst.children = children;
        }
    }

    /// The full view tree with every component placeholder replaced by its
    /// instance's output.
    pub fn view(&self) -> View {
        match self.root {
            Some(root) => self.assemble(root),
            None => View::new(0, ViewKind::Column),
        }
    }

    fn assemble(&self, id: NodeId) -> View {
        let Some(inst) = self.nodes.get(id) else {
            return View::new(0, ViewKind::Column);
        };
        let mut children = inst.children.iter();
        self.substitute(&inst.output, &mut children)
    }

    fn substitute(&self, v: &View, children: &mut std::slice::Iter<'_, NodeId>) -> View {
        if let ViewKind::Component(_) = v.kind {
            return match children.next() {
                Some(child) => self.assemble(*child),
                None => View::new(0, ViewKind::Column),
            };
        }
        let mut out = View {
            id: v.id,
            kind: v.kind.clone(),
            children: Vec::with_capacity(v.children.len()),
            semantics: v.semantics.clone(),
        };
        for c in &v.children {
            out.children.push(self.substitute(c, children));
        }
        out
    }

    /// Layout and paint the current tree, cached until the next commit.
    pub fn frame(&mut self, layout_paint: &LayoutPaint) -> &Frame {
        let frame = match self.frame.take() {
            Some(f) => f,
            None => {
                let root = self.view();
                let (scene, hits, sem) = layout_paint(&root, self.config.size);
                let focus_chain = hits.iter().filter(|h| h.focusable).map(|h| h.id).collect();
                Frame {
                    scene,
                    hit_regions: hits,
                    semantics_nodes: sem,
                    focus_chain,
                }
            }
        };
        self.frame.insert(frame)
    }

    /// Clicks the hit region `id` of the current frame and settles.
    /// Returns `Ok(false)` if no such clickable region exists.
    pub fn dispatch_click(&mut self, id: u64) -> Result<bool, RuntimeError> {
        let on_click = self
            .frame
            .as_ref()
            .and_then(|f| f.hit_regions.iter().find(|h| h.id == id))
            .and_then(|h| h.on_click.clone());
        let Some(on_click) = on_click else {
            return Ok(false);
        };
        reactive::untracked(|| on_click());
        self.settle()?;
        Ok(true)
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Some(root) = self.root.take() {
            self.unmount(root);
        }
    }
}
