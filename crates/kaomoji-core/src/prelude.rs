pub use crate::color::Color;
pub use crate::component::{ComponentView, NodeId};
pub use crate::deps;
pub use crate::effects::{Dispose, effect, on_unmount, scoped_effect};
pub use crate::error::RuntimeError;
pub use crate::geometry::{Rect, Vec2};
pub use crate::reaction::{Deps, Reaction, use_reaction};
pub use crate::reactive::SchedulerId;
pub use crate::render_api::RenderBackend;
pub use crate::runtime::{
    Frame, HitRegion, Scheduler, SchedulerConfig, SemNode, remember, remember_with_key,
};
pub use crate::scope::{Scope, current_scope};
pub use crate::semantics::{Role, Semantics};
pub use crate::signal::{Signal, SignalId, signal};
pub use crate::view::{Scene, SceneNode, TextRole, View, ViewId, ViewKind};
