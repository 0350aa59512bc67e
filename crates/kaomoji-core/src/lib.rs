//! # State, Reactions, and Components
//!
//! Kaomoji uses a small reactive core instead of re-running a whole UI tree
//! on every change. There are three main pieces:
//!
//! - `Signal<T>`: a state cell. Writing the value it already holds is a
//!   no-op: nobody is notified.
//! - `Reaction` / `use_reaction`: a side effect with an explicit dependency
//!   list, re-run only when one of those signals changes.
//! - `Scheduler`: owns the mounted component instances, re-renders exactly
//!   the ones whose signals or props changed, and runs reactions after each
//!   commit.
//!
//! ## Signals
//!
//! ```rust
//! use kaomoji_core::*;
//!
//! let count = signal(0);
//! assert!(count.set(1));
//! assert!(!count.set(1)); // same value, suppressed
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! assert_eq!(count.version(), 2);
//! ```
//!
//! Reads with `get()` made while a component renders subscribe that
//! component to the signal. `peek()` reads without subscribing.
//!
//! ## Reactions
//!
//! ```rust
//! use kaomoji_core::*;
//!
//! let n = signal(0u32);
//! let even = signal(true);
//! let r = Reaction::new(deps![n], {
//!     let (n, even) = (n.clone(), even.clone());
//!     move || {
//!         even.set(n.peek() % 2 == 0);
//!     }
//! });
//! n.set(3);
//! r.run_now();
//! assert!(!even.get());
//! ```
//!
//! A reaction's dependency set is what it declares, not what its closure
//! touches: writing `even` above never schedules `r` again.
//!
//! ## Components
//!
//! Components are plain functions returning a `View`. State lives in
//! `remember` slots of the component instance:
//!
//! ```rust,ignore
//! fn Counter() -> View {
//!     let count = remember(|| signal(0));
//!     Column(vec![
//!         Text(count.get().to_string()),
//!         Button("+1", {
//!             let count = (*count).clone();
//!             move || { count.update(|c| *c += 1); }
//!         }),
//!     ])
//! }
//! ```
//!
//! - `remember` is order-based: the Nth call in a render always refers to
//!   the Nth stored value of that instance.
//! - `remember_with_key` is key-based and stable across conditional branches.

pub mod color;
pub mod component;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod prelude;
pub mod reaction;
pub mod reactive;
pub mod render_api;
pub mod runtime;
pub mod scope;
pub mod semantics;
pub mod signal;
pub mod view;

pub use color::*;
pub use component::*;
pub use effects::*;
pub use error::*;
pub use geometry::*;
pub use prelude::*;
pub use reaction::*;
pub use render_api::*;
pub use runtime::*;
pub use semantics::*;
pub use signal::*;
pub use view::*;
