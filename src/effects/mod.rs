//! Effect resolution for intercepted entities.
//!
//! Abilities change how entities behave by attaching effects to them:
//! - `Interceptable`: An entity's readable, writable and invocable members
//! - `AccessContext`: One access in flight, with initiator and phase
//! - `Effect`: A prioritized, duration-scoped interceptor
//! - `Effects`: The ordered set of effects on one entity
//! - `EffectTarget`: An entity plus its effects, accessed through views
//!
//! ## Resolution
//!
//! Every read, write or invocation through a view builds an
//! [`AccessContext`] and hands it to the applicable effects, highest
//! priority outermost. Equal priorities resolve in the order the effects
//! were attached. An effect that sets a result decides what the access
//! yields; otherwise the entity answers for itself.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use grimoire::core::{EntityId, GamePhase};
//! use grimoire::effects::{Audience, EffectTarget, Interceptable, Override};
//! use grimoire::error::EffectError;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! struct Alignment;
//!
//! struct Seat {
//!     evil: bool,
//! }
//!
//! impl Interceptable for Seat {
//!     type Member = Alignment;
//!     type Value = bool;
//!
//!     fn read(&self, _member: Alignment) -> Result<bool, EffectError> {
//!         Ok(self.evil)
//!     }
//! }
//!
//! let investigator = EntityId::new(2);
//! let mut seat = EffectTarget::new(Seat { evil: false });
//! seat.attach(Arc::new(
//!     Override::new("Framed", Alignment, true).with_audience(Audience::Only(investigator)),
//! ));
//!
//! let now = GamePhase::first_night();
//! assert_eq!(seat.from(Some(investigator)).read(now, Alignment), Ok(true));
//! assert_eq!(seat.view().read(now, Alignment), Ok(false));
//! ```

mod context;
mod effect;
mod library;
mod registry;
mod target;

pub use context::{unsupported, Access, AccessContext, AccessKind, AccessOf, Interceptable};
pub use effect::{Activation, Effect, EffectNext, EffectRef, EffectResult};
pub use library::{Audience, Override, Priorities, Suppress};
pub use registry::{Chain, Effects};
pub use target::{EffectTarget, View, ViewMut};
