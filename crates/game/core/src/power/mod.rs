//! Cast authorization, pricing and effect resolution.
//!
//! [`permission`] answers whether a power may target a subtile or a thing,
//! [`economy`] prices and charges casts and tracks overcharge, and the handler
//! table resolves each power once the dispatcher in [`crate::engine`] accepted
//! the request.
mod context;
pub mod economy;
mod error;
mod handlers;
pub mod permission;
mod request;
pub mod sight;

pub use context::CastContext;
pub use error::{CastError, SlotKind, Target};
pub use handlers::{
    LightningStrength, LocationHandler, PowerHandlers, ThingHandler, UntargetedHandler,
    electricity_affecting_area, handlers_for, slap_creature,
};
pub use request::{CastOutcome, CastRequest, CastTarget, LocationCast, Resolution, ThingCast};
