//! Per-power effect handlers and the table routing power kinds to them.
//!
//! A handler runs after the dispatcher validated availability and targeting.
//! It returns `Resolution::Unchanged` for redundant casts (nothing charged),
//! `Resolution::Applied` once it paid and mutated state, or an error. Every
//! check that may fail runs before payment.
mod digger;
mod influence;
mod level;
mod lightning;
mod sight;
mod slap;
mod status;
mod terrain;

pub use lightning::{LightningStrength, electricity_affecting_area};
pub use slap::slap_creature;

use crate::catalog::PowerKind;

use super::{CastContext, CastError, LocationCast, Resolution, ThingCast};

pub type ThingHandler = fn(&mut CastContext<'_>, ThingCast) -> Result<Resolution, CastError>;
pub type LocationHandler = fn(&mut CastContext<'_>, LocationCast) -> Result<Resolution, CastError>;
/// Untargeted handlers only receive the clamped level.
pub type UntargetedHandler = fn(&mut CastContext<'_>, u8) -> Result<Resolution, CastError>;

/// Handlers registered for one power, per entry point.
#[derive(Clone, Copy, Default)]
pub struct PowerHandlers {
    pub on_thing: Option<ThingHandler>,
    pub on_location: Option<LocationHandler>,
    pub untargeted: Option<UntargetedHandler>,
}

impl PowerHandlers {
    const fn thing(handler: ThingHandler) -> Self {
        Self {
            on_thing: Some(handler),
            on_location: None,
            untargeted: None,
        }
    }

    const fn location(handler: LocationHandler) -> Self {
        Self {
            on_thing: None,
            on_location: Some(handler),
            untargeted: None,
        }
    }

    const fn both(on_thing: ThingHandler, on_location: LocationHandler) -> Self {
        Self {
            on_thing: Some(on_thing),
            on_location: Some(on_location),
            untargeted: None,
        }
    }

    const fn untargeted(handler: UntargetedHandler) -> Self {
        Self {
            on_thing: None,
            on_location: None,
            untargeted: Some(handler),
        }
    }
}

/// Handler table entry of `kind`.
pub fn handlers_for(kind: PowerKind) -> PowerHandlers {
    use PowerKind::*;
    match kind {
        Hand => PowerHandlers::thing(influence::hand),
        Possess => PowerHandlers::thing(influence::possess),
        HealCreature | SpeedCreature | Protect | Conceal | Disease | Chicken => {
            PowerHandlers::thing(status::cast_status)
        }

        Slap => PowerHandlers::both(slap::slap_thing, slap::slap_location),
        CallToArms => PowerHandlers::both(
            terrain::call_to_arms_on_thing,
            terrain::call_to_arms_on_location,
        ),
        Lightning => PowerHandlers::both(
            lightning::lightning_on_thing,
            lightning::lightning_on_location,
        ),

        CreateDigger => PowerHandlers::location(digger::create_digger),
        Sight => PowerHandlers::location(sight::sight),
        CaveIn => PowerHandlers::location(terrain::cave_in),
        DestroyWalls => PowerHandlers::location(terrain::destroy_walls),
        TimeBomb => PowerHandlers::location(terrain::time_bomb),

        Obey => PowerHandlers::untargeted(level::obey),
        HoldAudience => PowerHandlers::untargeted(level::hold_audience),
        Armageddon => PowerHandlers::untargeted(level::armageddon),
    }
}
