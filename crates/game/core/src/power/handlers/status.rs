//! Powers that attach a timed effect to a creature.
//!
//! Every handler here follows the same order: validate the creature, return
//! `Unchanged` for a redundant cast, pay, then attach and play the sample.

use crate::catalog::{EntryPoint, PowerKind};
use crate::env::Sample;
use crate::state::{ActiveEffect, CreatureTraits, EffectKind};

use crate::power::{CastContext, CastError, Resolution, ThingCast};

/// Effect and sample of one status power.
struct StatusPower {
    effect: EffectKind,
    sample: Sample,
}

fn status_power(power: PowerKind) -> Option<StatusPower> {
    let (effect, sample) = match power {
        PowerKind::HealCreature => (EffectKind::Heal, Sample::HEAL),
        PowerKind::SpeedCreature => (EffectKind::Speed, Sample::SPEED),
        PowerKind::Protect => (EffectKind::Armour, Sample::ARMOUR),
        PowerKind::Conceal => (EffectKind::Invisibility, Sample::CONCEAL),
        PowerKind::Disease => (EffectKind::Disease, Sample::DISEASE),
        PowerKind::Chicken => (EffectKind::Chicken, Sample::CHICKEN),
        _ => return None,
    };
    Some(StatusPower { effect, sample })
}

pub(super) fn cast_status(
    ctx: &mut CastContext<'_>,
    cast: ThingCast,
) -> Result<Resolution, CastError> {
    let Some(status) = status_power(cast.power) else {
        return Err(CastError::UnsupportedPower {
            power: cast.power,
            entry: EntryPoint::OnThing,
        });
    };
    let stats = ctx.power(cast.power)?;
    let creature = ctx.creature(cast.power, cast.thing)?;

    if status.effect == EffectKind::Heal && creature.is_at_full_health() {
        return Ok(Resolution::Unchanged);
    }
    if creature.effects.has(status.effect) {
        return Ok(Resolution::Unchanged);
    }
    let immune = status.effect == EffectKind::Chicken
        && creature.traits.contains(CreatureTraits::NEVER_CHICKENS);

    ctx.pay(cast.power, cast.level)?;

    // Breeds immune to chickening still pay for the attempt.
    if immune {
        return Ok(Resolution::Applied);
    }

    let potency = stats.magnitude_at(cast.level);
    let caster = ctx.caster;
    let owner_must_obey = ctx
        .thing(cast.thing)
        .ok()
        .and_then(|thing| ctx.state.player(thing.owner))
        .is_some_and(|owner| owner.dungeon.must_obey());
    let creature = ctx.creature_mut(cast.power, cast.thing)?;
    // Cannot fail: the list has a slot for every effect kind.
    let _ = creature.effects.attach(ActiveEffect {
        kind: status.effect,
        level: cast.level,
        remaining: stats.duration,
        potency,
    });
    match status.effect {
        EffectKind::Heal => {
            creature.health = creature
                .health
                .saturating_add(potency.max(0))
                .min(creature.max_health);
        }
        EffectKind::Speed => {
            creature.max_speed = creature.compute_max_speed(owner_must_obey);
        }
        EffectKind::Disease => {
            creature.disease_caster = Some(caster);
        }
        EffectKind::Armour | EffectKind::Invisibility | EffectKind::Chicken => {}
    }
    ctx.thing_sound(cast.thing, status.sample);
    Ok(Resolution::Applied)
}
