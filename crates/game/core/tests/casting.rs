//! Dispatcher contract: tri-state outcomes, payment and rejection cues.

mod common;

use common::*;
use keeper_core::env::{Cue, Sample};
use keeper_core::state::{EffectKind, EffectThing, EffectThingKind, ThingClass};
use keeper_core::{
    CastError, CastOutcome, CastRequest, EntryPoint, GameError, PowerKind, SubtileCoord,
};

fn lightning_effects(world: &World) -> Vec<i32> {
    world
        .state
        .things
        .iter()
        .filter_map(|thing| match thing.class {
            ThingClass::Effect(EffectThing {
                kind: EffectThingKind::LightningStrike,
                magnitude,
                ..
            }) => Some(magnitude),
            _ => None,
        })
        .collect()
}

#[test]
fn affordable_cast_charges_exact_price() {
    let mut world = World::new(500);
    let outcome = world.cast(&CastRequest::on_location(ME, PowerKind::Lightning, 2, HOME));

    assert_eq!(outcome, CastOutcome::Success);
    assert_eq!(world.funds(ME), 275);
    assert!(world.cues.cues().contains(&Cue::ThingSound {
        thing: world
            .state
            .things
            .iter()
            .find(|thing| matches!(thing.class, ThingClass::Effect(_)))
            .map(|thing| thing.id)
            .expect("strike effect spawned"),
        sample: Sample::LIGHTNING,
    }));
    assert_eq!(world.cues.rejections(), 0);
}

#[test]
fn insufficient_funds_leave_state_untouched() {
    let mut world = World::new(200);
    world
        .state
        .player_mut(ME)
        .expect("registered")
        .control
        .overcharge_accumulator = 9;
    let things_before = world.state.things.len();

    let outcome = world.cast(&CastRequest::on_location(ME, PowerKind::Lightning, 2, HOME));

    assert_eq!(
        outcome,
        CastOutcome::Fail(CastError::InsufficientFunds {
            price: 225,
            funds: 200
        })
    );
    assert_eq!(world.funds(ME), 200);
    assert_eq!(world.state.things.len(), things_before);
    let control = &world.state.player(ME).expect("registered").control;
    assert_eq!(control.overcharge_accumulator, 9);
    assert_eq!(control.last_lightning_turn, None);
    assert_eq!(world.cues.cues(), &[Cue::NotEnoughGold]);
}

#[test]
fn failed_status_cast_attaches_nothing() {
    let mut world = World::new(10);
    let troll = world.spawn_creature(ME, troll(), HOME);
    world.wound(troll, 100);

    let outcome = world.cast(&CastRequest::on_thing(ME, PowerKind::HealCreature, 0, troll, HOME));

    assert!(outcome.is_fail());
    assert!(world.creature(troll).effects.is_empty());
    assert_eq!(world.creature(troll).health, 300);
    assert_eq!(world.funds(ME), 10);
    assert_eq!(world.cues.rejections(), 1);
}

#[test]
fn heal_at_full_health_is_silent_noop() {
    let mut world = World::new(500);
    let troll = world.spawn_creature(ME, troll(), HOME);

    let outcome = world.cast(&CastRequest::on_thing(ME, PowerKind::HealCreature, 0, troll, HOME));

    assert_eq!(outcome, CastOutcome::Ok);
    assert_eq!(world.funds(ME), 500);
    assert!(world.creature(troll).effects.is_empty());
    assert!(world.cues.cues().is_empty());
}

#[test]
fn heal_restores_health_up_to_max() {
    let mut world = World::new(500);
    let troll = world.spawn_creature(ME, troll(), HOME);
    world.wound(troll, 100);

    let outcome = world.cast(&CastRequest::on_thing(ME, PowerKind::HealCreature, 3, troll, HOME));

    assert_eq!(outcome, CastOutcome::Success);
    assert_eq!(world.funds(ME), 500 - u64::from(HEAL_COST[3]));
    assert_eq!(world.creature(troll).health, 350);
    assert!(world.creature(troll).effects.has(EffectKind::Heal));
}

#[test]
fn status_recast_charges_once() {
    let mut world = World::new(500);
    let troll = world.spawn_creature(ME, troll(), HOME);
    let request = CastRequest::on_thing(ME, PowerKind::SpeedCreature, 0, troll, HOME);

    assert_eq!(world.cast(&request), CastOutcome::Success);
    assert_eq!(world.cast(&request), CastOutcome::Ok);

    assert_eq!(world.funds(ME), 420);
    let creature = world.creature(troll);
    assert_eq!(creature.effects.len(), 1);
    assert!(creature.effects.has(EffectKind::Speed));
    assert_eq!(creature.max_speed, 64);
    assert_eq!(
        world.cues.cues(),
        &[Cue::ThingSound {
            thing: troll,
            sample: Sample::SPEED
        }]
    );
}

#[test]
fn protect_recast_charges_once() {
    let mut world = World::new(500);
    let troll = world.spawn_creature(ME, troll(), HOME);
    let request = CastRequest::on_thing(ME, PowerKind::Protect, 0, troll, HOME);

    assert_eq!(world.cast(&request), CastOutcome::Success);
    assert_eq!(world.cast(&request), CastOutcome::Ok);

    assert_eq!(world.funds(ME), 420);
    let creature = world.creature(troll);
    assert_eq!(creature.effects.len(), 1);
    assert!(creature.effects.has(EffectKind::Armour));
    assert_eq!(
        world.cues.cues(),
        &[Cue::ThingSound {
            thing: troll,
            sample: Sample::ARMOUR
        }]
    );
}

#[test]
fn conceal_recast_charges_once() {
    let mut world = World::new(500);
    let troll = world.spawn_creature(ME, troll(), HOME);
    let request = CastRequest::on_thing(ME, PowerKind::Conceal, 0, troll, HOME);

    assert_eq!(world.cast(&request), CastOutcome::Success);
    assert_eq!(world.cast(&request), CastOutcome::Ok);

    assert_eq!(world.funds(ME), 420);
    let creature = world.creature(troll);
    assert_eq!(creature.effects.len(), 1);
    assert!(creature.effects.has(EffectKind::Invisibility));
    assert_eq!(world.cues.rejections(), 0);
}

#[test]
fn chicken_proof_breed_still_pays() {
    let mut world = World::new(500);
    let target = world.spawn_creature(FOE, chicken_proof(), ENEMY_FLOOR);

    let outcome =
        world.cast(&CastRequest::on_thing(ME, PowerKind::Chicken, 0, target, ENEMY_FLOOR));

    assert_eq!(outcome, CastOutcome::Success);
    assert_eq!(world.funds(ME), 350);
    assert!(world.creature(target).effects.is_empty());
}

#[test]
fn disease_remembers_its_caster() {
    let mut world = World::new(500);
    let target = world.spawn_creature(FOE, troll(), ENEMY_FLOOR);

    let outcome =
        world.cast(&CastRequest::on_thing(ME, PowerKind::Disease, 0, target, ENEMY_FLOOR));

    assert_eq!(outcome, CastOutcome::Success);
    let creature = world.creature(target);
    assert_eq!(creature.disease_caster, Some(ME));
    assert_eq!(
        creature.effects.get(EffectKind::Disease).map(|e| e.remaining),
        Some(400)
    );
}

#[test]
fn lightning_hurts_enemies_only() {
    let mut world = World::new(500);
    let enemy = world.spawn_creature(FOE, troll(), HOME);
    let own = world.spawn_creature(ME, troll(), HOME);
    let far = world.spawn_creature(FOE, troll(), SubtileCoord::new(10, 10));

    let outcome = world.cast(&CastRequest::on_location(ME, PowerKind::Lightning, 0, HOME));

    assert_eq!(outcome, CastOutcome::Success);
    // magnitude 4, shot damage 10: 40 damage at the center, range 512
    assert_eq!(world.creature(enemy).health, 360);
    assert_eq!(world.creature(own).health, 400);
    assert_eq!(world.creature(far).health, 400);
    assert_eq!(lightning_effects(&world), vec![40]);
    assert_eq!(
        world
            .state
            .player(ME)
            .expect("registered")
            .control
            .last_lightning_turn,
        Some(1000)
    );
}

#[test]
fn lightning_through_the_eye_is_weaker() {
    let mut world = World::new(1000);
    assert_eq!(
        world.cast(&CastRequest::on_location(ME, PowerKind::Lightning, 0, HIDDEN)),
        CastOutcome::Fail(CastError::IneligibleTarget {
            power: PowerKind::Lightning,
            target: keeper_core::power::Target::Subtile,
        })
    );

    assert_eq!(
        world.cast(&CastRequest::on_location(ME, PowerKind::Sight, 0, HIDDEN)),
        CastOutcome::Success
    );
    let outcome = world.cast(&CastRequest::on_location(ME, PowerKind::Lightning, 0, HIDDEN));

    assert_eq!(outcome, CastOutcome::Success);
    assert_eq!(lightning_effects(&world), vec![10]);
}

#[test]
fn lightning_cooldown_is_inclusive() {
    let mut world = World::new(1000);
    let request = CastRequest::on_location(ME, PowerKind::Lightning, 0, HOME);
    assert_eq!(world.cast(&request), CastOutcome::Success);

    world.state.game_turn = 1020;
    assert!(world.cast(&request).is_fail());

    world.state.game_turn = 1021;
    assert_eq!(world.cast(&request), CastOutcome::Success);
    assert_eq!(world.funds(ME), 800);
}

#[test]
fn unavailable_power_is_rejected_first() {
    let mut world = World::new(500);
    world
        .state
        .player_mut(ME)
        .expect("registered")
        .dungeon
        .available_powers
        .remove(PowerKind::Lightning);

    let outcome = world.cast(&CastRequest::on_location(ME, PowerKind::Lightning, 0, HOME));

    assert_eq!(
        outcome,
        CastOutcome::Fail(CastError::Unavailable {
            caster: ME,
            power: PowerKind::Lightning
        })
    );
    assert_eq!(world.cues.cues(), &[Cue::Rejected]);
}

#[test]
fn rejection_cue_only_reaches_local_player() {
    let mut world = World::new(0);

    let outcome = world.cast(&CastRequest::on_location(FOE, PowerKind::Lightning, 0, ENEMY_FLOOR));

    assert!(outcome.is_fail());
    assert!(world.cues.cues().is_empty());
}

#[test]
fn wrong_entry_point_is_internal_error() {
    let mut world = World::new(500);

    let outcome = world.cast(&CastRequest::on_location(ME, PowerKind::Obey, 0, HOME));

    let error = outcome.error().expect("cast fails");
    assert_eq!(
        error,
        &CastError::UnsupportedPower {
            power: PowerKind::Obey,
            entry: EntryPoint::OnLocation
        }
    );
    assert!(error.severity().is_internal());
    assert_eq!(world.cues.rejections(), 1);
    assert_eq!(world.funds(ME), 500);
}

#[test]
fn level_is_clamped_to_maximum() {
    let mut world = World::new(1000);

    let outcome = world.cast(&CastRequest::on_location(ME, PowerKind::Lightning, 200, HOME));

    assert_eq!(outcome, CastOutcome::Success);
    assert_eq!(world.funds(ME), 1000 - u64::from(LIGHTNING_COST[8]));
}

#[test]
fn unknown_caster_fails_internally() {
    let mut world = World::new(500);

    let outcome = world.cast(&CastRequest::untargeted(
        keeper_core::PlayerId(3),
        PowerKind::Obey,
        0,
    ));

    assert!(matches!(
        outcome,
        CastOutcome::Fail(CastError::UnknownPlayer(_))
    ));
}
