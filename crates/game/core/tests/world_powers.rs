//! Summoning, map and dungeon-wide powers, plus overcharge and sight upkeep.

mod common;

use common::*;
use keeper_core::env::{CreatureSound, Cue, Sample};
use keeper_core::state::{
    Behavior, CreatureModel, EffectThing, EffectThingKind, ObjectKind, ThingClass, ThingsState,
};
use keeper_core::{
    CastError, CastFlags, CastOutcome, CastRequest, PowerKind, SlotKind, SubtileCoord,
};

fn diggers(world: &World) -> usize {
    world
        .state
        .things
        .creatures_of(ME, CreatureModel(1))
        .count()
}

// ============================================================================
// Create digger
// ============================================================================

#[test]
fn digger_price_grows_with_population() {
    let mut world = World::new(1000);
    let summon = CastRequest::on_location(ME, PowerKind::CreateDigger, 5, HOME);

    assert_eq!(world.cast(&summon), CastOutcome::Success);
    // 300 * max(1, 0 - 0 + 1) / 2, regardless of the requested level
    assert_eq!(world.funds(ME), 850);
    assert_eq!(world.cast(&summon), CastOutcome::Success);
    // 300 * (1 - 0 + 1) / 2
    assert_eq!(world.funds(ME), 550);
    assert_eq!(diggers(&world), 2);

    let digger = world
        .state
        .things
        .creatures_of(ME, CreatureModel(1))
        .next()
        .expect("digger summoned");
    assert_eq!(digger.position.z, 384);
    assert_eq!(digger.position.subtile(), HOME);
    let creature = digger.creature().expect("is a creature");
    assert_eq!(creature.behavior, Behavior::DiggerBirth);
    assert_eq!(creature.impulse.z, 160);
    assert!((-80..=80).contains(&creature.impulse.x));
    assert!(world.cues.cues().contains(&Cue::CreatureSound {
        thing: digger.id,
        sound: CreatureSound::Born,
    }));
}

#[test]
fn sacrifices_make_diggers_cheaper() {
    let mut world = World::new(1000);
    for _ in 0..3 {
        world.spawn_creature(ME, imp(), HOME);
    }
    world
        .state
        .player_mut(ME)
        .expect("registered")
        .dungeon
        .creature_sacrifices
        .insert(CreatureModel(1), 2);

    let outcome = world.cast(&CastRequest::on_location(ME, PowerKind::CreateDigger, 0, HOME));

    assert_eq!(outcome, CastOutcome::Success);
    // 300 * (3 - 2 + 1) / 2
    assert_eq!(world.funds(ME), 700);
}

#[test]
fn exhausted_slots_never_charge() {
    let mut world = World::new(1000);
    world.state.things = ThingsState::with_capacity(64, 0);

    let outcome = world.cast(&CastRequest::on_location(ME, PowerKind::CreateDigger, 0, HOME));

    assert_eq!(
        outcome,
        CastOutcome::Fail(CastError::ResourceExhausted(SlotKind::CreatureControl))
    );
    assert_eq!(world.funds(ME), 1000);
    assert_eq!(world.cues.cues(), &[Cue::CannotCreate]);

    world.state.things = ThingsState::with_capacity(0, 8);
    let outcome = world.cast(&CastRequest::on_location(ME, PowerKind::CreateDigger, 0, HOME));

    assert_eq!(
        outcome,
        CastOutcome::Fail(CastError::ResourceExhausted(SlotKind::Thing))
    );
    assert_eq!(world.funds(ME), 1000);
}

#[test]
fn digger_needs_own_claimed_floor() {
    let mut world = World::new(1000);

    let outcome =
        world.cast(&CastRequest::on_location(ME, PowerKind::CreateDigger, 0, ENEMY_FLOOR));

    assert!(matches!(
        outcome,
        CastOutcome::Fail(CastError::IneligibleTarget { .. })
    ));
    assert_eq!(diggers(&world), 0);
    assert_eq!(world.funds(ME), 1000);
}

// ============================================================================
// Sight of evil
// ============================================================================

#[test]
fn sight_recast_recharges_instead_of_paying() {
    let mut world = World::new(1000);
    let first = CastRequest::on_location(ME, PowerKind::Sight, 1, HIDDEN);

    assert_eq!(world.cast(&first), CastOutcome::Success);
    assert_eq!(world.funds(ME), 700);
    let sight = world.state.player(ME).expect("registered").dungeon.sight;
    let eye = sight.eye.expect("eye spawned");
    assert_eq!(sight.level, 1);
    assert_eq!(sight.recharge_turn, 1000);
    assert_eq!(
        world.state.things.get(eye).and_then(|thing| thing.object()),
        Some(ObjectKind::SightEye)
    );
    assert!(world.cues.cues().contains(&Cue::ThingSound {
        thing: eye,
        sample: Sample::SIGHT,
    }));

    world.state.game_turn = 1010;
    let elsewhere = SubtileCoord::new(28, 4);
    let outcome = world.cast(&CastRequest::on_location(ME, PowerKind::Sight, 1, elsewhere));

    assert_eq!(outcome, CastOutcome::Ok);
    assert_eq!(world.funds(ME), 700);
    let sight = world.state.player(ME).expect("registered").dungeon.sight;
    assert_eq!(sight.eye, Some(eye));
    // capacity = 50 >> 2 = 12, divisor = 12 / 4 = 3, elapsed = 10
    assert_eq!(sight.recharge_turn, 1010 - 200 + 10 / 3 - 4);
    assert_eq!(sight.retarget, Some(elsewhere));
}

#[test]
fn sight_window_grows_with_age() {
    let mut world = World::new(1000);
    assert_eq!(
        world.cast(&CastRequest::on_location(ME, PowerKind::Sight, 0, HIDDEN)),
        CastOutcome::Success
    );

    world.state.game_turn = 1009;
    world
        .with_engine(|engine, env, _| engine.update_power_sight_explored(&env, ME))
        .expect("config present");
    let sight = world.state.player(ME).expect("registered").dungeon.sight;
    // one subtile every 4 turns
    assert_eq!(sight.explored_radius, 2);
    assert!(sight.covers(SubtileCoord::new(28, 4)));
    assert!(!sight.covers(SubtileCoord::new(27, 2)));

    world.state.game_turn = 5000;
    world
        .with_engine(|engine, env, _| engine.update_power_sight_explored(&env, ME))
        .expect("config present");
    let sight = world.state.player(ME).expect("registered").dungeon.sight;
    assert_eq!(sight.explored_radius, 15);
}

#[test]
fn turning_off_sight_rewinds_timer() {
    let mut world = World::new(1000);
    assert_eq!(
        world.cast(&CastRequest::on_location(ME, PowerKind::Sight, 0, HIDDEN)),
        CastOutcome::Success
    );
    world.state.game_turn = 1100;

    world
        .with_engine(|engine, env, _| engine.turn_off_sight_of_evil(&env, ME))
        .expect("sight in catalog");

    let sight = world.state.player(ME).expect("registered").dungeon.sight;
    // elapsed clamps to capacity 12
    assert_eq!(sight.recharge_turn, 1100 - 200 + 12 / 3 - 4);
}

// ============================================================================
// Map powers
// ============================================================================

#[test]
fn call_to_arms_rallies_and_relocates() {
    let mut world = World::new(1000);
    let warrior = world.spawn_creature(ME, troll(), SubtileCoord::new(8, 8));
    let worker = world.spawn_creature(ME, imp(), SubtileCoord::new(8, 8));
    let enemy = world.spawn_creature(FOE, troll(), ENEMY_FLOOR);

    assert_eq!(
        world.cast(&CastRequest::on_location(ME, PowerKind::CallToArms, 0, HOME)),
        CastOutcome::Success
    );
    assert_eq!(world.funds(ME), 900);
    assert_eq!(world.creature(warrior).behavior, Behavior::ArriveAtCallToArms);
    assert_eq!(world.creature(worker).behavior, Behavior::Idle);
    assert_eq!(world.creature(enemy).behavior, Behavior::Idle);

    let moved = SubtileCoord::new(10, 4);
    assert_eq!(
        world.cast(&CastRequest::on_location(ME, PowerKind::CallToArms, 0, moved)),
        CastOutcome::Ok
    );
    assert_eq!(world.funds(ME), 900);
    let rally = world
        .state
        .player(ME)
        .expect("registered")
        .dungeon
        .call_to_arms
        .expect("rally active");
    assert_eq!(rally.target, moved);
    let banner = world.state.things.get(rally.banner).expect("banner exists");
    assert_eq!(banner.position, moved.center());
    assert_eq!(banner.object(), Some(ObjectKind::Banner));
}

#[test]
fn extra_flags_widen_call_to_arms() {
    let mut world = World::new(1000);
    let request = CastRequest {
        caster: ME,
        power: PowerKind::CallToArms,
        level: 0,
        target: keeper_core::CastTarget::Location {
            stl: HIDDEN,
            allow_flags: CastFlags::ALLOW_UNREVEALED,
        },
    };

    assert_eq!(world.cast(&request), CastOutcome::Success);
}

#[test]
fn terrain_powers_leave_effects() {
    let mut world = World::new(2000);

    assert_eq!(
        world.cast(&CastRequest::on_location(ME, PowerKind::CaveIn, 2, HOME)),
        CastOutcome::Success
    );
    assert_eq!(
        world.cast(&CastRequest::on_location(ME, PowerKind::DestroyWalls, 0, WALL)),
        CastOutcome::Success
    );
    assert!(
        world
            .cast(&CastRequest::on_location(ME, PowerKind::DestroyWalls, 0, HOME))
            .is_fail()
    );
    assert_eq!(world.funds(ME), 800);

    let effects: Vec<_> = world
        .state
        .things
        .iter()
        .filter_map(|thing| match thing.class {
            ThingClass::Effect(effect) => Some((thing.position.subtile(), effect)),
            _ => None,
        })
        .collect();
    assert_eq!(
        effects,
        vec![
            (
                HOME,
                EffectThing {
                    kind: EffectThingKind::CaveIn,
                    level: 2,
                    magnitude: 5
                }
            ),
            (
                WALL,
                EffectThing {
                    kind: EffectThingKind::DestroyWalls,
                    level: 0,
                    magnitude: 2
                }
            ),
        ]
    );
}

#[test]
fn time_bomb_is_free_noop() {
    let mut world = World::new(500);

    assert_eq!(
        world.cast(&CastRequest::on_location(ME, PowerKind::TimeBomb, 0, HOME)),
        CastOutcome::Ok
    );
    assert!(
        world
            .cast(&CastRequest::on_location(ME, PowerKind::TimeBomb, 0, HIDDEN))
            .is_fail()
    );
    assert_eq!(world.funds(ME), 500);
    assert!(world.state.things.is_empty());
}

// ============================================================================
// Untargeted powers
// ============================================================================

#[test]
fn obey_toggles_and_recomputes_speed() {
    let mut world = World::new(500);
    let own = world.spawn_creature(ME, troll(), HOME);
    let foe = world.spawn_creature(FOE, troll(), ENEMY_FLOOR);
    let obey = CastRequest::untargeted(ME, PowerKind::Obey, 0);

    assert_eq!(world.cast(&obey), CastOutcome::Success);
    assert_eq!(world.creature(own).max_speed, 40);
    assert_eq!(world.creature(foe).max_speed, 32);
    assert_eq!(world.cues.cues(), &[Cue::GlobalSound(Sample::OBEY)]);

    world.state.game_turn = 1001;
    assert_eq!(world.cast(&obey), CastOutcome::Success);
    assert_eq!(world.creature(own).max_speed, 32);
    assert_eq!(world.cues.cues().len(), 1);
    assert_eq!(
        world.state.player(ME).expect("registered").dungeon.must_obey_since,
        None
    );
    assert_eq!(world.funds(ME), 500);
}

#[test]
fn hold_audience_runs_once() {
    let mut world = World::new(3000);
    let warrior = world.spawn_creature(ME, troll(), SubtileCoord::new(8, 8));
    let audience = CastRequest::untargeted(ME, PowerKind::HoldAudience, 0);

    assert_eq!(world.cast(&audience), CastOutcome::Success);
    assert_eq!(world.cast(&audience), CastOutcome::Ok);

    assert_eq!(world.funds(ME), 2000);
    assert_eq!(world.creature(warrior).behavior, Behavior::ArriveAtAudience);
    assert_eq!(
        world.state.player(ME).expect("registered").dungeon.hold_audience_turn,
        Some(1000)
    );
}

#[test]
fn armageddon_is_once_per_game() {
    let mut world = World::new(6000);

    assert_eq!(
        world.cast(&CastRequest::untargeted(ME, PowerKind::Armageddon, 0)),
        CastOutcome::Success
    );
    assert_eq!(
        world.cast(&CastRequest::untargeted(FOE, PowerKind::Armageddon, 0)),
        CastOutcome::Ok
    );

    assert_eq!(world.funds(ME), 1000);
    assert_eq!(world.funds(FOE), 6000);
    let armageddon = world.state.armageddon.expect("running");
    assert_eq!(armageddon.caster, ME);
    assert_eq!(armageddon.since, 1000);
}

// ============================================================================
// Overcharge
// ============================================================================

#[test]
fn overcharge_settles_on_highest_affordable_level() {
    let mut world = World::new(250);
    let level = |world: &mut World| {
        world
            .with_engine(|engine, env, _| engine.overcharge_level(&env, ME))
            .expect("config present")
    };

    let mut levels = Vec::new();
    for _ in 0..24 {
        let more = world
            .with_engine(|engine, env, _| engine.update_overcharge(&env, ME, PowerKind::Lightning))
            .expect("lightning in catalog");
        assert!(more);
        levels.push(level(&mut world));
    }

    assert!(levels.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(levels[12..].iter().all(|&level| level == 2));
}

#[test]
fn overcharge_drops_when_funds_shrink() {
    let mut world = World::new(1000);
    for _ in 0..16 {
        world
            .with_engine(|engine, env, _| engine.update_overcharge(&env, ME, PowerKind::Lightning))
            .expect("lightning in catalog");
    }
    world.set_funds(ME, 120);

    world
        .with_engine(|engine, env, _| engine.update_overcharge(&env, ME, PowerKind::Lightning))
        .expect("lightning in catalog");

    let level = world
        .with_engine(|engine, env, _| engine.overcharge_level(&env, ME))
        .expect("config present");
    assert_eq!(level, 0);
    assert_eq!(
        world
            .state
            .player(ME)
            .expect("registered")
            .control
            .overcharge_accumulator,
        1
    );
}

#[test]
fn directly_cast_uses_the_things_subtile() {
    let mut world = World::new(500);
    let troll = world.spawn_creature(ME, troll(), SubtileCoord::new(9, 3));
    world.wound(troll, 100);

    let outcome = world.with_engine(|engine, env, cues| {
        engine.directly_cast_on_thing(env, cues, ME, PowerKind::HealCreature, 0, troll)
    });

    assert_eq!(outcome, CastOutcome::Success);
    assert_eq!(world.creature(troll).health, 350);
}

#[cfg(feature = "serde")]
#[test]
fn identical_casts_share_a_state_root() {
    use keeper_core::compute_state_root;

    let play = || {
        let mut world = World::new(2000);
        world.spawn_creature(FOE, troll(), HOME);
        world.cast(&CastRequest::on_location(ME, PowerKind::CreateDigger, 0, HOME));
        world.cast(&CastRequest::on_location(ME, PowerKind::Lightning, 1, HOME));
        world.state
    };
    let (left, right) = (play(), play());

    let root = compute_state_root(&left);
    assert_eq!(root, compute_state_root(&right));
    assert_eq!(hex::encode(root).len(), 64);

    let mut diverged = right;
    diverged.game_turn += 1;
    assert_ne!(root, compute_state_root(&diverged));
}
