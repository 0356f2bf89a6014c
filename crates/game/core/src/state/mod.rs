//! Authoritative simulation state touched by the casting engine.
//!
//! This module owns players, dungeons and things. Callers may read it freely
//! but power effects mutate it exclusively through [`crate::engine::MagicEngine`].
mod common;
mod dungeon;
mod effects;
mod error;
mod player;
mod thing;
mod things;

pub use common::{Coord3d, CreatureModel, PlayerId, SUBTILE_SIZE, SubtileCoord, ThingId};
pub use dungeon::{CallToArms, Dungeon, SightOfEvil};
pub use effects::{ActiveEffect, ActiveEffects, EffectKind};
pub use error::StateError;
pub use player::{PlayerControl, PlayerInstance, PlayerState};
pub use thing::{
    Behavior, Creature, CreatureTemplate, CreatureTraits, EffectThing, EffectThingKind,
    ObjectKind, ShotKind, ShotThing, Thing, ThingClass,
};
pub use things::ThingsState;

use crate::config::MagicConfig;

/// Canonical snapshot of the deterministic simulation state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at game initialization and never modified.
    pub game_seed: u64,

    /// Current game turn, advanced by the caller between turns.
    pub game_turn: u64,

    /// Registered players, ordered by id.
    players: Vec<PlayerState>,

    pub things: ThingsState,

    /// Running armageddon, at most one per game.
    pub armageddon: Option<Armageddon>,
}

/// Armageddon bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Armageddon {
    pub caster: PlayerId,
    pub since: u64,
}

impl GameState {
    /// Creates an empty state with a specific game seed.
    pub fn with_seed(game_seed: u64) -> Self {
        Self {
            game_seed,
            ..Self::default()
        }
    }

    /// Creates an empty state sized by `config`.
    pub fn with_config(game_seed: u64, config: &MagicConfig) -> Self {
        Self {
            game_seed,
            things: ThingsState::with_capacity(config.thing_capacity, config.control_capacity),
            ..Self::default()
        }
    }

    /// Registers a player.
    ///
    /// # Errors
    ///
    /// Rejects ids outside the alliance mask and ids already registered.
    pub fn add_player(&mut self, player: PlayerState) -> Result<(), StateError> {
        if usize::from(player.id.0) >= MagicConfig::MAX_PLAYERS {
            return Err(StateError::PlayerOutOfRange(player.id));
        }
        match self.players.binary_search_by_key(&player.id, |p| p.id) {
            Ok(_) => Err(StateError::DuplicatePlayer(player.id)),
            Err(index) => {
                self.players.insert(index, player);
                Ok(())
            }
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players
            .binary_search_by_key(&id, |p| p.id)
            .ok()
            .map(|index| &self.players[index])
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        self.players
            .binary_search_by_key(&id, |p| p.id)
            .ok()
            .map(|index| &mut self.players[index])
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerState> {
        self.players.iter()
    }

    /// Both players declare alliance with each other; a player is always its own ally.
    pub fn players_are_mutual_allies(&self, a: PlayerId, b: PlayerId) -> bool {
        if a == b {
            return true;
        }
        if a.is_neutral() || b.is_neutral() {
            return false;
        }
        let declares = |from: PlayerId, to: PlayerId| {
            self.player(from)
                .is_some_and(|player| player.declares_ally(to))
        };
        declares(a, b) && declares(b, a)
    }

    /// Distinct, non-neutral players that are not mutual allies.
    pub fn players_are_enemies(&self, a: PlayerId, b: PlayerId) -> bool {
        a != b && !a.is_neutral() && !b.is_neutral() && !self.players_are_mutual_allies(a, b)
    }
}

/// Computes a commitment over the whole simulation state.
///
/// Lockstep peers and replays compare this value after each turn; equal roots
/// mean bit-identical state.
///
/// # Serialization
///
/// Requires the `serde` feature.
#[cfg(feature = "serde")]
pub fn compute_state_root(state: &GameState) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    // bincode serialization is deterministic and consistent
    if let Ok(bytes) = bincode::serialize(state) {
        hasher.update(&bytes);
    }
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keeper(id: u8, allies: &[u8]) -> PlayerState {
        let digger = CreatureTemplate {
            model: CreatureModel(1),
            max_health: 75,
            base_speed: 48,
            slaps_to_kill: 5,
            annoy_slapped: 0,
            annoy_woken_up: 0,
            traits: CreatureTraits::DIGGER,
        };
        let mut player = PlayerState::new(PlayerId(id), Dungeon::new(0, digger));
        for ally in allies {
            player.allies |= PlayerId(*ally).mask();
        }
        player
    }

    #[test]
    fn alliance_must_be_mutual() {
        let mut state = GameState::default();
        state.add_player(keeper(0, &[1])).unwrap();
        state.add_player(keeper(1, &[])).unwrap();
        state.add_player(keeper(2, &[3])).unwrap();
        state.add_player(keeper(3, &[2])).unwrap();

        assert!(!state.players_are_mutual_allies(PlayerId(0), PlayerId(1)));
        assert!(state.players_are_enemies(PlayerId(0), PlayerId(1)));
        assert!(state.players_are_mutual_allies(PlayerId(2), PlayerId(3)));
        assert!(!state.players_are_enemies(PlayerId(2), PlayerId(3)));
    }

    #[test]
    fn neutral_is_neither_ally_nor_enemy() {
        let mut state = GameState::default();
        state.add_player(keeper(0, &[5])).unwrap();
        assert!(!state.players_are_mutual_allies(PlayerId(0), PlayerId::NEUTRAL));
        assert!(!state.players_are_enemies(PlayerId(0), PlayerId::NEUTRAL));
        assert!(state.players_are_mutual_allies(PlayerId(0), PlayerId(0)));
        assert!(!state.players_are_enemies(PlayerId(0), PlayerId(0)));
    }

    #[test]
    fn add_player_rejects_duplicates_and_range() {
        let mut state = GameState::default();
        state.add_player(keeper(0, &[])).unwrap();
        assert_eq!(
            state.add_player(keeper(0, &[])),
            Err(StateError::DuplicatePlayer(PlayerId(0)))
        );
        assert_eq!(
            state.add_player(keeper(8, &[])),
            Err(StateError::PlayerOutOfRange(PlayerId(8)))
        );
    }

    #[test]
    fn config_sizes_the_thing_tables() {
        let config = MagicConfig {
            thing_capacity: 3,
            control_capacity: 1,
            ..MagicConfig::default()
        };
        let state = GameState::with_config(7, &config);
        assert_eq!(state.game_seed, 7);
        assert_eq!(state.things.thing_capacity(), 3);
        assert_eq!(state.things.control_capacity(), 1);
    }
}
