use super::{Coord3d, CreatureModel, PlayerId, StateError, Thing, ThingClass, ThingId};

/// Every thing on the map, ordered by id.
///
/// Capacities model the fixed thing and creature-control tables: creatures
/// use one slot of each, every other thing only a thing slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThingsState {
    things: Vec<Thing>,
    /// Never reused; zero is reserved as "no thing".
    next_id: u32,
    thing_capacity: usize,
    control_capacity: usize,
}

impl ThingsState {
    pub const DEFAULT_THING_CAPACITY: usize = 2048;
    pub const DEFAULT_CONTROL_CAPACITY: usize = 256;

    pub fn with_capacity(thing_capacity: usize, control_capacity: usize) -> Self {
        Self {
            things: Vec::new(),
            next_id: 1,
            thing_capacity,
            control_capacity,
        }
    }

    pub fn thing_capacity(&self) -> usize {
        self.thing_capacity
    }

    pub fn control_capacity(&self) -> usize {
        self.control_capacity
    }

    pub fn len(&self) -> usize {
        self.things.len()
    }

    pub fn is_empty(&self) -> bool {
        self.things.is_empty()
    }

    pub fn creature_count(&self) -> usize {
        self.things.iter().filter(|thing| thing.is_creature()).count()
    }

    pub fn has_free_thing_slot(&self) -> bool {
        self.things.len() < self.thing_capacity
    }

    pub fn has_free_control_slot(&self) -> bool {
        self.creature_count() < self.control_capacity
    }

    pub fn get(&self, id: ThingId) -> Option<&Thing> {
        self.position_of(id).map(|index| &self.things[index])
    }

    pub fn get_mut(&mut self, id: ThingId) -> Option<&mut Thing> {
        self.position_of(id).map(|index| &mut self.things[index])
    }

    pub fn contains(&self, id: ThingId) -> bool {
        self.position_of(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Thing> {
        self.things.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Thing> {
        self.things.iter_mut()
    }

    /// Creatures of `owner` matching `model` (`CreatureModel::ANY` matches all).
    pub fn creatures_of(
        &self,
        owner: PlayerId,
        model: CreatureModel,
    ) -> impl Iterator<Item = &Thing> {
        self.things.iter().filter(move |thing| {
            thing.owner == owner
                && thing
                    .creature()
                    .is_some_and(|creature| model.matches(creature.model))
        })
    }

    /// Allocates slots and inserts a new thing.
    ///
    /// # Errors
    ///
    /// Fails without mutation when a required slot is unavailable.
    pub fn spawn(
        &mut self,
        owner: PlayerId,
        position: Coord3d,
        creation_turn: u64,
        class: ThingClass,
    ) -> Result<ThingId, StateError> {
        if !self.has_free_thing_slot() {
            return Err(StateError::ThingSlotsExhausted {
                capacity: self.thing_capacity,
            });
        }
        if matches!(class, ThingClass::Creature(_)) && !self.has_free_control_slot() {
            return Err(StateError::ControlSlotsExhausted {
                capacity: self.control_capacity,
            });
        }
        let id = ThingId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(StateError::ThingIdOverflow {
                current: self.next_id,
            })?;
        // Ids are monotonic, so pushing keeps the table sorted.
        self.things.push(Thing {
            id,
            owner,
            position,
            creation_turn,
            picked_up: false,
            class,
        });
        Ok(id)
    }

    pub fn remove(&mut self, id: ThingId) -> Option<Thing> {
        self.position_of(id).map(|index| self.things.remove(index))
    }

    fn position_of(&self, id: ThingId) -> Option<usize> {
        self.things.binary_search_by_key(&id, |thing| thing.id).ok()
    }
}

impl Default for ThingsState {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_THING_CAPACITY, Self::DEFAULT_CONTROL_CAPACITY)
    }
}
