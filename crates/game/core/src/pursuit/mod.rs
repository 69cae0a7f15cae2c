//! Enemy activation and pursuit.
//!
//! An enemy is [`ActivationState::Inactive`] until the player shares its
//! room, after which it is tracked as [`ActivationState::Active`] in a
//! specific room. Whenever the player leaves, every active enemy left behind
//! rolls to follow. Records are dropped when their enemy dies or its corpse
//! is looted.

use crate::config::PursuitTables;
use crate::env::RandomSource;
use crate::messages::MessageSink;
use crate::state::{EntityId, RoomId, World};

/// Whether an enemy has noticed the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationState {
    Inactive,
    Active { room: RoomId },
}

/// Result of one pursuit check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PursuitOutcome {
    Followed,
    StayedBehind,
}

/// Tracker record for one active enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivatedEnemy {
    pub enemy: EntityId,
    pub room: RoomId,
    /// Set when the enemy followed the player during the current cycle.
    pub arrived: bool,
}

/// Maps a pursuit roll to its outcome: `roll <= follow_threshold` follows.
pub fn follow_outcome(roll: u32, tables: &PursuitTables) -> PursuitOutcome {
    if roll <= tables.follow_threshold {
        PursuitOutcome::Followed
    } else {
        PursuitOutcome::StayedBehind
    }
}

#[derive(Clone, Debug, Default)]
pub struct EnemyTracker {
    records: Vec<ActivatedEnemy>,
    tables: PursuitTables,
}

impl EnemyTracker {
    pub fn new(tables: PursuitTables) -> Self {
        Self {
            records: Vec::new(),
            tables,
        }
    }

    pub fn records(&self) -> &[ActivatedEnemy] {
        &self.records
    }

    pub fn state(&self, enemy: EntityId) -> ActivationState {
        self.record(enemy)
            .map_or(ActivationState::Inactive, |record| ActivationState::Active {
                room: record.room,
            })
    }

    pub fn is_active(&self, enemy: EntityId) -> bool {
        self.record(enemy).is_some()
    }

    fn record(&self, enemy: EntityId) -> Option<&ActivatedEnemy> {
        self.records.iter().find(|record| record.enemy == enemy)
    }

    /// Clears per-cycle arrival flags.
    pub fn begin_cycle(&mut self) {
        for record in &mut self.records {
            record.arrived = false;
        }
    }

    /// Activates every living, untracked enemy in `room`. Returns how many
    /// became active.
    pub fn activate_room(&mut self, world: &World, room: RoomId) -> usize {
        let Some(current) = world.room(room) else {
            return 0;
        };
        let before = self.records.len();
        for enemy in current.living_enemies() {
            if !self.is_active(enemy.id) {
                self.records.push(ActivatedEnemy {
                    enemy: enemy.id,
                    room,
                    arrived: false,
                });
            }
        }

        let activated = self.records.len() - before;
        if activated > 0 {
            tracing::debug!(target: "game_core::pursuit", %room, activated, "Enemies activated");
        }
        activated
    }

    /// Starts tracking an enemy directly (an ambusher joining the room).
    pub fn track(&mut self, enemy: EntityId, room: RoomId) {
        if !self.is_active(enemy) {
            self.records.push(ActivatedEnemy {
                enemy,
                room,
                arrived: false,
            });
        }
    }

    pub fn forget(&mut self, enemy: EntityId) {
        self.records.retain(|record| record.enemy != enemy);
    }

    /// Drops records whose enemy is dead or no longer in its room.
    pub fn prune_dead(&mut self, world: &World) {
        self.records.retain(|record| {
            world
                .room(record.room)
                .and_then(|room| room.enemy(record.enemy))
                .is_some_and(|enemy| enemy.is_alive())
        });
    }

    /// Active enemies in `room` that did not arrive this cycle.
    pub fn ready_in(&self, room: RoomId) -> Vec<EntityId> {
        self.records
            .iter()
            .filter(|record| record.room == room && !record.arrived)
            .map(|record| record.enemy)
            .collect()
    }

    /// Rolls a pursuit check for every active enemy outside `player_room`.
    ///
    /// Followers are moved into `player_room` and announced.
    pub fn resolve_pursuit(
        &mut self,
        world: &mut World,
        player_room: RoomId,
        rng: &mut (impl RandomSource + ?Sized),
        sink: &mut MessageSink,
    ) -> Vec<(EntityId, PursuitOutcome)> {
        self.prune_dead(world);

        let mut outcomes = Vec::new();
        for record in &mut self.records {
            if record.room == player_room {
                continue;
            }
            let roll = rng.roll_die(self.tables.follow_die);
            let outcome = follow_outcome(roll, &self.tables);

            if outcome == PursuitOutcome::Followed
                && world.relocate_enemy(record.enemy, record.room, player_room)
            {
                record.room = player_room;
                record.arrived = true;
                if let Some(enemy) = world.room(player_room).and_then(|r| r.enemy(record.enemy)) {
                    sink.push(format!("{} follows you.", enemy.name));
                }
            }

            tracing::debug!(
                target: "game_core::pursuit",
                enemy = %record.enemy,
                roll,
                ?outcome,
                "Pursuit check"
            );
            outcomes.push((record.enemy, outcome));
        }
        outcomes
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;
    use crate::state::{Combatant, Direction};

    fn world_with_goblin() -> (World, RoomId, RoomId) {
        let mut sink = MessageSink::new();
        let mut world = World::new();
        let a = world.add_room("hall", "Room A");
        let b = world.add_room("hall", "Room B");
        world.connect(a, Direction::North, b, false, &mut sink).unwrap();
        world
            .room_mut(a)
            .unwrap()
            .add_enemy(Combatant::new(EntityId(1), "Goblin", 10, 0), &mut sink);
        (world, a, b)
    }

    #[test]
    fn outcome_threshold() {
        let tables = PursuitTables::default();
        assert_eq!(follow_outcome(1, &tables), PursuitOutcome::Followed);
        assert_eq!(follow_outcome(7, &tables), PursuitOutcome::Followed);
        assert_eq!(follow_outcome(8, &tables), PursuitOutcome::StayedBehind);
        assert_eq!(follow_outcome(10, &tables), PursuitOutcome::StayedBehind);
    }

    #[test]
    fn activation_tracks_living_enemies_once() {
        let (world, a, _) = world_with_goblin();
        let mut tracker = EnemyTracker::default();

        assert_eq!(tracker.state(EntityId(1)), ActivationState::Inactive);
        assert_eq!(tracker.activate_room(&world, a), 1);
        assert_eq!(tracker.activate_room(&world, a), 0);
        assert_eq!(
            tracker.state(EntityId(1)),
            ActivationState::Active { room: a }
        );
    }

    #[test]
    fn low_roll_follows_player() {
        let (mut world, a, b) = world_with_goblin();
        let mut tracker = EnemyTracker::default();
        tracker.activate_room(&world, a);
        let mut rng = ScriptedRng::with_ints([7]);
        let mut sink = MessageSink::new();

        let outcomes = tracker.resolve_pursuit(&mut world, b, &mut rng, &mut sink);

        assert_eq!(outcomes, [(EntityId(1), PursuitOutcome::Followed)]);
        assert!(world.room(b).unwrap().enemy(EntityId(1)).is_some());
        assert!(world.room(a).unwrap().enemies().is_empty());
        assert_eq!(tracker.state(EntityId(1)), ActivationState::Active { room: b });
        assert!(sink.contains("Goblin follows you."));
        assert!(tracker.ready_in(b).is_empty());
    }

    #[test]
    fn high_roll_stays_behind() {
        let (mut world, a, b) = world_with_goblin();
        let mut tracker = EnemyTracker::default();
        tracker.activate_room(&world, a);
        let mut rng = ScriptedRng::with_ints([8]);
        let mut sink = MessageSink::new();

        let outcomes = tracker.resolve_pursuit(&mut world, b, &mut rng, &mut sink);

        assert_eq!(outcomes, [(EntityId(1), PursuitOutcome::StayedBehind)]);
        assert!(world.room(a).unwrap().enemy(EntityId(1)).is_some());
        assert_eq!(tracker.state(EntityId(1)), ActivationState::Active { room: a });
        assert!(sink.is_empty());
    }

    #[test]
    fn dead_enemies_are_pruned_before_rolling() {
        let (mut world, a, b) = world_with_goblin();
        let mut tracker = EnemyTracker::default();
        tracker.activate_room(&world, a);
        world
            .room_mut(a)
            .unwrap()
            .enemy_mut(EntityId(1))
            .unwrap()
            .apply_damage(10);
        let mut rng = ScriptedRng::with_ints([1]);
        let mut sink = MessageSink::new();

        let outcomes = tracker.resolve_pursuit(&mut world, b, &mut rng, &mut sink);

        assert!(outcomes.is_empty());
        assert!(tracker.records().is_empty());
        assert_eq!(rng.remaining_ints(), 1);
    }

    #[test]
    fn begin_cycle_clears_arrivals() {
        let (mut world, a, b) = world_with_goblin();
        let mut tracker = EnemyTracker::default();
        tracker.activate_room(&world, a);
        let mut rng = ScriptedRng::with_ints([1]);
        tracker.resolve_pursuit(&mut world, b, &mut rng, &mut MessageSink::new());

        tracker.begin_cycle();
        assert_eq!(tracker.ready_in(b), [EntityId(1)]);
    }
}
