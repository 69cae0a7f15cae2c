//! Connected room graph embedded in a 3D lattice.

use std::collections::VecDeque;

use crate::env::{RandomSource, RoomShell, shuffle};
use crate::error::WorldError;
use crate::messages::MessageSink;
use crate::state::{Direction, LatticePos, World};

/// Builds a fully connected [`World`] from room shells.
///
/// # Algorithm
///
/// 1. Shuffle the shells; the first is placed at the origin.
/// 2. Breadth-first over a FIFO frontier: for each room, visit the six
///    directions in random order. An occupied neighbour coordinate is linked
///    (closing a loop); a free one receives the next unplaced room.
/// 3. Stop once every shell is placed.
///
/// Every room is reachable from the origin and every exit is mirrored.
pub struct DungeonGraphBuilder<'a, R: RandomSource + ?Sized> {
    rng: &'a mut R,
}

impl<'a, R: RandomSource + ?Sized> DungeonGraphBuilder<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }

    pub fn build(&mut self, shells: &[RoomShell]) -> Result<World, WorldError> {
        if shells.is_empty() {
            return Err(WorldError::NoRooms);
        }

        let mut order: Vec<&RoomShell> = shells.iter().collect();
        shuffle(&mut *self.rng, &mut order);

        let mut world = World::new();
        let mut unplaced: VecDeque<_> = order
            .iter()
            .map(|shell| world.add_room(shell.kind.clone(), shell.description.clone()))
            .collect();
        // Exit conflicts cannot occur here; the scratch sink is discarded.
        let mut scratch = MessageSink::new();

        let origin = unplaced.pop_front().ok_or(WorldError::NoRooms)?;
        world.place(origin, LatticePos::ORIGIN)?;
        let mut frontier = VecDeque::from([origin]);

        while !unplaced.is_empty() {
            let Some(current) = frontier.pop_front() else {
                break;
            };
            let pos = world
                .position(current)
                .ok_or(WorldError::MissingRoom(current.0))?;

            let mut directions = Direction::ALL;
            shuffle(&mut *self.rng, &mut directions);

            for direction in directions {
                if world.neighbor(current, direction).is_some() {
                    continue;
                }
                let next_pos = pos.step(direction);
                if let Some(occupant) = world.room_at(next_pos) {
                    world.connect(current, direction, occupant, false, &mut scratch)?;
                } else if let Some(next) = unplaced.pop_front() {
                    world.place(next, next_pos)?;
                    world.connect(current, direction, next, false, &mut scratch)?;
                    frontier.push_back(next);
                }
            }
        }

        if !unplaced.is_empty() {
            return Err(WorldError::Stranded {
                unplaced: unplaced.len(),
            });
        }

        tracing::debug!(
            target: "game_core::generation",
            rooms = world.len(),
            "Built dungeon graph"
        );
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, ScriptedRng};
    use crate::state::RoomId;

    fn shells(n: usize) -> Vec<RoomShell> {
        (0..n)
            .map(|i| RoomShell {
                id: format!("room{i}"),
                kind: "hall".into(),
                description: format!("Room {i}"),
            })
            .collect()
    }

    #[test]
    fn empty_input_is_a_construction_fault() {
        let mut rng = PcgRng::seeded(1);
        let err = DungeonGraphBuilder::new(&mut rng).build(&[]).unwrap_err();
        assert_eq!(err, WorldError::NoRooms);
    }

    #[test]
    fn single_room_has_no_exits() {
        let mut rng = PcgRng::seeded(1);
        let world = DungeonGraphBuilder::new(&mut rng).build(&shells(1)).unwrap();
        assert_eq!(world.len(), 1);
        assert_eq!(world.rooms()[0].exit_count(), 0);
        assert_eq!(world.position(RoomId(0)), Some(LatticePos::ORIGIN));
    }

    #[test]
    fn identity_script_places_north_then_south() {
        // Room shuffle [2, 1] and direction shuffle [5, 4, 3, 2, 1] keep input order.
        let mut rng = ScriptedRng::with_ints([2, 1, 5, 4, 3, 2, 1]);
        let world = DungeonGraphBuilder::new(&mut rng).build(&shells(3)).unwrap();

        let (a, b, c) = (RoomId(0), RoomId(1), RoomId(2));
        assert_eq!(world.room(a).unwrap().description, "Room 0");
        assert_eq!(world.neighbor(a, Direction::North), Some(b));
        assert_eq!(world.neighbor(a, Direction::South), Some(c));
        assert_eq!(world.neighbor(b, Direction::South), Some(a));
        assert_eq!(world.neighbor(c, Direction::North), Some(a));
        assert_eq!(world.position(b), Some(LatticePos::new(0, 1, 0)));
        assert_eq!(world.position(c), Some(LatticePos::new(0, -1, 0)));
    }

    #[test]
    fn scripted_build_yields_a_walkable_chain() {
        let shells: Vec<RoomShell> = (1..=3)
            .map(|i| RoomShell {
                id: format!("room{i}"),
                kind: "hall".into(),
                description: format!("Room {i}"),
            })
            .collect();
        // Rooms [1, 2, 3] shuffle to [2, 1, 3]; directions shuffle to [W, E, S, N, U, D].
        let mut rng = ScriptedRng::with_ints([2, 0, 5, 4, 0, 1, 1]);
        let world = DungeonGraphBuilder::new(&mut rng).build(&shells).unwrap();

        let find = |description: &str| {
            world
                .rooms()
                .iter()
                .find(|room| room.description == description)
                .map(|room| room.id)
                .unwrap()
        };
        let (room1, room2, room3) = (find("Room 1"), find("Room 2"), find("Room 3"));
        assert_eq!(world.origin(), Some(room2));
        assert_eq!(world.room(room1).unwrap().exit_count(), 1);
        assert_eq!(world.room(room2).unwrap().exit_count(), 2);
        assert_eq!(world.room(room3).unwrap().exit_count(), 1);

        let mut here = room1;
        here = world.neighbor(here, Direction::East).unwrap();
        assert_eq!(here, room2);
        here = world.neighbor(here, Direction::East).unwrap();
        assert_eq!(here, room3);
        here = world.neighbor(here, Direction::West).unwrap();
        assert_eq!(here, room2);
        here = world.neighbor(here, Direction::West).unwrap();
        assert_eq!(here, room1);
    }

    #[test]
    fn seeded_build_is_connected_and_mirrored() {
        let mut rng = PcgRng::seeded(99);
        let world = DungeonGraphBuilder::new(&mut rng).build(&shells(40)).unwrap();

        let origin = world.origin().unwrap();
        assert_eq!(world.reachable_from(origin).len(), 40);
        for room in world.rooms() {
            for (direction, to) in room.exits() {
                assert_eq!(world.neighbor(to, direction.opposite()), Some(room.id));
                let here = world.position(room.id).unwrap();
                assert_eq!(world.position(to), Some(here.step(direction)));
            }
        }
    }
}
