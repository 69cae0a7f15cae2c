//! Room arena with lattice placement and exit wiring.

use std::collections::{HashMap, HashSet, VecDeque};
use std::str::FromStr;

use crate::error::{GameplayError, WorldError};
use crate::messages::MessageSink;

use super::{Combatant, Direction, EntityId, IdAllocator, LatticePos, Room, RoomId};

/// Every room of one dungeon, addressed by [`RoomId`].
///
/// Rooms are only ever added; a `RoomId` handed out by [`World::add_room`]
/// stays valid for the lifetime of the world.
#[derive(Clone, Debug, Default)]
pub struct World {
    rooms: Vec<Room>,
    positions: HashMap<RoomId, LatticePos>,
    occupancy: HashMap<LatticePos, RoomId>,
    origin: Option<RoomId>,
    pub ids: IdAllocator,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_room(&mut self, kind: impl Into<String>, description: impl Into<String>) -> RoomId {
        let id = RoomId(self.rooms.len() as u32);
        self.rooms.push(Room::new(id, kind, description));
        id
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn rooms_mut(&mut self) -> &mut [Room] {
        &mut self.rooms
    }

    /// Rooms and the id allocator, borrowed together.
    pub fn rooms_and_ids(&mut self) -> (&mut [Room], &mut IdAllocator) {
        (&mut self.rooms, &mut self.ids)
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.index())
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id.index())
    }

    /// Like [`World::room_mut`], failing with a construction fault.
    pub fn require_mut(&mut self, id: RoomId) -> Result<&mut Room, WorldError> {
        self.rooms
            .get_mut(id.index())
            .ok_or(WorldError::MissingRoom(id.0))
    }

    pub fn origin(&self) -> Option<RoomId> {
        self.origin
    }

    // ===== lattice =====

    /// Places a room on the lattice. The first placed room becomes the origin.
    pub fn place(&mut self, id: RoomId, pos: LatticePos) -> Result<(), WorldError> {
        if self.room(id).is_none() {
            return Err(WorldError::MissingRoom(id.0));
        }
        self.positions.insert(id, pos);
        self.occupancy.insert(pos, id);
        self.origin.get_or_insert(id);
        Ok(())
    }

    pub fn position(&self, id: RoomId) -> Option<LatticePos> {
        self.positions.get(&id).copied()
    }

    pub fn room_at(&self, pos: LatticePos) -> Option<RoomId> {
        self.occupancy.get(&pos).copied()
    }

    pub fn placed_count(&self) -> usize {
        self.positions.len()
    }

    // ===== exits =====

    pub fn neighbor(&self, id: RoomId, direction: Direction) -> Option<RoomId> {
        self.room(id)?.connection(direction)
    }

    /// Connects `from` to `to` through `direction`, with the opposite back-link.
    ///
    /// An existing exit on either end is kept unless `overwrite` is set; the
    /// conflict is reported to the sink and is not fatal. Overwriting unlinks
    /// the displaced neighbours so every remaining exit keeps its back-link.
    pub fn connect(
        &mut self,
        from: RoomId,
        direction: Direction,
        to: RoomId,
        overwrite: bool,
        sink: &mut MessageSink,
    ) -> Result<(), WorldError> {
        let opposite = direction.opposite();
        let forward = self
            .room(from)
            .ok_or(WorldError::MissingRoom(from.0))?
            .connection(direction);
        let back = self
            .room(to)
            .ok_or(WorldError::MissingRoom(to.0))?
            .connection(opposite);

        if !overwrite {
            let conflict = if forward.is_some() {
                Some(direction)
            } else if back.is_some_and(|other| other != from) {
                Some(opposite)
            } else {
                None
            };
            if let Some(direction) = conflict {
                sink.report::<(), _>(Err(GameplayError::ExitOccupied { direction }));
                return Ok(());
            }
        } else {
            if let Some(old) = forward
                && old != to
            {
                self.unlink(old, opposite, from);
            }
            if let Some(other) = back
                && other != from
            {
                self.unlink(other, direction, to);
            }
        }

        self.require_mut(from)?.set_exit(direction, to);
        self.require_mut(to)?.set_exit(opposite, from);
        Ok(())
    }

    /// Clears `room`'s exit through `direction` if it still leads to `target`.
    fn unlink(&mut self, room: RoomId, direction: Direction, target: RoomId) {
        if let Some(room) = self.room_mut(room)
            && room.connection(direction) == Some(target)
        {
            room.clear_exit(direction);
        }
    }

    /// Connects `from` to `to` without the back-link.
    pub fn connect_one_way(
        &mut self,
        from: RoomId,
        direction: Direction,
        to: RoomId,
        overwrite: bool,
        sink: &mut MessageSink,
    ) -> Result<(), WorldError> {
        self.link(from, direction, to, overwrite, sink)
    }

    /// Connects through a textual label; unknown labels are construction faults.
    pub fn connect_label(
        &mut self,
        from: RoomId,
        label: &str,
        to: RoomId,
        overwrite: bool,
        sink: &mut MessageSink,
    ) -> Result<(), WorldError> {
        let direction = Direction::from_str(label.trim())
            .map_err(|_| WorldError::UnknownDirection(label.to_string()))?;
        self.connect(from, direction, to, overwrite, sink)
    }

    fn link(
        &mut self,
        from: RoomId,
        direction: Direction,
        to: RoomId,
        overwrite: bool,
        sink: &mut MessageSink,
    ) -> Result<(), WorldError> {
        if self.room(to).is_none() {
            return Err(WorldError::MissingRoom(to.0));
        }
        let room = self.require_mut(from)?;
        if !overwrite && room.connection(direction).is_some() {
            sink.report::<(), _>(Err(GameplayError::ExitOccupied { direction }));
            return Ok(());
        }
        room.set_exit(direction, to);
        Ok(())
    }

    /// Rooms reachable from `start` by following exits.
    pub fn reachable_from(&self, start: RoomId) -> HashSet<RoomId> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([start]);
        while let Some(id) = queue.pop_front() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(room) = self.room(id) {
                queue.extend(room.exits().map(|(_, to)| to).filter(|to| !seen.contains(to)));
            }
        }
        seen
    }

    // ===== occupants =====

    /// Moves an enemy between rooms without room messages.
    pub fn relocate_enemy(&mut self, enemy: EntityId, from: RoomId, to: RoomId) -> bool {
        if from == to || self.room(to).is_none() {
            return false;
        }
        let Some(combatant) = self.room_mut(from).and_then(|room| room.extract_enemy(enemy)) else {
            return false;
        };
        if let Some(room) = self.room_mut(to) {
            room.admit_enemy(combatant);
        }
        true
    }

    /// Locates an enemy anywhere in the world.
    pub fn find_enemy(&self, enemy: EntityId) -> Option<(RoomId, &Combatant)> {
        self.rooms
            .iter()
            .find_map(|room| room.enemy(enemy).map(|combatant| (room.id, combatant)))
    }

    // ===== map =====

    /// ASCII map of the visited rooms on the level of `current`.
    ///
    /// `@` marks `current`; `^`, `v` and `+` mark rooms with stairs up, down or both.
    pub fn render_map(&self, current: RoomId) -> Vec<String> {
        let Some(here) = self.position(current) else {
            return vec!["You have no idea where you are.".to_string()];
        };

        let level: Vec<(LatticePos, &Room)> = self
            .rooms
            .iter()
            .filter(|room| room.visited || room.id == current)
            .filter_map(|room| Some((self.position(room.id)?, room)))
            .filter(|(pos, _)| pos.z == here.z)
            .collect();

        let min_x = level.iter().map(|(pos, _)| pos.x).min().unwrap_or(here.x);
        let max_x = level.iter().map(|(pos, _)| pos.x).max().unwrap_or(here.x);
        let min_y = level.iter().map(|(pos, _)| pos.y).min().unwrap_or(here.y);
        let max_y = level.iter().map(|(pos, _)| pos.y).max().unwrap_or(here.y);
        let at = |x: i32, y: i32| {
            level
                .iter()
                .find(|(pos, _)| pos.x == x && pos.y == y)
                .map(|(_, room)| *room)
        };

        let mut lines = vec![format!("Level {}", here.z)];
        for y in (min_y..=max_y).rev() {
            let mut row = String::new();
            let mut below = String::new();
            for x in min_x..=max_x {
                match at(x, y) {
                    Some(room) => {
                        let mark = if room.id == current {
                            '@'
                        } else {
                            match (
                                room.connection(Direction::Up).is_some(),
                                room.connection(Direction::Down).is_some(),
                            ) {
                                (true, true) => '+',
                                (true, false) => '^',
                                (false, true) => 'v',
                                (false, false) => ' ',
                            }
                        };
                        row.push('[');
                        row.push(mark);
                        row.push(']');
                        let east = room.connection(Direction::East).is_some() && at(x + 1, y).is_some();
                        row.push(if east { '-' } else { ' ' });
                        let south =
                            room.connection(Direction::South).is_some() && at(x, y - 1).is_some();
                        below.push_str(if south { " |  " } else { "    " });
                    }
                    None => {
                        row.push_str("    ");
                        below.push_str("    ");
                    }
                }
            }
            lines.push(row.trim_end().to_string());
            if y > min_y {
                lines.push(below.trim_end().to_string());
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_rooms() -> (World, RoomId, RoomId, RoomId) {
        let mut world = World::new();
        let a = world.add_room("hall", "Room A");
        let b = world.add_room("hall", "Room B");
        let c = world.add_room("hall", "Room C");
        (world, a, b, c)
    }

    #[test]
    fn connect_links_both_ways() {
        let mut sink = MessageSink::new();
        let (mut world, a, b, _) = three_rooms();
        world.connect(a, Direction::North, b, false, &mut sink).unwrap();

        assert_eq!(world.neighbor(a, Direction::North), Some(b));
        assert_eq!(world.neighbor(b, Direction::South), Some(a));
        assert!(sink.is_empty());
    }

    #[test]
    fn one_way_skips_back_link() {
        let mut sink = MessageSink::new();
        let (mut world, a, b, _) = three_rooms();
        world.connect_one_way(a, Direction::Up, b, false, &mut sink).unwrap();

        assert_eq!(world.neighbor(a, Direction::Up), Some(b));
        assert_eq!(world.neighbor(b, Direction::Down), None);
    }

    #[test]
    fn occupied_exit_is_reported_unless_overwritten() {
        let mut sink = MessageSink::new();
        let (mut world, a, b, c) = three_rooms();
        world.connect(a, Direction::North, b, false, &mut sink).unwrap();
        world.connect(a, Direction::North, c, false, &mut sink).unwrap();

        assert_eq!(world.neighbor(a, Direction::North), Some(b));
        assert!(sink.contains("A passage north already exists."));

        world.connect(a, Direction::North, c, true, &mut sink).unwrap();
        assert_eq!(world.neighbor(a, Direction::North), Some(c));
        assert_eq!(world.neighbor(c, Direction::South), Some(a));
    }

    #[test]
    fn occupied_back_link_is_a_conflict() {
        let mut sink = MessageSink::new();
        let (mut world, a, b, c) = three_rooms();
        world.connect(a, Direction::North, b, false, &mut sink).unwrap();
        world.connect(c, Direction::North, b, false, &mut sink).unwrap();

        assert_eq!(world.neighbor(a, Direction::North), Some(b));
        assert_eq!(world.neighbor(b, Direction::South), Some(a));
        assert_eq!(world.neighbor(c, Direction::North), None);
        assert!(sink.contains("A passage south already exists."));
    }

    #[test]
    fn overwrite_unlinks_displaced_neighbours() {
        let mut sink = MessageSink::new();
        let (mut world, a, b, c) = three_rooms();
        world.connect(a, Direction::North, b, false, &mut sink).unwrap();
        world.connect(a, Direction::North, c, true, &mut sink).unwrap();

        assert_eq!(world.neighbor(a, Direction::North), Some(c));
        assert_eq!(world.neighbor(c, Direction::South), Some(a));
        assert_eq!(world.neighbor(b, Direction::South), None);

        world.connect(b, Direction::North, c, true, &mut sink).unwrap();
        assert_eq!(world.neighbor(c, Direction::South), Some(b));
        assert_eq!(world.neighbor(a, Direction::North), None);
        assert!(sink.is_empty());
    }

    #[test]
    fn unknown_label_is_fatal() {
        let mut sink = MessageSink::new();
        let (mut world, a, b, _) = three_rooms();
        let err = world.connect_label(a, "sideways", b, false, &mut sink).unwrap_err();
        assert_eq!(err, WorldError::UnknownDirection("sideways".into()));

        world.connect_label(a, "West", b, false, &mut sink).unwrap();
        assert_eq!(world.neighbor(b, Direction::East), Some(a));
    }

    #[test]
    fn chain_round_trip_returns_to_start() {
        let mut sink = MessageSink::new();
        let (mut world, a, b, c) = three_rooms();
        world.connect(a, Direction::East, b, false, &mut sink).unwrap();
        world.connect(b, Direction::East, c, false, &mut sink).unwrap();

        let mut here = a;
        for direction in [Direction::East, Direction::East] {
            here = world.neighbor(here, direction).unwrap();
        }
        assert_eq!(here, c);
        for direction in [Direction::West, Direction::West] {
            here = world.neighbor(here, direction).unwrap();
        }
        assert_eq!(here, a);
    }

    #[test]
    fn reachability_follows_exits() {
        let mut sink = MessageSink::new();
        let (mut world, a, b, c) = three_rooms();
        world.connect(a, Direction::East, b, false, &mut sink).unwrap();

        let reached = world.reachable_from(a);
        assert!(reached.contains(&b));
        assert!(!reached.contains(&c));
    }

    #[test]
    fn relocate_moves_silently() {
        let mut sink = MessageSink::new();
        let (mut world, a, b, _) = three_rooms();
        world
            .room_mut(a)
            .unwrap()
            .add_enemy(Combatant::new(EntityId(1), "Rat", 3, 0), &mut sink);
        sink.clear();

        assert!(world.relocate_enemy(EntityId(1), a, b));
        assert!(world.room(a).unwrap().enemies().is_empty());
        assert_eq!(world.find_enemy(EntityId(1)).map(|(room, _)| room), Some(b));
        assert!(sink.is_empty());
    }

    #[test]
    fn map_marks_current_room() {
        let mut sink = MessageSink::new();
        let (mut world, a, b, _) = three_rooms();
        world.place(a, LatticePos::ORIGIN).unwrap();
        world.place(b, LatticePos::new(1, 0, 0)).unwrap();
        world.connect(a, Direction::East, b, false, &mut sink).unwrap();
        world.room_mut(b).unwrap().visited = true;

        assert_eq!(world.render_map(a), ["Level 0", "[@]-[ ]"]);
        assert_eq!(world.origin(), Some(a));
    }
}
