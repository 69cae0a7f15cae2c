//! A single room: exits, occupants and loose items.

use crate::error::GameplayError;
use crate::messages::MessageSink;

use super::{Combatant, Direction, EntityId, Item, ItemId, RoomId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    /// Type tag taken from the room shell (`"crypt"`, `"library"`, ...).
    pub kind: String,
    pub description: String,
    exits: [Option<RoomId>; 6],
    enemies: Vec<Combatant>,
    items: Vec<Item>,
    pub visited: bool,
}

impl Room {
    pub fn new(id: RoomId, kind: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
            description: description.into(),
            exits: [None; 6],
            enemies: Vec::new(),
            items: Vec::new(),
            visited: false,
        }
    }

    // ===== exits =====

    pub fn connection(&self, direction: Direction) -> Option<RoomId> {
        self.exits[direction.index()]
    }

    /// Directions with an exit, in [`Direction::ALL`] order.
    pub fn exits(&self) -> impl Iterator<Item = (Direction, RoomId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| self.connection(direction).map(|to| (direction, to)))
    }

    pub fn exit_count(&self) -> usize {
        self.exits.iter().flatten().count()
    }

    pub(crate) fn set_exit(&mut self, direction: Direction, to: RoomId) {
        self.exits[direction.index()] = Some(to);
    }

    pub(crate) fn clear_exit(&mut self, direction: Direction) {
        self.exits[direction.index()] = None;
    }

    // ===== occupants =====

    pub fn enemies(&self) -> &[Combatant] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Combatant] {
        &mut self.enemies
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Combatant> {
        self.enemies.iter().filter(|enemy| enemy.is_alive())
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Combatant> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Combatant> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    /// Finds an enemy by case-insensitive name, preferring the living.
    pub fn find_enemy(&self, name: &str) -> Option<&Combatant> {
        let name = name.trim();
        let mut matches = self
            .enemies
            .iter()
            .filter(|enemy| enemy.name.eq_ignore_ascii_case(name));
        let first = matches.next()?;
        if first.is_alive() {
            return Some(first);
        }
        matches.find(|enemy| enemy.is_alive()).or(Some(first))
    }

    pub fn add_enemy(&mut self, enemy: Combatant, sink: &mut MessageSink) {
        sink.push(format!("{} added to the room.", enemy.name));
        self.enemies.push(enemy);
    }

    pub fn remove_enemy(
        &mut self,
        id: EntityId,
        sink: &mut MessageSink,
    ) -> Result<Combatant, GameplayError> {
        let enemy = self
            .extract_enemy(id)
            .ok_or_else(|| GameplayError::NotInRoom {
                name: format!("Enemy {id}"),
            })?;
        sink.push(format!("{} removed from the room.", enemy.name));
        Ok(enemy)
    }

    /// Removes an enemy without a message (pursuit, looting).
    pub fn extract_enemy(&mut self, id: EntityId) -> Option<Combatant> {
        let index = self.enemies.iter().position(|enemy| enemy.id == id)?;
        Some(self.enemies.remove(index))
    }

    /// Adds an enemy without a message (pursuit arrivals).
    pub fn admit_enemy(&mut self, enemy: Combatant) {
        self.enemies.push(enemy);
    }

    // ===== items =====

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn add_item(&mut self, item: Item, sink: &mut MessageSink) {
        sink.push(format!("{} added to the room.", item.name));
        self.items.push(item);
    }

    pub fn remove_item(&mut self, id: ItemId, sink: &mut MessageSink) -> Result<Item, GameplayError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| GameplayError::NotInRoom {
                name: format!("Item {}", id.0),
            })?;
        let item = self.items.remove(index);
        sink.push(format!("{} removed from the room.", item.name));
        Ok(item)
    }

    /// Removes a loose item by case-insensitive name, without a message.
    pub fn take_item(&mut self, name: &str) -> Option<Item> {
        let index = self.items.iter().position(|item| item.matches_name(name))?;
        Some(self.items.remove(index))
    }

    // ===== presentation =====

    pub fn direction_line(&self) -> String {
        let labels: Vec<&'static str> =
            self.exits().map(|(direction, _)| direction.into()).collect();
        if labels.is_empty() {
            "There are no visible exits.".to_string()
        } else {
            format!("Available directions: {}", labels.join(", "))
        }
    }

    /// Lines printed by `look`.
    pub fn description_lines(&self) -> Vec<String> {
        let mut lines = vec![self.description.clone()];

        if !self.enemies.is_empty() {
            lines.push("Enemies here:".to_string());
            for enemy in &self.enemies {
                if enemy.is_dead() {
                    lines.push(format!("- {} (Dead)", enemy.name));
                } else {
                    lines.push(format!("- {} ({} HP)", enemy.name, enemy.current_health()));
                }
            }
        }

        if !self.items.is_empty() {
            lines.push("Items here:".to_string());
            lines.extend(self.items.iter().map(|item| format!("- {}", item.name)));
        }

        lines.push(self.direction_line());
        lines
    }

    pub fn describe(&self, sink: &mut MessageSink) {
        sink.extend(self.description_lines());
    }
}
