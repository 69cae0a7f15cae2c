//! Mutable state of one play-through.
//!
//! The session owns the world, the player, the enemy tracker, the shared
//! random source and the message sink. Handlers and hooks borrow it for the
//! duration of one command cycle.

use std::sync::Arc;

use game_core::env::pick;
use game_core::{
    Catalog, Combatant, EnemyTracker, EntityId, GameConfig, IdAllocator, MessageSink,
    RandomSource, Room, RoomId, World, WorldError, generate_world,
};
use tracing::info;

use crate::api::{CommandContext, Result, RuntimeError};

pub const WELCOME: &str = "Welcome to the Refactored Adventure!";
pub const DEATH_NOTICE: &str = "You have died. Type 'reset' to start again.";

pub struct Session {
    pub(crate) config: GameConfig,
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) world: World,
    pub(crate) player: Combatant,
    pub(crate) player_room: RoomId,
    pub(crate) tracker: EnemyTracker,
    pub(crate) rng: Box<dyn RandomSource>,
    pub(crate) sink: MessageSink,
    /// Player room when the current cycle began.
    cycle_room: RoomId,
    /// Set by handlers whose command gives enemies a turn.
    turn_spent: bool,
    quit: bool,
}

impl Session {
    /// Generates a fresh world and starting character.
    pub fn new(
        config: GameConfig,
        catalog: Arc<Catalog>,
        mut rng: Box<dyn RandomSource>,
    ) -> Result<Self> {
        let (world, player, start) = Self::generate(&config, &catalog, rng.as_mut())?;
        Ok(Self::from_world(config, catalog, world, player, start, rng))
    }

    /// Wraps an already built world.
    pub fn from_world(
        config: GameConfig,
        catalog: Arc<Catalog>,
        mut world: World,
        player: Combatant,
        start: RoomId,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        if let Some(room) = world.room_mut(start) {
            room.visited = true;
        }
        let tracker = EnemyTracker::new(config.pursuit.clone());
        Self {
            config,
            catalog,
            world,
            player,
            player_room: start,
            tracker,
            rng,
            sink: MessageSink::new(),
            cycle_room: start,
            turn_spent: false,
            quit: false,
        }
    }

    fn generate(
        config: &GameConfig,
        catalog: &Catalog,
        rng: &mut dyn RandomSource,
    ) -> Result<(World, Combatant, RoomId)> {
        let mut world = generate_world(catalog, config, &mut *rng)?;
        let player = Self::create_player(config, catalog, &mut world.ids, &mut *rng)?;

        let rooms: Vec<RoomId> = world.rooms().iter().map(|room| room.id).collect();
        let start = pick(&mut *rng, &rooms).copied().ok_or(WorldError::NoRooms)?;

        info!(
            target: "runtime::session",
            rooms = world.len(),
            start = %start,
            player = %player.name,
            "Generated new world"
        );
        Ok((world, player, start))
    }

    /// Builds the starting character: a random weapon (equipped), a random
    /// non-weapon item and one random spell.
    pub fn create_player(
        config: &GameConfig,
        catalog: &Catalog,
        ids: &mut IdAllocator,
        rng: &mut dyn RandomSource,
    ) -> Result<Combatant> {
        let template = &config.player;
        let mut scratch = MessageSink::new();
        let mut player = Combatant::new(
            EntityId::PLAYER,
            template.name.clone(),
            template.health,
            template.mana,
        );

        let weapons = catalog.weapons();
        let weapon = pick(&mut *rng, &weapons)
            .copied()
            .ok_or(RuntimeError::NoStartingWeapon)?;
        let weapon = catalog.instantiate_item(weapon, ids);
        player.acquire_item(weapon.clone(), &mut scratch);

        if let Some(extra) = pick(&mut *rng, &catalog.non_weapons()).copied() {
            player.acquire_item(catalog.instantiate_item(extra, ids), &mut scratch);
        }
        let equipped = player.equip_item(Some(weapon), &mut scratch);
        scratch.report(equipped);

        if let Some(spell) = pick(&mut *rng, &catalog.spells) {
            player.add_spell(spell.instantiate(), &mut scratch);
        }
        Ok(player)
    }

    /// Rebuilds world, player and tracker, then shows the new surroundings.
    pub fn reset(&mut self) -> Result<()> {
        let (world, player, start) =
            Self::generate(&self.config, &self.catalog, self.rng.as_mut())?;
        self.world = world;
        self.player = player;
        self.player_room = start;
        self.cycle_room = start;
        self.tracker.clear();
        self.turn_spent = false;
        if let Some(room) = self.world.room_mut(start) {
            room.visited = true;
        }

        self.sink.clear();
        self.describe_surroundings();
        info!(target: "runtime::session", "Session reset");
        Ok(())
    }

    /// Banner shown before the first prompt.
    pub fn welcome(&mut self, help: Vec<String>) {
        self.sink.clear();
        self.sink.extend([WELCOME, ""]);
        self.sink.extend(help);
        self.sink.push("");
        self.describe_surroundings();
    }

    /// Room description, a blank line, then the player's status.
    pub fn describe_surroundings(&mut self) {
        self.look();
        self.sink.push("");
        self.sink.extend(self.player.status_lines());
    }

    pub fn look(&mut self) {
        if let Some(room) = self.world.room(self.player_room) {
            room.describe(&mut self.sink);
        }
    }

    // ===== cycle bookkeeping =====

    /// Resets per-cycle state. Called by the activation hook.
    pub(crate) fn begin_cycle(&mut self) {
        self.turn_spent = false;
        self.cycle_room = self.player_room;
        self.tracker.begin_cycle();
    }

    /// Marks the current command as giving enemies a turn.
    pub fn spend_turn(&mut self) {
        self.turn_spent = true;
    }

    pub fn turn_spent(&self) -> bool {
        self.turn_spent
    }

    /// True when the player changed rooms during this cycle.
    pub fn moved_this_cycle(&self) -> bool {
        self.player_room != self.cycle_room
    }

    /// Moves the player and marks the destination visited.
    pub(crate) fn enter_room(&mut self, room: RoomId) {
        self.player_room = room;
        if let Some(room) = self.world.room_mut(room) {
            room.visited = true;
        }
    }

    /// Emits the death notice and returns false once the player is dead.
    pub(crate) fn ensure_alive(&mut self) -> bool {
        if self.player.is_alive() {
            return true;
        }
        self.sink.push(DEATH_NOTICE);
        false
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    // ===== accessors =====

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Combatant {
        &mut self.player
    }

    pub fn player_room(&self) -> RoomId {
        self.player_room
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.world.room(self.player_room)
    }

    pub fn tracker(&self) -> &EnemyTracker {
        &self.tracker
    }

    pub fn sink(&self) -> &MessageSink {
        &self.sink
    }
}

impl CommandContext for Session {
    fn messages(&mut self) -> &mut MessageSink {
        &mut self.sink
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}
