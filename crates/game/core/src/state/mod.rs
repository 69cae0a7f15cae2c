//! Authoritative game state representation.
//!
//! Rooms, combatants, items and spells, plus the [`World`] arena that owns
//! every room. Rooms refer to each other by [`RoomId`]; nothing here holds a
//! pointer into another room.
mod combatant;
mod direction;
mod ids;
mod item;
mod room;
mod spell;
mod world;

pub use combatant::{Combatant, TakeSource};
pub use direction::{Direction, LatticePos};
pub use ids::{EntityId, IdAllocator, ItemId, RoomId, SpellId};
pub use item::{Item, ItemCategory};
pub use room::Room;
pub use spell::{Spell, SpellEffect};
pub use world::World;
