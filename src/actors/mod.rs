//! Actor behaviors: the game rules that run inside the arena's tick loop.
//!
//! Every entity implements [`Behavior`]. The [`Actor`] enum is the closed set of
//! entity variants the arena stores; collision reactions match on the other
//! party's [`ActorKind`] instead of inspecting types at runtime.

mod alien;
mod background;
mod explosion;
mod pit;
mod projectile;
mod rock;
mod vehicle;

pub use alien::Alien;
pub use background::Background;
pub use explosion::Explosion;
pub use pit::Pit;
pub use projectile::Projectile;
pub use rock::{Rock, RockKind};
pub use vehicle::Vehicle;

use crate::arena::Arena;
use crate::types::{ActorId, ActorKind, Contact, Rect};

/// Capability contract of every entity in the arena
pub trait Behavior {
    /// Advances internal state by one tick. `me` is this actor's own handle.
    fn advance(&mut self, me: ActorId, arena: &mut Arena);

    /// Reacts to an overlap with `other`, detected after one of the two moved.
    fn on_collision(&mut self, me: ActorId, other: &Contact, arena: &mut Arena);

    fn bounding_box(&self) -> Rect;

    /// Source rectangle on the sprite sheet, or `Rect::EMPTY` for a solid fill
    fn visual_region(&self) -> Rect;

    /// Stops self-propelled motion (game over)
    fn freeze(&mut self);
}

#[derive(Debug, Clone)]
pub enum Actor {
    Vehicle(Vehicle),
    Projectile(Projectile),
    Rock(Rock),
    Pit(Pit),
    Alien(Alien),
    Explosion(Explosion),
    Background(Background),
}

macro_rules! dispatch {
    ($actor:expr, $inner:ident => $body:expr) => {
        match $actor {
            Actor::Vehicle($inner) => $body,
            Actor::Projectile($inner) => $body,
            Actor::Rock($inner) => $body,
            Actor::Pit($inner) => $body,
            Actor::Alien($inner) => $body,
            Actor::Explosion($inner) => $body,
            Actor::Background($inner) => $body,
        }
    };
}

impl Actor {
    pub fn kind(&self) -> ActorKind {
        match self {
            Actor::Vehicle(_) => ActorKind::Vehicle,
            Actor::Projectile(_) => ActorKind::Projectile,
            Actor::Rock(_) => ActorKind::Rock,
            Actor::Pit(_) => ActorKind::Pit,
            Actor::Alien(_) => ActorKind::Alien,
            Actor::Explosion(_) => ActorKind::Explosion,
            Actor::Background(_) => ActorKind::Background,
        }
    }
}

impl Behavior for Actor {
    fn advance(&mut self, me: ActorId, arena: &mut Arena) {
        dispatch!(self, inner => inner.advance(me, arena))
    }

    fn on_collision(&mut self, me: ActorId, other: &Contact, arena: &mut Arena) {
        dispatch!(self, inner => inner.on_collision(me, other, arena))
    }

    fn bounding_box(&self) -> Rect {
        dispatch!(self, inner => inner.bounding_box())
    }

    fn visual_region(&self) -> Rect {
        dispatch!(self, inner => inner.visual_region())
    }

    fn freeze(&mut self) {
        dispatch!(self, inner => inner.freeze())
    }
}

macro_rules! impl_from_behavior {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Actor {
                fn from(inner: $variant) -> Self {
                    Actor::$variant(inner)
                }
            }
        )*
    };
}

impl_from_behavior!(Vehicle, Projectile, Rock, Pit, Alien, Explosion, Background);
