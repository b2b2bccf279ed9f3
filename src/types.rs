// Shared geometry and identity types for the arena and its actors

use std::fmt;

/// Axis-aligned rectangle: top-left corner plus size, in playfield pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// Visual-region sentinel meaning "no sprite, fill solid instead"
    pub const EMPTY: Rect = Rect {
        x: 0.0,
        y: 0.0,
        w: 0.0,
        h: 0.0,
    };

    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Rect { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        *self == Rect::EMPTY
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict AABB intersection. Touching edges do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        other.y < self.y + self.h
            && self.y < other.y + other.h
            && other.x < self.x + self.w
            && self.x < other.x + other.w
    }
}

/// Handle to an actor owned by an `Arena`. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub(crate) u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Variant tag of an actor, used by collision handlers to pick a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    Vehicle,
    Projectile,
    Rock,
    Pit,
    Alien,
    Explosion,
    Background,
}

/// Snapshot of the other party in a collision, taken when the overlap is detected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub id: ActorId,
    pub kind: ActorKind,
    pub bounds: Rect,
}
