// Pit hazard: a crater in the ground band that swallows vehicles

use super::Behavior;
use crate::arena::Arena;
use crate::config::{DRIFT_SPEED, terrain_y};
use crate::types::{ActorId, ActorKind, Contact, Rect};
use ::rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitKind {
    Shallow,
    Crater,
}

impl PitKind {
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) {
            PitKind::Shallow
        } else {
            PitKind::Crater
        }
    }

    pub fn size(&self) -> (f64, f64) {
        match self {
            PitKind::Shallow => (20.0, 20.0),
            PitKind::Crater => (30.0, 40.0),
        }
    }

    pub fn sprite(&self) -> Rect {
        match self {
            PitKind::Shallow => Rect::new(136.0, 139.0, 15.0, 13.0),
            PitKind::Crater => Rect::new(158.0, 166.0, 25.0, 29.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pit {
    x: f64,
    y: f64,
    dx: f64,
    kind: PitKind,
}

impl Pit {
    pub fn new(x: f64, y: f64, kind: PitKind) -> Self {
        Pit {
            x,
            y,
            dx: -DRIFT_SPEED,
            kind,
        }
    }

    /// Opens a pit of random shape on the ground line at `x`
    pub fn spawn(arena: &mut Arena, x: f64) -> ActorId {
        let kind = PitKind::random(arena.rng());
        Pit::spawn_kind(arena, x, kind)
    }

    pub fn spawn_kind(arena: &mut Arena, x: f64, kind: PitKind) -> ActorId {
        let (_, height) = arena.size();
        arena.add(Pit::new(x, terrain_y(height), kind))
    }

    pub fn kind(&self) -> PitKind {
        self.kind
    }
}

impl Behavior for Pit {
    fn advance(&mut self, me: ActorId, arena: &mut Arena) {
        self.x += self.dx;
        let (width, _) = self.kind.size();
        if self.x < -width {
            arena.remove(me);
        }
    }

    fn on_collision(&mut self, _me: ActorId, other: &Contact, arena: &mut Arena) {
        if other.kind == ActorKind::Vehicle {
            arena.explode_vehicle(other.id);
        }
    }

    fn bounding_box(&self) -> Rect {
        let (w, h) = self.kind.size();
        Rect::new(self.x, self.y, w, h)
    }

    fn visual_region(&self) -> Rect {
        self.kind.sprite()
    }

    fn freeze(&mut self) {
        self.dx = 0.0;
    }
}
