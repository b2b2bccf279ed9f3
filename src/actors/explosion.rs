// Explosion effect: three-phase animation drifting with the terrain

use super::Behavior;
use crate::arena::Arena;
use crate::config::{DRIFT_SPEED, EXPLOSION_SIZE, EXPLOSION_TICKS};
use crate::types::{ActorId, Contact, Rect};

const PHASES: [Rect; 3] = [
    Rect::new(224.0, 141.0, 6.0, 8.0),
    Rect::new(238.0, 139.0, 9.0, 11.0),
    Rect::new(252.0, 137.0, 13.0, 15.0),
];

#[derive(Debug, Clone)]
pub struct Explosion {
    x: f64,
    y: f64,
    dx: f64,
    elapsed: u32,
}

impl Explosion {
    pub fn new(x: f64, y: f64) -> Self {
        Explosion {
            x,
            y: y - 5.0,
            dx: -DRIFT_SPEED,
            elapsed: 0,
        }
    }

    pub fn spawn(arena: &mut Arena, x: f64, y: f64) -> ActorId {
        arena.add(Explosion::new(x, y))
    }

    pub fn phase(&self) -> usize {
        match self.elapsed {
            0..=7 => 1,
            8..=14 => 2,
            _ => 3,
        }
    }
}

impl Behavior for Explosion {
    fn advance(&mut self, me: ActorId, arena: &mut Arena) {
        self.x += self.dx;
        self.elapsed += 1;
        if self.elapsed >= EXPLOSION_TICKS {
            arena.remove(me);
        }
    }

    fn on_collision(&mut self, _me: ActorId, _other: &Contact, _arena: &mut Arena) {}

    fn bounding_box(&self) -> Rect {
        Rect::new(self.x, self.y, EXPLOSION_SIZE, EXPLOSION_SIZE)
    }

    fn visual_region(&self) -> Rect {
        PHASES[self.phase() - 1]
    }

    fn freeze(&mut self) {
        self.dx = 0.0;
    }
}
