// Alien: wanders along the sky lane and drops projectiles on the vehicles

use super::{Behavior, Explosion, Projectile};
use crate::arena::Arena;
use crate::config::*;
use crate::types::{ActorId, ActorKind, Contact, Rect};
use crate::{debug_spawn, utils};
use ::rand::Rng;

const SPRITE: Rect = Rect::new(121.0, 228.0, 18.0, 10.0);

#[derive(Debug, Clone)]
pub struct Alien {
    x: f64,
    y: f64,
    dx: f64,
    speed: f64,
}

impl Alien {
    pub fn new(x: f64) -> Self {
        Alien {
            x,
            y: ALIEN_Y,
            dx: ALIEN_SPEED,
            speed: ALIEN_SPEED,
        }
    }

    /// Spawns an alien in one of the fixed lanes, picked at random
    pub fn spawn(arena: &mut Arena) -> ActorId {
        let lane = ALIEN_LANES[arena.rng().gen_range(0..ALIEN_LANES.len())];
        arena.add(Alien::new(lane))
    }

    pub fn velocity(&self) -> f64 {
        self.dx
    }
}

impl Behavior for Alien {
    fn advance(&mut self, me: ActorId, arena: &mut Arena) {
        self.x += self.dx;
        if arena.rng().gen_range(0..ALIEN_TURN_ODDS) == 0 {
            let headings = [-self.speed, 0.0, self.speed];
            self.dx = headings[arena.rng().gen_range(0..headings.len())];
        }

        if arena.rng().gen_range(0..ALIEN_FIRE_ODDS) == 0 && !arena.is_halted() {
            let shot = Projectile::spawn(
                arena,
                self.x + ALIEN_SIZE / 2.0,
                self.y + ALIEN_SIZE,
                0.0,
                PROJECTILE_SPEED,
            );
            debug_spawn!("Tick {} alien {} fired {}", arena.ticks(), me, shot);
        }

        let (width, _) = arena.size();
        self.x = utils::clamp(self.x, ALIEN_SIZE, width as f64 - ALIEN_SIZE);
    }

    fn on_collision(&mut self, me: ActorId, other: &Contact, arena: &mut Arena) {
        if other.kind == ActorKind::Projectile {
            Explosion::spawn(arena, other.bounds.x, other.bounds.y);
            arena.remove(me);
        }
    }

    fn bounding_box(&self) -> Rect {
        Rect::new(self.x, self.y, ALIEN_SIZE, ALIEN_SIZE)
    }

    fn visual_region(&self) -> Rect {
        SPRITE
    }

    fn freeze(&mut self) {
        self.speed = 0.0;
        self.dx = 0.0;
    }
}
