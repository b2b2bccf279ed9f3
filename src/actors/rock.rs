// Rock obstacle: drifts towards the vehicles, absorbs projectiles

use super::{Behavior, Explosion};
use crate::arena::Arena;
use crate::config::DRIFT_SPEED;
use crate::debug_spawn;
use crate::types::{ActorId, ActorKind, Contact, Rect};
use ::rand::Rng;

/// The two rock shapes, each with its own size, sprite and durability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RockKind {
    Pebble,  // Small, shattered by a single hit
    Boulder, // Large, survives the first hit
}

impl RockKind {
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) {
            RockKind::Pebble
        } else {
            RockKind::Boulder
        }
    }

    pub fn size(&self) -> (f64, f64) {
        match self {
            RockKind::Pebble => (20.0, 20.0),
            RockKind::Boulder => (30.0, 40.0),
        }
    }

    pub fn sprite(&self) -> Rect {
        match self {
            RockKind::Pebble => Rect::new(63.0, 207.0, 9.0, 8.0),
            RockKind::Boulder => Rect::new(79.0, 202.0, 15.0, 13.0),
        }
    }

    pub fn hit_points(&self) -> u32 {
        match self {
            RockKind::Pebble => 1,
            RockKind::Boulder => 2,
        }
    }

    /// How far above the ground line the rock's top edge sits
    pub fn ground_offset(&self) -> f64 {
        match self {
            RockKind::Pebble => 16.0,
            RockKind::Boulder => 36.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rock {
    x: f64,
    y: f64,
    dx: f64,
    kind: RockKind,
    hit_points: u32,
}

impl Rock {
    pub fn new(x: f64, y: f64, kind: RockKind) -> Self {
        Rock {
            x,
            y,
            dx: -DRIFT_SPEED,
            kind,
            hit_points: kind.hit_points(),
        }
    }

    pub fn spawn(arena: &mut Arena, x: f64, y: f64, kind: RockKind) -> ActorId {
        arena.add(Rock::new(x, y, kind))
    }

    pub fn kind(&self) -> RockKind {
        self.kind
    }

    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }
}

impl Behavior for Rock {
    fn advance(&mut self, me: ActorId, arena: &mut Arena) {
        self.x += self.dx;
        let (width, _) = self.kind.size();
        if self.x < -width {
            arena.remove(me);
        }
    }

    fn on_collision(&mut self, me: ActorId, other: &Contact, arena: &mut Arena) {
        match other.kind {
            ActorKind::Vehicle => arena.explode_vehicle(other.id),
            ActorKind::Projectile => {
                Explosion::spawn(arena, other.bounds.x, other.bounds.y);
                arena.remove(other.id);
                self.hit_points = self.hit_points.saturating_sub(1);
                if self.hit_points == 0 {
                    debug_spawn!("Tick {} rock {} shattered", arena.ticks(), me);
                    arena.remove(me);
                }
            }
            _ => {}
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::{Actor, Projectile};

    fn shoot_once(arena: &mut Arena, rock: ActorId) {
        let bounds = arena.bounds(rock).unwrap();
        // Lands just inside the bottom edge after one tick
        Projectile::spawn(arena, bounds.x + 8.0, bounds.y + bounds.h + 2.0, 0.0, -5.0);
        arena.tick();
    }

    #[test]
    fn test_pebble_removed_after_one_hit() {
        let mut arena = Arena::seeded(1);
        let rock = Rock::spawn(&mut arena, 300.0, 100.0, RockKind::Pebble);
        arena.get_mut(rock).unwrap().freeze();
        shoot_once(&mut arena, rock);
        assert!(!arena.contains(rock));
        assert_eq!(arena.count_kind(ActorKind::Projectile), 0);
        assert_eq!(arena.count_kind(ActorKind::Explosion), 1);
    }

    #[test]
    fn test_boulder_survives_first_hit() {
        let mut arena = Arena::seeded(1);
        let rock = Rock::spawn(&mut arena, 300.0, 100.0, RockKind::Boulder);
        arena.get_mut(rock).unwrap().freeze();

        shoot_once(&mut arena, rock);
        assert!(arena.contains(rock));
        match arena.get(rock) {
            Some(Actor::Rock(r)) => assert_eq!(r.hit_points(), 1),
            other => panic!("expected rock, got {:?}", other),
        }
        assert_eq!(arena.count_kind(ActorKind::Projectile), 0);

        shoot_once(&mut arena, rock);
        assert!(!arena.contains(rock));
        assert_eq!(arena.count_kind(ActorKind::Explosion), 2);
    }

    #[test]
    fn test_drifts_off_screen() {
        let mut arena = Arena::seeded(1);
        let rock = Rock::spawn(&mut arena, -15.0, 100.0, RockKind::Pebble);
        arena.tick();
        assert!(arena.contains(rock));
        assert_eq!(arena.bounds(rock).unwrap().x, -18.0);
        arena.tick();
        assert!(!arena.contains(rock));
    }

    #[test]
    fn test_kind_properties() {
        assert_eq!(RockKind::Pebble.size(), (20.0, 20.0));
        assert_eq!(RockKind::Boulder.size(), (30.0, 40.0));
        assert_eq!(RockKind::Boulder.hit_points(), 2);
        let rock = Rock::new(0.0, 0.0, RockKind::Boulder);
        assert_eq!(rock.visual_region(), Rect::new(79.0, 202.0, 15.0, 13.0));
        assert_eq!(rock.bounding_box(), Rect::new(0.0, 0.0, 30.0, 40.0));
    }
}
