// Projectile: travels along a fixed velocity, digs pits near the ground, blows up vehicles

use super::{Behavior, Explosion, Pit};
use crate::arena::Arena;
use crate::config::{PIT_ON_IMPACT_ODDS, PROJECTILE_SIZE, terrain_y};
use crate::debug_spawn;
use crate::types::{ActorId, ActorKind, Contact, Rect};
use ::rand::Rng;

#[derive(Debug, Clone)]
pub struct Projectile {
    x: f64,
    y: f64,
    dx: f64,
    dy: f64,
}

impl Projectile {
    pub fn new(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Projectile { x, y, dx, dy }
    }

    pub fn spawn(arena: &mut Arena, x: f64, y: f64, dx: f64, dy: f64) -> ActorId {
        arena.add(Projectile::new(x, y, dx, dy))
    }
}

impl Behavior for Projectile {
    fn advance(&mut self, me: ActorId, arena: &mut Arena) {
        self.x += self.dx;
        self.y += self.dy;
        let (width, _) = arena.size();
        if self.y < 0.0 || self.x > width as f64 {
            arena.remove(me);
        }
    }

    fn on_collision(&mut self, me: ActorId, other: &Contact, arena: &mut Arena) {
        let (_, height) = arena.size();
        if self.y > terrain_y(height) {
            if arena.rng().gen_range(0..PIT_ON_IMPACT_ODDS) == 0 {
                // Under the shot itself, not under the ground tile it struck
                let pit = Pit::spawn(arena, self.x);
                debug_spawn!("Tick {} projectile {} dug pit {}", arena.ticks(), me, pit);
            }
            arena.remove(me);
        }
        if other.kind == ActorKind::Vehicle {
            arena.remove(me);
            Explosion::spawn(arena, self.x, self.y);
        }
    }

    fn bounding_box(&self) -> Rect {
        Rect::new(self.x, self.y, PROJECTILE_SIZE, PROJECTILE_SIZE)
    }

    fn visual_region(&self) -> Rect {
        Rect::EMPTY
    }

    fn freeze(&mut self) {
        self.dx = 0.0;
        self.dy = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::{Background, Vehicle};

    fn ground_layer(arena: &mut Arena) -> ActorId {
        arena.add(Background::new(
            Rect::new(0.0, 400.0, 600.0, 100.0),
            Rect::new(0.0, 513.0, 512.0, 128.0),
            0.0,
        ))
    }

    #[test]
    fn test_moves_along_velocity() {
        let mut arena = Arena::seeded(1);
        let id = Projectile::spawn(&mut arena, 10.0, 100.0, 5.0, -5.0);
        arena.tick();
        assert_eq!(arena.bounds(id).unwrap(), Rect::new(15.0, 95.0, 4.0, 4.0));
    }

    #[test]
    fn test_ground_impact_always_removes_projectile() {
        for seed in 0..40 {
            let mut arena = Arena::seeded(seed);
            ground_layer(&mut arena);
            let shot = Projectile::spawn(&mut arena, 250.0, 398.0, 0.0, 5.0);
            arena.tick();
            assert!(!arena.contains(shot));
            assert!(arena.count_kind(ActorKind::Pit) <= 1);
        }
    }

    #[test]
    fn test_ground_impact_sometimes_digs_pit_at_impact_x() {
        let mut dug = 0;
        for seed in 0..120 {
            let mut arena = Arena::seeded(seed);
            ground_layer(&mut arena);
            Projectile::spawn(&mut arena, 250.0, 398.0, 0.0, 5.0);
            arena.tick();
            for id in arena.actors() {
                if let Some(crate::actors::Actor::Pit(_)) = arena.get(id) {
                    assert_eq!(arena.bounds(id).unwrap().x, 250.0);
                    dug += 1;
                }
            }
        }
        assert!(dug > 0 && dug < 120, "dug {} pits", dug);
    }

    #[test]
    fn test_high_projectile_ignores_scenery() {
        let mut arena = Arena::seeded(1);
        arena.add(Background::new(
            Rect::new(0.0, 0.0, 600.0, 500.0),
            Rect::new(0.0, 0.0, 512.0, 128.0),
            0.0,
        ));
        let shot = Projectile::spawn(&mut arena, 250.0, 200.0, 0.0, 5.0);
        arena.tick();
        assert!(arena.contains(shot));
    }

    #[test]
    fn test_hitting_vehicle_explodes_both() {
        let mut arena = Arena::seeded(1);
        let vehicle = Vehicle::spawn(&mut arena, 100.0, 382.0);
        let shot = Projectile::spawn(&mut arena, 110.0, 375.0, 0.0, 5.0);
        arena.tick();
        assert!(!arena.contains(shot));
        assert_eq!(arena.count_kind(ActorKind::Explosion), 1);
        match arena.get(vehicle) {
            Some(crate::actors::Actor::Vehicle(v)) => assert!(v.is_exploding()),
            other => panic!("expected vehicle, got {:?}", other),
        }
    }
}
