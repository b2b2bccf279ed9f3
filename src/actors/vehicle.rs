// Player vehicle: drives along the ground band, jumps, fires, explodes

use super::{Behavior, Projectile};
use crate::arena::Arena;
use crate::config::*;
use crate::debug_vehicle;
use crate::types::{ActorId, ActorKind, Contact, Rect};
use crate::utils;

// Sprite sheet regions
const SPRITE_FALLING: (f64, f64) = (79.0, 103.0);
const SPRITE_RISING: (f64, f64) = (46.0, 102.0);
const SPRITE_LEVEL: (f64, f64) = (212.0, 158.0);
const SPRITE_EXPLOSION: [Rect; 3] = [
    Rect::new(113.0, 100.0, 44.0, 31.0),
    Rect::new(166.0, 100.0, 41.0, 31.0),
    Rect::new(213.0, 102.0, 42.0, 29.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleState {
    Normal,
    Exploding { elapsed: u32 }, // Ticks since the explosion started
}

#[derive(Debug, Clone)]
pub struct Vehicle {
    x: f64,
    y: f64,
    dx: f64,
    dy: f64,
    arena_width: f64,
    arena_height: f64,
    state: VehicleState,
}

impl Vehicle {
    pub fn new(x: f64, y: f64, arena: &Arena) -> Self {
        let (width, height) = arena.size();
        Vehicle {
            x,
            y,
            dx: 0.0,
            dy: 0.0,
            arena_width: width as f64,
            arena_height: height as f64,
            state: VehicleState::Normal,
        }
    }

    pub fn spawn(arena: &mut Arena, x: f64, y: f64) -> ActorId {
        let vehicle = Vehicle::new(x, y, arena);
        arena.add(vehicle)
    }

    /// Resting height on the ground band
    pub fn rest_y(&self) -> f64 {
        (self.arena_height - VEHICLE_HEIGHT) - VEHICLE_GROUND_OFFSET
    }

    pub fn velocity(&self) -> (f64, f64) {
        (self.dx, self.dy)
    }

    pub fn is_exploding(&self) -> bool {
        matches!(self.state, VehicleState::Exploding { .. })
    }

    /// Explosion animation phase 1..=3, or None while intact
    pub fn explosion_phase(&self) -> Option<u8> {
        match self.state {
            VehicleState::Normal => None,
            VehicleState::Exploding { elapsed } => Some(match elapsed {
                0..=15 => 1,
                16..=30 => 2,
                _ => 3,
            }),
        }
    }

    pub fn go_left(&mut self) {
        if self.x > VEHICLE_LEFT_LIMIT {
            self.dx = -VEHICLE_DRIVE_SPEED;
            self.dy = 0.0;
        }
    }

    pub fn go_right(&mut self) {
        if self.x < VEHICLE_RIGHT_LIMIT {
            self.dx = VEHICLE_DRIVE_SPEED;
            self.dy = 0.0;
        }
    }

    /// Jump, only from level flight
    pub fn go_up(&mut self) {
        if self.dy == 0.0 {
            self.dx = 0.0;
            self.dy = -VEHICLE_SPEED;
        }
    }

    pub fn go_down(&mut self) {
        self.dx = 0.0;
        self.dy = VEHICLE_SPEED;
    }

    pub fn stay(&mut self) {
        if self.dy <= 0.0 {
            self.dy = 0.0;
        }
        self.dx = 0.0;
    }

    pub fn explode(&mut self) {
        self.dx = -DRIFT_SPEED;
        if !self.is_exploding() {
            self.state = VehicleState::Exploding { elapsed: 0 };
        }
    }

    /// Fires one shot straight up and one forward from the vehicle at `bounds`.
    pub fn fire(bounds: Rect, arena: &mut Arena) -> [ActorId; 2] {
        let up = Projectile::spawn(
            arena,
            bounds.x + bounds.w / 4.0,
            bounds.y,
            0.0,
            -PROJECTILE_SPEED,
        );
        let forward = Projectile::spawn(
            arena,
            bounds.x + bounds.w,
            bounds.y + bounds.h / 2.0,
            PROJECTILE_SPEED,
            0.0,
        );
        [up, forward]
    }
}

impl Behavior for Vehicle {
    fn advance(&mut self, me: ActorId, arena: &mut Arena) {
        self.dy += VEHICLE_GRAVITY;
        self.y += self.dy;
        self.x += self.dx;

        let rest_y = self.rest_y();
        if self.y < 0.0 {
            self.y = 0.0;
            self.dy = VEHICLE_SPEED;
        } else if self.y > rest_y {
            self.y = rest_y;
            self.dy = 0.0;
        }
        self.x = utils::clamp(self.x, 0.0, self.arena_width - VEHICLE_WIDTH);

        if let VehicleState::Exploding { elapsed } = &mut self.state {
            *elapsed += 1;
            if *elapsed >= VEHICLE_EXPLODE_TICKS {
                debug_vehicle!("Tick {} vehicle {} destroyed", arena.ticks(), me);
                arena.remove(me);
            }
        }
    }

    fn on_collision(&mut self, me: ActorId, other: &Contact, arena: &mut Arena) {
        match other.kind {
            ActorKind::Pit => {
                arena.raise(me);
                let (center_x, center_y) = other.bounds.center();
                self.x = center_x - PIT_SETTLE_OFFSET.0;
                self.y = center_y - PIT_SETTLE_OFFSET.1;
                debug_vehicle!("Tick {} vehicle {} dropped into pit {}", arena.ticks(), me, other.id);
            }
            ActorKind::Rock => arena.raise(me),
            ActorKind::Projectile => {
                debug_vehicle!("Tick {} vehicle {} shot by {}", arena.ticks(), me, other.id);
                self.explode();
            }
            _ => {}
        }
    }

    fn bounding_box(&self) -> Rect {
        Rect::new(self.x, self.y, VEHICLE_WIDTH, VEHICLE_HEIGHT)
    }

    fn visual_region(&self) -> Rect {
        if let Some(phase) = self.explosion_phase() {
            return SPRITE_EXPLOSION[phase as usize - 1];
        }
        let (x, y) = if self.dy > 0.0 {
            SPRITE_FALLING
        } else if self.dy < 0.0 {
            SPRITE_RISING
        } else {
            SPRITE_LEVEL
        };
        Rect::new(x, y, VEHICLE_WIDTH, VEHICLE_HEIGHT)
    }

    fn freeze(&mut self) {
        self.stay();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::pit::PitKind;
    use crate::actors::{Actor, Pit};
    use assert_approx_eq::assert_approx_eq;

    fn vehicle_at(arena: &mut Arena, x: f64, y: f64) -> ActorId {
        Vehicle::spawn(arena, x, y)
    }

    fn vehicle(arena: &Arena, id: ActorId) -> &Vehicle {
        match arena.get(id) {
            Some(Actor::Vehicle(v)) => v,
            other => panic!("expected vehicle, got {:?}", other),
        }
    }

    fn vehicle_mut(arena: &mut Arena, id: ActorId) -> &mut Vehicle {
        match arena.get_mut(id) {
            Some(Actor::Vehicle(v)) => v,
            _ => panic!("expected vehicle"),
        }
    }

    #[test]
    fn test_settles_on_ground_band() {
        let mut arena = Arena::seeded(1);
        let id = vehicle_at(&mut arena, 100.0, 400.0);
        arena.tick();
        let v = vehicle(&arena, id);
        assert_eq!(v.bounding_box().y, 382.0);
        assert_eq!(v.velocity(), (0.0, 0.0));
        assert_eq!(v.rest_y(), 382.0);
    }

    #[test]
    fn test_downward_velocity_clamps_at_ground() {
        let mut arena = Arena::seeded(1);
        let id = vehicle_at(&mut arena, 100.0, 380.0);
        vehicle_mut(&mut arena, id).go_down();
        arena.tick();
        let v = vehicle(&arena, id);
        assert_eq!(v.bounding_box().y, (500.0 - 23.0) - 95.0);
        assert_eq!(v.velocity().1, 0.0);
    }

    #[test]
    fn test_gravity_without_clamp() {
        let mut arena = Arena::seeded(1);
        let id = vehicle_at(&mut arena, 100.0, 300.0);
        arena.tick();
        arena.tick();
        let v = vehicle(&arena, id);
        assert_approx_eq!(v.velocity().1, 0.8);
        assert_approx_eq!(v.bounding_box().y, 301.2);
    }

    #[test]
    fn test_bounces_off_ceiling_only_below_zero() {
        let mut arena = Arena::seeded(1);
        let id = vehicle_at(&mut arena, 100.0, 20.0);
        vehicle_mut(&mut arena, id).go_up();
        arena.tick();
        let v = vehicle(&arena, id);
        assert_approx_eq!(v.bounding_box().y, 10.4);
        assert_approx_eq!(v.velocity().1, -9.6);

        arena.tick();
        let v = vehicle(&arena, id);
        assert_approx_eq!(v.bounding_box().y, 1.2);
        assert_approx_eq!(v.velocity().1, -9.2);

        arena.tick();
        let v = vehicle(&arena, id);
        assert_eq!(v.bounding_box().y, 0.0);
        assert_eq!(v.velocity().1, VEHICLE_SPEED);
    }

    #[test]
    fn test_horizontal_band_limits() {
        let mut arena = Arena::seeded(1);
        let id = vehicle_at(&mut arena, 40.0, 382.0);
        let v = vehicle_mut(&mut arena, id);
        v.go_left();
        assert_eq!(v.velocity().0, 0.0);
        v.go_right();
        assert_eq!(v.velocity().0, 5.0);

        let far = vehicle_at(&mut arena, 310.0, 382.0);
        let v = vehicle_mut(&mut arena, far);
        v.go_right();
        assert_eq!(v.velocity().0, 0.0);
        v.go_left();
        assert_eq!(v.velocity().0, -5.0);
        v.stay();
        assert_eq!(v.velocity(), (0.0, 0.0));
    }

    #[test]
    fn test_jump_requires_level_flight() {
        let mut arena = Arena::seeded(1);
        let id = vehicle_at(&mut arena, 100.0, 382.0);
        let v = vehicle_mut(&mut arena, id);
        v.go_up();
        assert_eq!(v.velocity().1, -VEHICLE_SPEED);
        v.go_down();
        v.go_up();
        assert_eq!(v.velocity().1, VEHICLE_SPEED);
    }

    #[test]
    fn test_clamped_to_playfield_width() {
        let mut arena = Arena::seeded(1);
        let id = vehicle_at(&mut arena, 2.0, 382.0);
        vehicle_mut(&mut arena, id).explode();
        arena.tick();
        assert_eq!(vehicle(&arena, id).bounding_box().x, 0.0);
    }

    #[test]
    fn test_explosion_runs_three_phases_then_removes() {
        let mut arena = Arena::seeded(1);
        let id = vehicle_at(&mut arena, 200.0, 382.0);
        vehicle_mut(&mut arena, id).explode();
        assert_eq!(vehicle(&arena, id).explosion_phase(), Some(1));

        let mut phases = Vec::new();
        while arena.contains(id) {
            phases.push(vehicle(&arena, id).explosion_phase().unwrap());
            arena.tick();
        }
        assert_eq!(phases.len(), VEHICLE_EXPLODE_TICKS as usize);
        assert_eq!(phases.first(), Some(&1));
        assert!(phases.contains(&2));
        assert_eq!(phases.last(), Some(&3));
    }

    #[test]
    fn test_pit_collision_settles_vehicle_and_explodes_it() {
        let mut arena = Arena::seeded(1);
        let pit = Pit::spawn_kind(&mut arena, 110.0, PitKind::Shallow);
        arena.get_mut(pit).unwrap().freeze();
        let id = vehicle_at(&mut arena, 100.0, 382.0);
        vehicle_mut(&mut arena, id).go_right();
        arena.tick();

        let v = vehicle(&arena, id);
        assert!(v.is_exploding());
        // Pit centre (120, 410) minus the settle offset
        assert_eq!(v.bounding_box().x, 105.0);
        assert_eq!(v.bounding_box().y, 405.0);
    }

    #[test]
    fn test_visual_region_tracks_vertical_motion() {
        let mut arena = Arena::seeded(1);
        let id = vehicle_at(&mut arena, 100.0, 382.0);
        let v = vehicle_mut(&mut arena, id);
        assert_eq!(v.visual_region(), Rect::new(212.0, 158.0, 31.0, 23.0));
        v.go_up();
        assert_eq!(v.visual_region(), Rect::new(46.0, 102.0, 31.0, 23.0));
        v.go_down();
        assert_eq!(v.visual_region(), Rect::new(79.0, 103.0, 31.0, 23.0));
        v.explode();
        assert_eq!(v.visual_region(), SPRITE_EXPLOSION[0]);
    }

    #[test]
    fn test_fire_spawns_two_projectiles() {
        let mut arena = Arena::seeded(1);
        let bounds = Rect::new(100.0, 382.0, 31.0, 23.0);
        let [up, forward] = Vehicle::fire(bounds, &mut arena);
        assert_eq!(arena.bounds(up).unwrap(), Rect::new(107.75, 382.0, 4.0, 4.0));
        assert_eq!(arena.bounds(forward).unwrap(), Rect::new(131.0, 393.5, 4.0, 4.0));
    }
}
