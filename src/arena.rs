use crate::actors::{Actor, Behavior};
use crate::error::ArenaError;
use crate::types::{ActorId, Contact, Rect};
use crate::{debug_arena, debug_collision};
use ::rand::rngs::StdRng;
use std::collections::HashMap;

// Represents the game arena: owner of every actor and driver of the tick loop
#[derive(Debug)]
pub struct Arena {
    width: i32,
    height: i32,
    order: Vec<ActorId>, // Insertion order, most recent last
    slots: HashMap<ActorId, Option<Actor>>, // None while the actor's own handler runs
    next_id: u64,
    halted: bool,
    ticks: u64,
    rng: StdRng,
}

impl Arena {
    pub fn new(width: i32, height: i32, rng: StdRng) -> Result<Self, ArenaError> {
        if width <= 0 || height <= 0 {
            return Err(ArenaError::InvalidDimensions { width, height });
        }
        log::info!("Arena created with {}x{} playfield.", width, height);
        Ok(Arena {
            width,
            height,
            order: Vec::new(),
            slots: HashMap::new(),
            next_id: 0,
            halted: false,
            ticks: 0,
            rng,
        })
    }

    /// Registers a new actor at the end of the order and returns its handle.
    pub fn add(&mut self, actor: impl Into<Actor>) -> ActorId {
        let actor = actor.into();
        let id = ActorId(self.next_id);
        self.next_id += 1;
        debug_arena!("Tick {} added {:?} {}", self.ticks, actor.kind(), id);
        self.order.push(id);
        self.slots.insert(id, Some(actor));
        id
    }

    /// Removes the actor if present. Returns whether anything was removed.
    pub fn remove(&mut self, id: ActorId) -> bool {
        if self.slots.remove(&id).is_none() {
            return false;
        }
        self.order.retain(|&other| other != id);
        debug_arena!("Tick {} removed {}", self.ticks, id);
        true
    }

    /// Remove-then-re-add: moves a member to the end of the order.
    pub fn raise(&mut self, id: ActorId) {
        if !self.contains(id) {
            return;
        }
        self.order.retain(|&other| other != id);
        self.order.push(id);
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.slots.get(&id).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.slots.get_mut(&id).and_then(Option::as_mut)
    }

    pub fn bounds(&self, id: ActorId) -> Option<Rect> {
        self.get(id).map(Behavior::bounding_box)
    }

    /// Snapshot of an actor as seen by the other party of a collision
    pub fn contact(&self, id: ActorId) -> Option<Contact> {
        self.get(id).map(|actor| Contact {
            id,
            kind: actor.kind(),
            bounds: actor.bounding_box(),
        })
    }

    /// Ordered copy of the actor handles, oldest first
    pub fn actors(&self) -> Vec<ActorId> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Checks that a spawn point lies inside the playfield
    pub fn check_spawn(&self, x: f64, y: f64) -> Result<(), ArenaError> {
        let inside_x = x >= 0.0 && x <= self.width as f64;
        let inside_y = y >= 0.0 && y <= self.height as f64;
        if inside_x && inside_y {
            Ok(())
        } else {
            Err(ArenaError::SpawnOutOfRange { x, y })
        }
    }

    /// Overlap test between two members. A removed actor never overlaps anything.
    pub fn overlaps(&self, a: ActorId, b: ActorId) -> bool {
        match (self.bounds(a), self.bounds(b)) {
            (Some(first), Some(second)) => first.overlaps(&second),
            _ => false,
        }
    }

    /// Puts a vehicle into its explode state. No-op for anything else.
    pub fn explode_vehicle(&mut self, id: ActorId) {
        if let Some(Actor::Vehicle(vehicle)) = self.get_mut(id) {
            vehicle.explode();
        }
    }

    /// Advances every actor once and dispatches the collisions caused by movement.
    ///
    /// Actors are visited newest first, and the same order is used when looking
    /// for the other party of a collision, so actors drawn on top are checked first.
    /// Handlers may add or remove actors; removals take effect immediately.
    pub fn tick(&mut self) {
        self.ticks += 1;
        let snapshot: Vec<ActorId> = self.order.iter().rev().copied().collect();

        for &id in &snapshot {
            let Some(mut actor) = self.checkout(id) else {
                continue;
            };
            let before = actor.bounding_box();
            actor.advance(id, self);
            let moved = actor.bounding_box() != before;
            if !self.restore(id, actor) || !moved {
                continue;
            }

            for &other in &snapshot {
                if other != id && self.overlaps(id, other) {
                    self.dispatch_pair(id, other);
                }
            }
        }
    }

    /// Halts the session: every actor stops its self-propelled motion.
    pub fn freeze_all(&mut self) {
        self.halted = true;
        for id in self.order.iter().rev() {
            if let Some(Some(actor)) = self.slots.get_mut(id) {
                actor.freeze();
            }
        }
        log::info!("Arena halted after {} ticks.", self.ticks);
    }

    fn dispatch_pair(&mut self, a: ActorId, b: ActorId) {
        let (Some(first), Some(second)) = (self.contact(a), self.contact(b)) else {
            return;
        };
        debug_collision!(
            "Tick {} {:?} {} hit {:?} {}",
            self.ticks,
            first.kind,
            a,
            second.kind,
            b
        );
        self.dispatch(a, &second);
        self.dispatch(b, &first);
    }

    fn dispatch(&mut self, id: ActorId, other: &Contact) {
        let Some(mut actor) = self.checkout(id) else {
            return;
        };
        actor.on_collision(id, other, self);
        self.restore(id, actor);
    }

    fn checkout(&mut self, id: ActorId) -> Option<Actor> {
        self.slots.get_mut(&id).and_then(Option::take)
    }

    // Returns false (dropping the actor) if it was removed while checked out
    fn restore(&mut self, id: ActorId, actor: Actor) -> bool {
        match self.slots.get_mut(&id) {
            Some(slot) => {
                *slot = Some(actor);
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub(crate) fn seeded(seed: u64) -> Self {
        use ::rand::SeedableRng;
        crate::logging::init_test_logger();
        Arena::new(
            crate::config::ARENA_WIDTH,
            crate::config::ARENA_HEIGHT,
            StdRng::seed_from_u64(seed),
        )
        .unwrap()
    }

    #[cfg(test)]
    pub(crate) fn count_kind(&self, kind: crate::types::ActorKind) -> usize {
        self.order
            .iter()
            .filter(|&&id| self.get(id).map(Actor::kind) == Some(kind))
            .count()
    }
}
