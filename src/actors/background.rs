// Scrolling background layer: an endlessly wrapping strip of scenery

use super::Behavior;
use crate::arena::Arena;
use crate::types::{ActorId, Contact, Rect};

#[derive(Debug, Clone)]
pub struct Background {
    bounds: Rect,
    start_x: f64,
    sprite: Rect,
    dx: f64,
}

impl Background {
    pub fn new(bounds: Rect, sprite: Rect, speed: f64) -> Self {
        Background {
            bounds,
            start_x: bounds.x,
            sprite,
            dx: -speed,
        }
    }
}

impl Behavior for Background {
    fn advance(&mut self, _me: ActorId, _arena: &mut Arena) {
        self.bounds.x += self.dx;
        // Snap back once a full width has scrolled past
        if self.start_x - self.bounds.x >= self.bounds.w {
            self.bounds.x = self.start_x;
        }
    }

    fn on_collision(&mut self, _me: ActorId, _other: &Contact, _arena: &mut Arena) {}

    fn bounding_box(&self) -> Rect {
        self.bounds
    }

    fn visual_region(&self) -> Rect {
        self.sprite
    }

    fn freeze(&mut self) {
        self.dx = 0.0;
    }
}
