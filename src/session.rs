//! Game session: the fixed roster of scenery, vehicles and aliens living in one arena,
//! plus the rules that sit above individual actors (hazard spawning, win/lose).

use crate::actors::{Actor, Alien, Background, Pit, Rock, RockKind, Vehicle};
use crate::arena::Arena;
use crate::config::*;
use crate::error::{ArenaError, GameError};
use crate::input::VehicleCommand;
use crate::types::{ActorId, Rect};
use crate::{debug_session, debug_spawn};
use ::rand::Rng;
use ::rand::rngs::StdRng;

/// Terminal state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Won => "You win!",
            Outcome::Lost => "You lose!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub players: u8,
    pub aliens: u32,
}

/// Spawns rocks and pits once both cooldowns have run out.
///
/// Each step checks *both* counters before spawning either hazard, so spawning
/// one hazard holds back the other for the next cooldown period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HazardSpawner {
    pub rock_cooldown: u32,
    pub pit_cooldown: u32,
}

impl HazardSpawner {
    /// One spawner step with the random trigger drawn from the arena
    pub fn step(&mut self, arena: &mut Arena) -> Option<ActorId> {
        self.step_with(arena, |arena| arena.rng().gen_ratio(1, HAZARD_ODDS))
    }

    /// Rock step then pit step; `trigger` is rolled once per step.
    pub fn step_with(
        &mut self,
        arena: &mut Arena,
        mut trigger: impl FnMut(&mut Arena) -> bool,
    ) -> Option<ActorId> {
        let rock = if trigger(arena) && self.cooled_down() && !arena.is_halted() {
            self.rock_cooldown = 0;
            Some(self.spawn_rock(arena))
        } else {
            self.rock_cooldown += 1;
            None
        };

        let pit = if trigger(arena) && self.cooled_down() && !arena.is_halted() {
            self.pit_cooldown = 0;
            let (width, _) = arena.size();
            Some(Pit::spawn(arena, width as f64))
        } else {
            self.pit_cooldown += 1;
            None
        };

        let spawned = rock.or(pit);
        if let Some(id) = spawned {
            debug_spawn!("Tick {} hazard {} spawned", arena.ticks(), id);
        }
        spawned
    }

    fn cooled_down(&self) -> bool {
        self.rock_cooldown >= HAZARD_COOLDOWN && self.pit_cooldown >= HAZARD_COOLDOWN
    }

    fn spawn_rock(&self, arena: &mut Arena) -> ActorId {
        let kind = RockKind::random(arena.rng());
        let (width, height) = arena.size();
        let y = terrain_y(height) - kind.ground_offset();
        Rock::spawn(arena, width as f64, y, kind)
    }
}

pub struct Session {
    arena: Arena,
    vehicles: Vec<ActorId>, // Handles only; the arena owns the actors
    aliens: Vec<ActorId>,
    spawner: HazardSpawner,
    outcome: Option<Outcome>,
}

impl Session {
    pub fn new(settings: SessionSettings, rng: StdRng) -> Result<Self, GameError> {
        if !(1..=2).contains(&settings.players) {
            return Err(GameError::InvalidPlayerCount(settings.players));
        }
        let arena = Arena::new(ARENA_WIDTH, ARENA_HEIGHT, rng)?;
        let mut session = Session {
            arena,
            vehicles: Vec::new(),
            aliens: Vec::new(),
            spawner: HazardSpawner::default(),
            outcome: None,
        };

        session.add_scenery();
        session.add_vehicle(PLAYER_ONE_X)?;
        if settings.players == 2 {
            session.add_vehicle(PLAYER_TWO_X)?;
        }
        for _ in 0..settings.aliens {
            let alien = Alien::spawn(&mut session.arena);
            session.aliens.push(alien);
        }

        log::info!(
            "Session ready: {} player(s), {} alien(s), {} actors.",
            settings.players,
            settings.aliens,
            session.arena.len()
        );
        Ok(session)
    }

    // Sky, then two tiles each of mountains, city and ground, back to front
    fn add_scenery(&mut self) {
        let (width, height) = self.arena.size();
        let (w, h) = (width as f64, height as f64);
        let ground = terrain_y(height);
        let mountains_y = ((height - 75) / 3) as f64;
        let city_y = ground - 90.0;

        let layers = [
            (0.0, Rect::new(0.0, 0.0, 512.0, 128.0), 0.0, 0.0),
            (mountains_y, Rect::new(0.0, 258.0, 512.0, 128.0), 1.0, h - mountains_y),
            (city_y, Rect::new(0.0, 386.0, 512.0, 128.0), 2.0, h - city_y),
            (ground, Rect::new(0.0, 513.0, 512.0, 128.0), 3.0, GROUND_DEPTH),
        ];
        for (y, sprite, speed, layer_h) in layers {
            if speed == 0.0 {
                self.arena.add(Background::new(Rect::new(0.0, y, w, h), sprite, speed));
                continue;
            }
            for x in [0.0, w] {
                self.arena
                    .add(Background::new(Rect::new(x, y, w, layer_h), sprite, speed));
            }
        }
    }

    /// Puts another vehicle on the ground line at `x`
    pub fn add_vehicle(&mut self, x: f64) -> Result<ActorId, ArenaError> {
        let y = terrain_y(ARENA_HEIGHT);
        self.arena.check_spawn(x, y)?;
        let id = Vehicle::spawn(&mut self.arena, x, y);
        self.vehicles.push(id);
        Ok(id)
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    pub fn vehicles(&self) -> &[ActorId] {
        &self.vehicles
    }

    pub fn aliens(&self) -> &[ActorId] {
        &self.aliens
    }

    pub fn is_won(&self) -> bool {
        !self.aliens.iter().any(|&id| self.arena.contains(id))
    }

    pub fn is_lost(&self) -> bool {
        !self.vehicles.iter().any(|&id| self.arena.contains(id))
    }

    /// Applies a player's command to their vehicle. Ignored once halted or destroyed.
    pub fn command(&mut self, player: usize, command: VehicleCommand) {
        if self.arena.is_halted() {
            return;
        }
        let Some(&id) = self.vehicles.get(player) else {
            return;
        };
        if command == VehicleCommand::Fire {
            if let Some(bounds) = self.arena.bounds(id) {
                Vehicle::fire(bounds, &mut self.arena);
            }
            return;
        }
        let Some(Actor::Vehicle(vehicle)) = self.arena.get_mut(id) else {
            return;
        };
        match command {
            VehicleCommand::Up => vehicle.go_up(),
            VehicleCommand::Down => vehicle.go_down(),
            VehicleCommand::Right => vehicle.go_right(),
            VehicleCommand::Left => vehicle.go_left(),
            VehicleCommand::Stay => vehicle.stay(),
            VehicleCommand::Fire => {}
        }
    }

    pub fn spawn_hazards(&mut self) -> Option<ActorId> {
        self.spawner.step(&mut self.arena)
    }

    /// Checks for a win (first) or a loss and halts the arena when either holds.
    pub fn check_outcome(&mut self) -> Option<Outcome> {
        if self.outcome.is_some() {
            return self.outcome;
        }
        let outcome = if self.is_won() {
            Outcome::Won
        } else if self.is_lost() {
            Outcome::Lost
        } else {
            return None;
        };
        self.arena.freeze_all();
        self.outcome = Some(outcome);
        log::info!("Game over after {} ticks: {:?}", self.arena.ticks(), outcome);
        self.outcome
    }

    /// One full tick: advance the arena, apply input, spawn hazards, check the outcome.
    /// `commands[i]` belongs to player `i`.
    pub fn step(&mut self, commands: &[Option<VehicleCommand>]) -> Option<Outcome> {
        self.arena.tick();
        for (player, command) in commands.iter().enumerate() {
            if let Some(command) = *command {
                debug_session!("Tick {} player {} {:?}", self.arena.ticks(), player + 1, command);
                self.command(player, command);
            }
        }
        self.spawn_hazards();
        self.check_outcome()
    }
}
