use crate::config;
use crate::input::{Controls, InputSource, MacroquadInput, VehicleCommand};
use crate::render::Renderer;
use crate::session::{Outcome, Session};
use log::info;
use macroquad::prelude::{KeyCode, get_frame_time, is_key_pressed, next_frame};

/// The Game struct drives a session at a fixed tick rate and feeds it keyboard input
pub struct Game {
    pub session: Session,
    controls: Vec<Controls>,
    time_accumulator: f32,
    tick_duration: f32,
}

impl Game {
    pub fn new(session: Session) -> Self {
        let controls = (0..session.vehicles().len())
            .map(Controls::for_player)
            .collect();
        Game {
            session,
            controls,
            time_accumulator: 0.0,
            tick_duration: 1.0 / config::TICK_RATE as f32,
        }
    }

    /// One command slot per player, in player order
    pub fn poll_commands(&self, input: &impl InputSource) -> Vec<Option<VehicleCommand>> {
        self.controls.iter().map(|c| c.poll(input)).collect()
    }

    /// Advance the game by one fixed time step
    pub fn update_simulation(&mut self, input: &impl InputSource) -> Option<Outcome> {
        let commands = self.poll_commands(input);
        self.session.step(&commands)
    }

    /// Run the main game loop using the provided renderer
    pub async fn run(&mut self, renderer: &mut Renderer) -> Option<Outcome> {
        info!("Starting main loop...");
        let input = MacroquadInput;
        let mut outcome = None;

        while !Renderer::window_should_close() && outcome.is_none() {
            self.time_accumulator += get_frame_time();

            // Fixed simulation update loop
            while self.time_accumulator >= self.tick_duration {
                self.time_accumulator -= self.tick_duration;
                outcome = self.update_simulation(&input);
                if outcome.is_some() {
                    break;
                }
            }

            renderer.draw_frame(self.session.arena());
            next_frame().await;
        }

        // After game over, keep the frozen arena on screen under the announcement
        if let Some(result) = outcome {
            info!("{}", result.message());
            loop {
                renderer.draw_frame(self.session.arena());
                renderer.draw_announcement(result.message());
                if Renderer::window_should_close() || is_key_pressed(KeyCode::Enter) {
                    break;
                }
                next_frame().await;
            }
        }
        info!("Exiting Moon Patrol.");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::tests::FakeInput;
    use crate::session::SessionSettings;
    use crate::types::ActorKind;
    use ::rand::SeedableRng;
    use ::rand::rngs::StdRng;

    fn game(players: u8, aliens: u32) -> Game {
        crate::logging::init_test_logger();
        let session = Session::new(SessionSettings { players, aliens }, StdRng::seed_from_u64(9)).unwrap();
        Game::new(session)
    }

    #[test]
    fn test_one_control_set_per_player() {
        assert_eq!(game(1, 1).controls, vec![Controls::PLAYER_ONE]);
        assert_eq!(
            game(2, 1).controls,
            vec![Controls::PLAYER_ONE, Controls::PLAYER_TWO]
        );
    }

    #[test]
    fn test_poll_commands_per_player() {
        let game = game(2, 1);
        let input = FakeInput {
            down: vec![KeyCode::Space, KeyCode::A],
            released: vec![],
        };
        assert_eq!(
            game.poll_commands(&input),
            vec![Some(VehicleCommand::Fire), Some(VehicleCommand::Left)]
        );
    }

    #[test]
    fn test_fire_key_spawns_projectiles() {
        let mut game = game(1, 1);
        let input = FakeInput {
            down: vec![KeyCode::Space],
            released: vec![],
        };
        assert_eq!(game.update_simulation(&input), None);
        assert_eq!(game.session.arena().count_kind(ActorKind::Projectile), 2);
        assert_eq!(game.session.arena().ticks(), 1);
    }

    #[test]
    fn test_tick_duration_matches_rate() {
        let game = game(1, 1);
        assert_eq!(game.tick_duration, 1.0 / 30.0);
    }
}
