// Keyboard polling: per-player key maps decoded into vehicle commands

use macroquad::prelude::KeyCode;

/// What a player asked their vehicle to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleCommand {
    Up,
    Down,
    Fire,
    Right,
    Left,
    Stay, // A movement key was released
}

/// Source of key state, polled once per tick
pub trait InputSource {
    /// Level-triggered: the key is currently held
    fn is_key_down(&self, key: KeyCode) -> bool;
    /// Edge-triggered: the key went up this frame
    fn is_key_released(&self, key: KeyCode) -> bool;
}

/// Live keyboard state from the macroquad window
pub struct MacroquadInput;

impl InputSource for MacroquadInput {
    fn is_key_down(&self, key: KeyCode) -> bool {
        macroquad::input::is_key_down(key)
    }

    fn is_key_released(&self, key: KeyCode) -> bool {
        macroquad::input::is_key_released(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub fire: KeyCode,
}

impl Controls {
    pub const PLAYER_ONE: Controls = Controls {
        up: KeyCode::Up,
        down: KeyCode::Down,
        left: KeyCode::Left,
        right: KeyCode::Right,
        fire: KeyCode::Space,
    };

    /// Keyboard only: fire is `F` rather than a mouse button.
    pub const PLAYER_TWO: Controls = Controls {
        up: KeyCode::W,
        down: KeyCode::S,
        left: KeyCode::A,
        right: KeyCode::D,
        fire: KeyCode::F,
    };

    pub fn for_player(index: usize) -> Controls {
        if index == 0 {
            Controls::PLAYER_ONE
        } else {
            Controls::PLAYER_TWO
        }
    }

    /// Decodes at most one command. Earlier keys in the list take priority.
    pub fn poll(&self, input: &impl InputSource) -> Option<VehicleCommand> {
        let pressed = [
            (self.up, VehicleCommand::Up),
            (self.down, VehicleCommand::Down),
            (self.fire, VehicleCommand::Fire),
            (self.right, VehicleCommand::Right),
            (self.left, VehicleCommand::Left),
        ];
        if let Some(&(_, command)) = pressed.iter().find(|(key, _)| input.is_key_down(*key)) {
            return Some(command);
        }
        let released = [self.up, self.right, self.left]
            .into_iter()
            .any(|key| input.is_key_released(key));
        released.then_some(VehicleCommand::Stay)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Scripted key state for tests
    #[derive(Debug, Default)]
    pub(crate) struct FakeInput {
        pub down: Vec<KeyCode>,
        pub released: Vec<KeyCode>,
    }

    impl InputSource for FakeInput {
        fn is_key_down(&self, key: KeyCode) -> bool {
            self.down.contains(&key)
        }

        fn is_key_released(&self, key: KeyCode) -> bool {
            self.released.contains(&key)
        }
    }

    #[test]
    fn test_no_keys_no_command() {
        assert_eq!(Controls::PLAYER_ONE.poll(&FakeInput::default()), None);
    }

    #[test]
    fn test_priority_order() {
        let input = FakeInput {
            down: vec![KeyCode::Left, KeyCode::Space, KeyCode::Up],
            released: vec![],
        };
        assert_eq!(Controls::PLAYER_ONE.poll(&input), Some(VehicleCommand::Up));

        let input = FakeInput {
            down: vec![KeyCode::Left, KeyCode::Space],
            released: vec![KeyCode::Right],
        };
        assert_eq!(Controls::PLAYER_ONE.poll(&input), Some(VehicleCommand::Fire));

        let input = FakeInput {
            down: vec![KeyCode::Left, KeyCode::Right],
            released: vec![],
        };
        assert_eq!(Controls::PLAYER_ONE.poll(&input), Some(VehicleCommand::Right));
    }

    #[test]
    fn test_release_means_stay() {
        let input = FakeInput {
            down: vec![],
            released: vec![KeyCode::Left],
        };
        assert_eq!(Controls::PLAYER_ONE.poll(&input), Some(VehicleCommand::Stay));

        // Releasing down is not a stop
        let input = FakeInput {
            down: vec![],
            released: vec![KeyCode::Down],
        };
        assert_eq!(Controls::PLAYER_ONE.poll(&input), None);
    }

    #[test]
    fn test_players_have_separate_keys() {
        let input = FakeInput {
            down: vec![KeyCode::W],
            released: vec![],
        };
        assert_eq!(Controls::PLAYER_ONE.poll(&input), None);
        assert_eq!(Controls::for_player(1).poll(&input), Some(VehicleCommand::Up));
    }

    #[test]
    fn test_player_two_fires_from_keyboard() {
        let input = FakeInput {
            down: vec![KeyCode::F],
            released: vec![],
        };
        assert_eq!(Controls::PLAYER_TWO.poll(&input), Some(VehicleCommand::Fire));
        assert_eq!(Controls::PLAYER_ONE.poll(&input), None);
    }
}
