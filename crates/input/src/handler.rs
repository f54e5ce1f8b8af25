//! Frame-counted repeat handler for held movement keys.
//!
//! Left/right fire at most once every [`SIDE_REPEAT_FRAMES`] frames and soft drop
//! at most once every [`DOWN_REPEAT_FRAMES`] frames while held. Rotation and quit
//! are edge-triggered and never pass through here.
//!
//! Most terminals never report key releases, only repeated presses. A held key
//! therefore expires after `release_timeout_frames` frames without a new press;
//! terminal auto-repeat keeps it alive.

use arrayvec::ArrayVec;

use crate::types::{GameAction, DOWN_REPEAT_FRAMES, SIDE_REPEAT_FRAMES};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Tracks held movement intents across frames.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    horizontal_hold_frames: u32,
    down_hold_frames: u32,
    side_counter: u32,
    down_counter: u32,
    side_delay: u32,
    down_delay: u32,
    release_timeout_frames: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(SIDE_REPEAT_FRAMES, DOWN_REPEAT_FRAMES)
    }

    pub fn with_config(side_delay: u32, down_delay: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            horizontal_hold_frames: 0,
            down_hold_frames: 0,
            // Start primed so the first press acts on the next frame.
            side_counter: side_delay,
            down_counter: down_delay,
            side_delay,
            down_delay,
            release_timeout_frames: 0,
        }
    }

    /// Keep a key held for this many extra frames after its last press.
    pub fn with_key_release_timeout_frames(mut self, frames: u32) -> Self {
        self.release_timeout_frames = frames;
        self
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    pub fn down_held(&self) -> bool {
        self.down_held
    }

    /// Register a press (or auto-repeat) of a mapped action.
    ///
    /// Returns `true` if the action is a held movement intent tracked here;
    /// other actions should be applied immediately by the caller.
    pub fn handle_press(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => {
                self.horizontal = HorizontalDirection::Left;
                self.horizontal_hold_frames = self.release_timeout_frames;
                true
            }
            GameAction::MoveRight => {
                self.horizontal = HorizontalDirection::Right;
                self.horizontal_hold_frames = self.release_timeout_frames;
                true
            }
            GameAction::SoftDrop => {
                self.down_held = true;
                self.down_hold_frames = self.release_timeout_frames;
                true
            }
            GameAction::Rotate | GameAction::Quit => false,
        }
    }

    pub fn handle_release(&mut self, action: GameAction) {
        match action {
            GameAction::MoveLeft if self.horizontal == HorizontalDirection::Left => {
                self.horizontal = HorizontalDirection::None;
            }
            GameAction::MoveRight if self.horizontal == HorizontalDirection::Right => {
                self.horizontal = HorizontalDirection::None;
            }
            GameAction::SoftDrop => {
                self.down_held = false;
            }
            _ => {}
        }
    }

    /// Advance one frame and return the movement intents due this frame.
    pub fn update(&mut self) -> ArrayVec<GameAction, 2> {
        let mut actions = ArrayVec::new();

        self.side_counter = self.side_counter.saturating_add(1);
        self.down_counter = self.down_counter.saturating_add(1);

        let side_action = match self.horizontal {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        };
        if let Some(action) = side_action {
            if self.side_counter >= self.side_delay {
                actions.push(action);
                self.side_counter = 0;
            }
        }

        if self.down_held && self.down_counter >= self.down_delay {
            actions.push(GameAction::SoftDrop);
            self.down_counter = 0;
        }

        self.expire_holds();
        actions
    }

    fn expire_holds(&mut self) {
        if self.horizontal != HorizontalDirection::None {
            if self.horizontal_hold_frames == 0 {
                self.horizontal = HorizontalDirection::None;
            } else {
                self.horizontal_hold_frames -= 1;
            }
        }
        if self.down_held {
            if self.down_hold_frames == 0 {
                self.down_held = false;
            } else {
                self.down_hold_frames -= 1;
            }
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
