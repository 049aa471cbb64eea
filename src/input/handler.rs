use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    Pause,
    Restart,
    ToggleAutopilot,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::GameAction(Action::Move(Direction::Up)),
            KeyCode::Down => KeyAction::GameAction(Action::Move(Direction::Down)),
            KeyCode::Left => KeyAction::GameAction(Action::Move(Direction::Left)),
            KeyCode::Right => KeyAction::GameAction(Action::Move(Direction::Right)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::GameAction(Action::Move(Direction::Up))
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::GameAction(Action::Move(Direction::Down))
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::GameAction(Action::Move(Direction::Left))
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::GameAction(Action::Move(Direction::Right))
            }

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => KeyAction::Pause,
            KeyCode::Char('t') | KeyCode::Char('T') => KeyAction::ToggleAutopilot,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Buffers the direction requested between two ticks
///
/// Requests that would reverse the snake onto its neck are dropped, as are
/// repeats of the heading it already has. The last accepted request in a tick
/// wins.
#[derive(Debug, Default)]
pub struct DirectionFilter {
    pending: Option<Direction>,
}

impl DirectionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a direction; `current` is the heading the snake has right now
    pub fn request(&mut self, current: Direction, requested: Direction) -> bool {
        if requested.is_opposite(current) || requested == current {
            return false;
        }
        self.pending = Some(requested);
        true
    }

    /// Action for the next tick, clearing the buffer
    pub fn take_action(&mut self) -> Action {
        self.pending.take().map(Action::Move).unwrap_or(Action::Continue)
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(
            handler.handle_key_event(up),
            KeyAction::GameAction(Action::Move(Direction::Up))
        );

        let left = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(
            handler.handle_key_event(left),
            KeyAction::GameAction(Action::Move(Direction::Left))
        );
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        let s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(
            handler.handle_key_event(s),
            KeyAction::GameAction(Action::Move(Direction::Down))
        );

        let d_upper = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(d_upper),
            KeyAction::GameAction(Action::Move(Direction::Right))
        );
    }

    #[test]
    fn test_control_keys() {
        let handler = InputHandler::new();

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(esc), KeyAction::Quit);

        let r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(r), KeyAction::Restart);

        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(space), KeyAction::Pause);

        let t = KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(t), KeyAction::ToggleAutopilot);

        let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(x), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_filter_drops_reversal() {
        let mut filter = DirectionFilter::new();

        assert!(!filter.request(Direction::Right, Direction::Left));
        assert_eq!(filter.take_action(), Action::Continue);

        assert!(filter.request(Direction::Right, Direction::Up));
        assert_eq!(filter.take_action(), Action::Move(Direction::Up));
        assert_eq!(filter.take_action(), Action::Continue);
    }

    #[test]
    fn test_filter_last_request_wins() {
        let mut filter = DirectionFilter::new();

        filter.request(Direction::Right, Direction::Up);
        filter.request(Direction::Right, Direction::Down);
        assert!(!filter.request(Direction::Right, Direction::Right));

        assert_eq!(filter.take_action(), Action::Move(Direction::Down));
    }
}
