//! Key mapping from terminal events to game actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use brick_tetris_types::UserAction;

/// Map keyboard input to an abstract game action.
///
/// One action per key press; unbound keys map to nothing and the game
/// machine treats them as a no-op tick.
pub fn map_key(key: KeyEvent) -> Option<UserAction> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(UserAction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(UserAction::Right),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(UserAction::Down),

        // Reserved by the action vocabulary; the rules ignore it.
        KeyCode::Up => Some(UserAction::Up),

        // Rotation
        KeyCode::Char(' ') => Some(UserAction::Action),

        // Session control
        KeyCode::Enter => Some(UserAction::Start),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(UserAction::Pause),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(UserAction::Terminate),

        _ => None,
    }
}

/// Check if the key should quit the process immediately.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Left)),
            Some(UserAction::Left)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Right)),
            Some(UserAction::Right)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Down)),
            Some(UserAction::Down)
        );

        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('A'))),
            Some(UserAction::Left)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('d'))),
            Some(UserAction::Right)
        );
    }

    #[test]
    fn test_rotation_key() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char(' '))),
            Some(UserAction::Action)
        );
    }

    #[test]
    fn test_session_keys() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Enter)),
            Some(UserAction::Start)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('p'))),
            Some(UserAction::Pause)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('q'))),
            Some(UserAction::Terminate)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Esc)),
            Some(UserAction::Terminate)
        );
    }

    #[test]
    fn test_unbound_keys_map_to_nothing() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('x'))), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Tab)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
