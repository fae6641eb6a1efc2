//! Key mapping: arrow keys move, `q` quits, everything else is ignored.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::grid::Dir;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Intent {
    Move(Dir),
    Quit,
}

/// Waits up to `timeout` for one key event. Timeout expiry is a valid
/// no-move tick, reported as `None`.
pub fn poll_intent(timeout: Duration) -> io::Result<Option<Intent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    if let Event::Key(key) = event::read()? {
        if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return Ok(intent_for(key.code));
        }
    }
    Ok(None)
}

fn intent_for(code: KeyCode) -> Option<Intent> {
    match code {
        KeyCode::Char('q') => Some(Intent::Quit),
        KeyCode::Up => Some(Intent::Move(Dir::Up)),
        KeyCode::Down => Some(Intent::Move(Dir::Down)),
        KeyCode::Left => Some(Intent::Move(Dir::Left)),
        KeyCode::Right => Some(Intent::Move(Dir::Right)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_arrows_and_quit_and_ignores_the_rest() {
        assert_eq!(intent_for(KeyCode::Up), Some(Intent::Move(Dir::Up)));
        assert_eq!(intent_for(KeyCode::Down), Some(Intent::Move(Dir::Down)));
        assert_eq!(intent_for(KeyCode::Left), Some(Intent::Move(Dir::Left)));
        assert_eq!(intent_for(KeyCode::Right), Some(Intent::Move(Dir::Right)));
        assert_eq!(intent_for(KeyCode::Char('q')), Some(Intent::Quit));
        assert_eq!(intent_for(KeyCode::Char('w')), None);
        assert_eq!(intent_for(KeyCode::Esc), None);
    }
}
