use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Intent, ViewMode};

/// Slider step for plain arrow keys and for shifted/bracket keys
pub const PROGRESS_STEP: f64 = 1.0;
pub const PROGRESS_JUMP: f64 = 10.0;

/// Check if a KeyCode matches the expected character.
/// When expected is uppercase, match is case-sensitive.
/// When expected is lowercase, match is case-insensitive.
pub fn key_matches(key: &KeyCode, expected: char) -> bool {
    match key {
        KeyCode::Char(c) => {
            if expected.is_uppercase() {
                *c == expected
            } else {
                c.to_ascii_lowercase() == expected
            }
        }
        _ => false,
    }
}

/// Map a key event to a user intent based on the current view mode
pub fn map_key_to_intent(key: &KeyEvent, mode: ViewMode) -> Option<Intent> {
    let code = &key.code;

    // Common keys across all modes
    if key_matches(code, 'q') {
        return Some(Intent::Quit);
    }
    if *code == KeyCode::Char('1') {
        return Some(Intent::ShowTimeline);
    }
    if *code == KeyCode::Char('2') || key_matches(code, 'n') {
        return Some(Intent::ShowNarrative);
    }
    if *code == KeyCode::Char('3') || key_matches(code, 'f') {
        return Some(Intent::ShowFiles);
    }

    match mode {
        ViewMode::Timeline => {
            let shifted = key.modifiers.contains(KeyModifiers::SHIFT);
            match code {
                KeyCode::Esc => Some(Intent::ClearBrush),
                KeyCode::Left if shifted => Some(Intent::ProgressBy(-PROGRESS_JUMP)),
                KeyCode::Right if shifted => Some(Intent::ProgressBy(PROGRESS_JUMP)),
                KeyCode::Left => Some(Intent::ProgressBy(-PROGRESS_STEP)),
                KeyCode::Right => Some(Intent::ProgressBy(PROGRESS_STEP)),
                KeyCode::Char('[') => Some(Intent::ProgressBy(-PROGRESS_JUMP)),
                KeyCode::Char(']') => Some(Intent::ProgressBy(PROGRESS_JUMP)),
                KeyCode::Home => Some(Intent::ProgressTo(0.0)),
                KeyCode::End => Some(Intent::ProgressTo(100.0)),
                KeyCode::Char('H') => Some(Intent::ProgressBy(-PROGRESS_JUMP)),
                KeyCode::Char('L') => Some(Intent::ProgressBy(PROGRESS_JUMP)),
                _ if key_matches(code, 'h') => Some(Intent::ProgressBy(-PROGRESS_STEP)),
                _ if key_matches(code, 'l') => Some(Intent::ProgressBy(PROGRESS_STEP)),
                _ => None,
            }
        }
        ViewMode::Narrative | ViewMode::Files => {
            if *code == KeyCode::Esc || key_matches(code, 't') {
                return Some(Intent::ShowTimeline);
            }
            if *code == KeyCode::Up || key_matches(code, 'k') {
                return Some(Intent::MoveUp);
            }
            if *code == KeyCode::Down || key_matches(code, 'j') {
                return Some(Intent::MoveDown);
            }
            if *code == KeyCode::Home || *code == KeyCode::Char('g') {
                return Some(Intent::MoveFirst);
            }
            if *code == KeyCode::End || *code == KeyCode::Char('G') {
                return Some(Intent::MoveLast);
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_matches_case() {
        assert!(key_matches(&KeyCode::Char('Q'), 'q'));
        assert!(key_matches(&KeyCode::Char('q'), 'q'));
        assert!(!key_matches(&KeyCode::Char('l'), 'L'));
        assert!(!key_matches(&KeyCode::Enter, 'q'));
    }

    #[test]
    fn test_global_keys() {
        for mode in [ViewMode::Timeline, ViewMode::Narrative, ViewMode::Files] {
            assert_eq!(map_key_to_intent(&key(KeyCode::Char('q')), mode), Some(Intent::Quit));
            assert_eq!(map_key_to_intent(&key(KeyCode::Char('n')), mode), Some(Intent::ShowNarrative));
            assert_eq!(map_key_to_intent(&key(KeyCode::Char('f')), mode), Some(Intent::ShowFiles));
            assert_eq!(map_key_to_intent(&key(KeyCode::Char('1')), mode), Some(Intent::ShowTimeline));
        }
    }

    #[test]
    fn test_slider_keys() {
        let mode = ViewMode::Timeline;
        assert_eq!(map_key_to_intent(&key(KeyCode::Right), mode), Some(Intent::ProgressBy(1.0)));
        assert_eq!(map_key_to_intent(&key(KeyCode::Char('h')), mode), Some(Intent::ProgressBy(-1.0)));
        assert_eq!(map_key_to_intent(&key(KeyCode::Char(']')), mode), Some(Intent::ProgressBy(10.0)));
        assert_eq!(map_key_to_intent(&key(KeyCode::Char('L')), mode), Some(Intent::ProgressBy(10.0)));
        assert_eq!(map_key_to_intent(&key(KeyCode::Home), mode), Some(Intent::ProgressTo(0.0)));
        assert_eq!(
            map_key_to_intent(&KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT), mode),
            Some(Intent::ProgressBy(-10.0))
        );
        assert_eq!(map_key_to_intent(&key(KeyCode::Esc), mode), Some(Intent::ClearBrush));
    }

    #[test]
    fn test_list_keys() {
        let mode = ViewMode::Narrative;
        assert_eq!(map_key_to_intent(&key(KeyCode::Char('j')), mode), Some(Intent::MoveDown));
        assert_eq!(map_key_to_intent(&key(KeyCode::Up), mode), Some(Intent::MoveUp));
        assert_eq!(map_key_to_intent(&key(KeyCode::Char('G')), mode), Some(Intent::MoveLast));
        assert_eq!(map_key_to_intent(&key(KeyCode::Esc), mode), Some(Intent::ShowTimeline));
        assert_eq!(map_key_to_intent(&key(KeyCode::Char('x')), mode), None);
    }
}
