use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::language::WordSource;
use crate::session::{Phase, Session};

/// What a keystroke asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Append(char),
    Erase,
    Commit,
}

/// Modifiers that turn a keystroke into a shortcut. Shift is not one of them.
const SHORTCUT_MODIFIERS: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SUPER)
    .union(KeyModifiers::HYPER)
    .union(KeyModifiers::META);

/// Classify a raw key event. Returns `None` for keys that do not type.
pub fn classify(key: &KeyEvent) -> Option<Intent> {
    if key.kind == KeyEventKind::Release || key.modifiers.intersects(SHORTCUT_MODIFIERS) {
        return None;
    }

    match key.code {
        KeyCode::Backspace => Some(Intent::Erase),
        KeyCode::Char(c) if c.is_whitespace() => Some(Intent::Commit),
        KeyCode::Char(c) if !c.is_control() => Some(Intent::Append(c)),
        _ => None,
    }
}

/// Route a key event into the session.
///
/// Nothing reaches a finished session. On an idle session the run is begun
/// before the intent is applied, so the first keystroke both starts the
/// trial and counts. Returns the intent that was applied.
pub fn route<W: WordSource>(session: &mut Session<W>, key: &KeyEvent) -> Option<Intent> {
    if session.phase() == Phase::Finished {
        return None;
    }

    let intent = classify(key)?;
    if session.phase() == Phase::Idle {
        session.begin_run();
    }
    apply(session, intent);
    Some(intent)
}

pub fn apply<W: WordSource>(session: &mut Session<W>, intent: Intent) {
    match intent {
        Intent::Append(c) => session.append_char(c),
        Intent::Erase => session.erase_char(),
        Intent::Commit => session.commit_word(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::CyclingWords;
    use assert_matches::assert_matches;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn session() -> Session<CyclingWords> {
        Session::new(CyclingWords::from_passage("the be to").unwrap(), 30).unwrap()
    }

    #[test]
    fn test_classify_char() {
        assert_eq!(classify(&key(KeyCode::Char('a'))), Some(Intent::Append('a')));
    }

    #[test]
    fn test_classify_shifted_char() {
        let shifted = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(classify(&shifted), Some(Intent::Append('A')));
    }

    #[test]
    fn test_classify_space_commits() {
        assert_eq!(classify(&key(KeyCode::Char(' '))), Some(Intent::Commit));
    }

    #[test]
    fn test_classify_backspace_erases() {
        assert_eq!(classify(&key(KeyCode::Backspace)), Some(Intent::Erase));
    }

    #[test]
    fn test_classify_ignores_shortcuts() {
        for modifiers in [
            KeyModifiers::CONTROL,
            KeyModifiers::ALT,
            KeyModifiers::SUPER,
            KeyModifiers::META,
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        ] {
            let event = KeyEvent::new(KeyCode::Char('r'), modifiers);
            assert_eq!(classify(&event), None, "{modifiers:?}");
        }
        let ctrl_backspace = KeyEvent::new(KeyCode::Backspace, KeyModifiers::CONTROL);
        assert_eq!(classify(&ctrl_backspace), None);
    }

    #[test]
    fn test_classify_ignores_release() {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(classify(&release), None);
    }

    #[test]
    fn test_classify_ignores_non_typing_keys() {
        for code in [KeyCode::Enter, KeyCode::Tab, KeyCode::Esc, KeyCode::Left, KeyCode::F(1)] {
            assert_eq!(classify(&key(code)), None, "{code:?}");
        }
    }

    #[test]
    fn test_route_first_keystroke_starts_trial() {
        let mut session = session();

        let applied = route(&mut session, &key(KeyCode::Char('t')));

        assert_matches!(applied, Some(Intent::Append('t')));
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.word_index(), 0);
        assert!(session.committed_words().is_empty());
        assert_eq!(session.current_buffer(), "t");
    }

    #[test]
    fn test_route_space_on_idle_starts_and_commits() {
        let mut session = session();

        route(&mut session, &key(KeyCode::Char(' ')));

        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.committed_words(), [""]);
    }

    #[test]
    fn test_route_backspace_on_idle_starts() {
        let mut session = session();

        route(&mut session, &key(KeyCode::Backspace));

        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.current_buffer(), "");
    }

    #[test]
    fn test_route_shortcut_does_not_start() {
        let mut session = session();

        let applied = route(
            &mut session,
            &KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );

        assert_eq!(applied, None);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_route_word_sequence() {
        let mut session = session();
        for c in "tje\u{8}\u{8}he be ".chars() {
            let code = if c == '\u{8}' {
                KeyCode::Backspace
            } else {
                KeyCode::Char(c)
            };
            route(&mut session, &key(code));
        }

        assert_eq!(session.committed_words(), ["the", "be"]);
        assert_eq!(session.word_index(), 2);
    }

    #[test]
    fn test_route_drops_everything_when_finished() {
        let mut session = session();
        route(&mut session, &key(KeyCode::Char('t')));
        session.finish();

        assert_eq!(route(&mut session, &key(KeyCode::Char('h'))), None);
        assert_eq!(route(&mut session, &key(KeyCode::Char(' '))), None);
        assert_eq!(route(&mut session, &key(KeyCode::Backspace)), None);
        assert_eq!(session.current_buffer(), "t");
        assert!(session.committed_words().is_empty());
    }
}
