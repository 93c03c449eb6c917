// Raw-mode terminal reads
//
// Blocking poll/read translated into key tokens. Entering and restoring
// raw mode is handled by the runtime around the whole session.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

use crate::config::IDLE_POLL;
use crate::keys::KeyToken;

/// Wait for the next key token.
///
/// With a configured timeout, elapsing it yields `KeyToken::Timeout` (the
/// interpreter's empty token). Without one, reads still wake every
/// `IDLE_POLL` returning `None` so the caller can check for shutdown.
pub fn next_token(timeout: Option<Duration>) -> io::Result<Option<KeyToken>> {
    if !event::poll(timeout.unwrap_or(IDLE_POLL))? {
        return Ok(timeout.map(|_| KeyToken::Timeout));
    }

    match event::read()? {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) if kind == KeyEventKind::Press || kind == KeyEventKind::Repeat => {
            Ok(Some(match code {
                KeyCode::Char('c') | KeyCode::Char('C')
                    if modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    KeyToken::Interrupt
                }
                KeyCode::Char(c) => KeyToken::Char(c),
                _ => KeyToken::Other,
            }))
        }
        // Key releases, resizes, focus changes
        _ => Ok(None),
    }
}
