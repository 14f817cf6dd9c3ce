/// Input collaborator: turns raw terminal events into per-frame movement
/// intents and one-shot commands.
///
/// Instead of acting on each key event individually, we keep a `key_frame`
/// map that records the frame number of the last press/repeat event for
/// every key.  A key counts as held while that record is fresh (within
/// `HOLD_WINDOW` frames).
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence.
///
/// Mouse buttons stand in for touch: pressing or dragging on the left half
/// of the terminal steers left, on the right half steers right.

use std::collections::HashMap;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::entities::Intents;

/// Frames a press stays live without a repeat.  At 60 FPS this is ≈133 ms,
/// longer than the OS key-repeat interval (≥ 15 Hz), so a held key is
/// refreshed before it expires.
pub const HOLD_WINDOW: u64 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Only meaningful once the session is over.
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct InputTracker {
    /// Maps each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    pointer: Option<Side>,
    /// Terminal width, used to split pointer input into halves.
    columns: u16,
}

/// Letters are tracked case-insensitively so Shift doesn't drop a held key.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

impl InputTracker {
    pub fn new(columns: u16) -> Self {
        Self {
            key_frame: HashMap::new(),
            pointer: None,
            columns,
        }
    }

    /// Record one event seen during `frame`.  Returns a command for keys
    /// that act once rather than while held.
    pub fn handle(&mut self, event: &Event, frame: u64) -> Option<Command> {
        match event {
            Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) => self.handle_key(normalize(*code), *kind, *modifiers, frame),
            Event::Mouse(MouseEvent { kind, column, .. }) => {
                self.handle_pointer(*kind, *column);
                None
            }
            Event::Resize(columns, _) => {
                self.columns = *columns;
                None
            }
            _ => None,
        }
    }

    fn handle_key(
        &mut self,
        code: KeyCode,
        kind: KeyEventKind,
        modifiers: KeyModifiers,
        frame: u64,
    ) -> Option<Command> {
        match kind {
            KeyEventKind::Press => {
                self.key_frame.insert(code, frame);
                match code {
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        Some(Command::Quit)
                    }
                    KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
                    KeyCode::Char('r') => Some(Command::Restart),
                    _ => None,
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, frame);
                None
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
                None
            }
        }
    }

    fn handle_pointer(&mut self, kind: MouseEventKind, column: u16) {
        match kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                self.pointer = Some(if column < self.columns / 2 {
                    Side::Left
                } else {
                    Side::Right
                });
            }
            MouseEventKind::Up(_) => self.pointer = None,
            _ => {}
        }
    }

    /// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
    fn is_held(&self, key: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Movement intents as of `frame`.
    pub fn intents(&self, frame: u64) -> Intents {
        let left = self.is_held(KeyCode::Left, frame)
            || self.is_held(KeyCode::Char('a'), frame)
            || self.pointer == Some(Side::Left);
        let right = self.is_held(KeyCode::Right, frame)
            || self.is_held(KeyCode::Char('d'), frame)
            || self.pointer == Some(Side::Right);
        Intents { left, right }
    }

    /// Forget everything held, e.g. across a restart.
    pub fn clear(&mut self) {
        self.key_frame.clear();
        self.pointer = None;
    }
}
