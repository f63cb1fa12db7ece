use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Quit,
    CyclePreset,
    Faster,
    Slower,
    TogglePause,
    Reseed,
    Resize(u16, u16),
}

/// Drain pending events without blocking the frame.
pub(crate) fn poll_actions(max_frame_time: Duration) -> anyhow::Result<Vec<Action>> {
    let mut out = Vec::new();

    let timeout = std::cmp::min(Duration::from_millis(1), max_frame_time);
    while event::poll(timeout)? {
        match event::read()? {
            Event::Key(k) => {
                if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat {
                    if let Some(action) = map_key(k.code, k.modifiers) {
                        out.push(action);
                    }
                    if out.len() >= 32 {
                        break;
                    }
                }
            }
            Event::Resize(w, h) => out.push(Action::Resize(w, h)),
            _ => {}
        }
    }
    Ok(out)
}

pub(crate) fn map_key(code: KeyCode, mods: KeyModifiers) -> Option<Action> {
    if mods.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c')) {
        return Some(Action::Quit);
    }

    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::CyclePreset),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::Faster),
        KeyCode::Char('-') => Some(Action::Slower),
        KeyCode::Char(' ') => Some(Action::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Reseed),
        _ => None,
    }
}
