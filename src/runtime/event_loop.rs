use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use playdeck::controller::{Controller, Notice};
use playdeck::keys::{InputFocus, KeyAction};

use crate::ui;

/// State the terminal host keeps next to the controller.
pub struct EventLoopState {
    /// Highlighted row in the playlist sidebar.
    pub cursor: usize,
    /// Playlist index the cursor last jumped to.
    pub following: Option<usize>,
    /// Most recent notice, shown until the next one arrives.
    pub notice: Option<Notice>,
}

impl EventLoopState {
    pub fn new(controller: &Controller) -> Self {
        Self {
            cursor: controller.playlist().index().unwrap_or(0),
            following: controller.playlist().index(),
            notice: None,
        }
    }
}

/// Main terminal loop: ticks the controller, draws, and routes keys.
/// Returns `Ok(())` once the player is closed or the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    controller: &mut Controller,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState::new(controller);
    let mut last_tick = Instant::now();

    loop {
        let now = Instant::now();
        controller.advance(now.duration_since(last_tick));
        last_tick = now;

        // Move the cursor along when playback changes tracks.
        let index = controller.playlist().index();
        if index != state.following {
            state.following = index;
            state.cursor = index.unwrap_or(0);
        }
        if let Some(notice) = controller.take_notices().pop() {
            state.notice = Some(notice);
        }
        if !controller.state().visible {
            break;
        }

        terminal.draw(|f| ui::draw(f, controller, &state))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, controller, &mut state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Returns true when the host should quit.
fn handle_key_event(
    key: KeyEvent,
    controller: &mut Controller,
    state: &mut EventLoopState,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }
    let last = controller.playlist().len().saturating_sub(1);
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') => state.cursor = (state.cursor + 1).min(last),
        KeyCode::Char('k') => state.cursor = state.cursor.saturating_sub(1),
        KeyCode::Enter => {
            controller.play_index(state.cursor);
        }
        _ => {
            if let Some(action) = KeyAction::from_key_event(&key) {
                controller.handle_key(action, InputFocus::None);
            }
        }
    }
    false
}
