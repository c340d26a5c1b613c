//! UI rendering for the terminal host.
//!
//! Draws the now-playing panel, the playlist sidebar and a controls footer
//! with `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use playdeck::controller::{Controller, Level, PlayerState, RepeatMode, Status};

use crate::runtime::event_loop::EventLoopState;

const CONTROLS: &[(&str, &str)] = &[
    ("space", "play/pause"),
    ("←/→", "prev/next"),
    ("↑/↓", "volume"),
    ("m", "mute"),
    ("s", "shuffle"),
    ("r", "repeat"),
    ("f", "fullscreen"),
    ("j/k", "up/down"),
    ("enter", "play selected"),
    ("esc", "close"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn status_text(status: Status) -> &'static str {
    match status {
        Status::Idle => "Stopped",
        Status::Loading => "Loading…",
        Status::Playing => "Playing",
        Status::Paused => "Paused",
        Status::Ended => "Ended",
    }
}

fn modes_text(state: &PlayerState) -> String {
    let repeat = match state.repeat {
        RepeatMode::Off => "Repeat: OFF",
        RepeatMode::One => "Repeat: ONE",
        RepeatMode::All => "Repeat: ALL",
    };
    let shuffle = if state.shuffle { "Shuffle: ON" } else { "Shuffle: OFF" };
    let volume = if state.volume == 0.0 {
        "Volume: muted".to_string()
    } else {
        format!("Volume: {:.0}%", state.volume * 100.0)
    };
    [volume, shuffle.to_string(), repeat.to_string()].join(" • ")
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the whole screen.
pub fn draw(frame: &mut Frame, controller: &Controller, host: &EventLoopState) {
    let state = controller.state();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(frame.area());

    // Fullscreen hides the sidebar.
    let (player_area, sidebar_area) = if state.fullscreen {
        (rows[0], None)
    } else {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[0]);
        (cols[0], Some(cols[1]))
    };

    draw_now_playing(frame, controller, host, player_area);
    if let Some(area) = sidebar_area {
        draw_playlist(frame, controller, host, area);
    }

    let footer = Paragraph::new(controls_text())
        .block(bordered(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, rows[1]);
}

fn draw_now_playing(frame: &mut Frame, controller: &Controller, host: &EventLoopState, area: Rect) {
    let state = controller.state();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" playdeck ")
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let mut lines = Vec::new();
    match controller.current_track() {
        Some(track) => {
            lines.push(Line::from(track.title.clone()).bold());
            lines.push(Line::from(format!("Source: {}", track.kind().label())));
        }
        None => lines.push(Line::from("Nothing loaded").italic()),
    }
    lines.push(Line::from(status_text(state.status)));
    frame.render_widget(Paragraph::new(lines), parts[0]);

    let progress = controller.progress();
    let (elapsed, total) = progress.labels();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(progress.fraction())
        .label(format!("{elapsed} / {total}"));
    frame.render_widget(gauge, parts[2]);

    frame.render_widget(Paragraph::new(modes_text(state)), parts[3]);

    if let Some(notice) = &host.notice {
        let style = match notice.level {
            Level::Info => Style::default().fg(Color::Green),
            Level::Error => Style::default().fg(Color::Red),
        };
        let par = Paragraph::new(notice.message.as_str())
            .style(style)
            .wrap(Wrap { trim: true });
        frame.render_widget(par, parts[4]);
    }
}

fn draw_playlist(frame: &mut Frame, controller: &Controller, host: &EventLoopState, area: Rect) {
    let playing = controller.playlist().index();
    let items: Vec<ListItem> = controller
        .playlist()
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let marker = if Some(i) == playing { "♪ " } else { "  " };
            let text = match &track.duration_label {
                Some(d) => format!("{marker}{} [{d}]", track.title),
                None => format!("{marker}{}", track.title),
            };
            ListItem::new(text)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" playlist "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    if !controller.playlist().is_empty() {
        list_state.select(Some(host.cursor));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}
