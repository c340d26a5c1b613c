use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};

use playdeck::backend::StandardBackends;
use playdeck::config::{Settings, ViewsSettings};
use playdeck::controller::{Controller, ControllerOptions};
use playdeck::library::scan;
use playdeck::track::{Track, load_playlist_file};
use playdeck::views::{HttpViewRecorder, NoopViewRecorder, ViewRecorder};

pub mod event_loop;
mod settings;

const VIEW_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = settings::load_settings();

    let target = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let tracks = load_tracks(&target, &settings)?;
    if tracks.is_empty() {
        println!("playdeck: nothing to play in {}", target.display());
        return Ok(());
    }
    info!("{} tracks from {}", tracks.len(), target.display());

    let mut controller = Controller::new(
        Box::new(StandardBackends::new()),
        view_recorder(&settings.views),
        ControllerOptions::from(&settings),
    );
    controller.load_playlist(tracks, 0);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &mut controller);

    controller.close();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

/// A `.toml` argument is a playlist file; anything else is scanned as a directory.
fn load_tracks(
    target: &Path,
    settings: &Settings,
) -> Result<Vec<Track>, Box<dyn std::error::Error>> {
    let is_playlist = target
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
    if is_playlist {
        Ok(load_playlist_file(target)?)
    } else {
        Ok(scan(target, &settings.library))
    }
}

fn view_recorder(views: &ViewsSettings) -> Box<dyn ViewRecorder> {
    let base_url = match views.base_url.as_deref() {
        Some(url) if views.enabled && !url.is_empty() => url,
        _ => return Box::new(NoopViewRecorder),
    };
    match HttpViewRecorder::new(base_url, views.csrf_token.clone(), VIEW_REQUEST_TIMEOUT) {
        Ok(recorder) => Box::new(recorder),
        Err(e) => {
            warn!("view counting disabled: {e}");
            Box::new(NoopViewRecorder)
        }
    }
}
