use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use crate::controller::{ControllerOptions, RepeatMode};
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

fn write_config(body: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, body).unwrap();
    let path = path.to_str().unwrap().to_string();
    (dir, path)
}

#[test]
fn resolve_config_path_prefers_playdeck_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("PLAYDECK_CONFIG_PATH", "/tmp/playdeck-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/playdeck-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("playdeck")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("playdeck")
            .join("config.toml")
    );
}

#[test]
fn defaults_are_valid_and_match_controller_defaults() {
    let s = Settings::default();
    assert!(s.validate().is_ok());
    assert_eq!(ControllerOptions::from(&s), ControllerOptions::default());
}

#[test]
fn settings_load_from_config_file_and_parse_repeat_aliases() {
    let _lock = env_lock();
    let (_dir, path) = write_config(
        r#"
[playback]
autoplay = false
shuffle = true
repeat = "repeat-one"
volume = 0.4

[timing]
repeat_one_delay_ms = 250
ready_timeout_ms = 3000

[controls]
volume_step_percent = 5

[views]
enabled = true
base_url = "https://music.example.org"
csrf_token = "abc"

[library]
extensions = ["mp3"]
recursive = false
include_hidden = true
follow_links = false
max_depth = 2
"#,
    );
    let _g1 = EnvGuard::set("PLAYDECK_CONFIG_PATH", &path);
    let _g2 = EnvGuard::remove("PLAYDECK__PLAYBACK__VOLUME");

    let s = Settings::load().unwrap();
    assert!(s.validate().is_ok());
    assert!(!s.playback.autoplay);
    assert!(s.playback.shuffle);
    assert_eq!(s.playback.repeat, RepeatModeSetting::One);
    assert_eq!(s.timing.repeat_one_delay_ms, 250);
    assert_eq!(s.timing.progress_interval_ms, 1000);
    assert_eq!(s.views.base_url.as_deref(), Some("https://music.example.org"));
    assert_eq!(s.views.csrf_token.as_deref(), Some("abc"));
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.max_depth, Some(2));

    let opts = ControllerOptions::from(&s);
    assert_eq!(opts.repeat, RepeatMode::One);
    assert!(!opts.autoplay);
    assert!((opts.volume - 0.4).abs() < 1e-6);
    assert!((opts.volume_step - 0.05).abs() < 1e-6);
    assert_eq!(opts.timing.repeat_one_delay, Duration::from_millis(250));
    assert_eq!(opts.timing.ready_timeout, Duration::from_secs(3));
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();
    let (_dir, path) = write_config(
        r#"
[playback]
repeat = "all"
"#,
    );
    let _g1 = EnvGuard::set("PLAYDECK_CONFIG_PATH", &path);
    let _g2 = EnvGuard::set("PLAYDECK__PLAYBACK__REPEAT", "playlist");
    let _g3 = EnvGuard::set("PLAYDECK__TIMING__READY_TIMEOUT_MS", "500");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.repeat, RepeatModeSetting::All);
    assert_eq!(s.timing.ready_timeout_ms, 500);
}

#[test]
fn validate_rejects_unusable_values() {
    let mut s = Settings::default();
    s.playback.volume = 1.5;
    assert!(s.validate().unwrap_err().contains("playback.volume"));

    let mut s = Settings::default();
    s.timing.ready_poll_interval_ms = 0;
    assert!(s.validate().unwrap_err().contains("ready_poll_interval_ms"));

    let mut s = Settings::default();
    s.controls.volume_step_percent = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.views.enabled = true;
    assert!(s.validate().unwrap_err().contains("views.base_url"));
}
