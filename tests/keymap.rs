mod common;

use common::{make_app, MockSource};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use lntop::config::KeysConfig;
use lntop::ui::input::{handle_key, Action, Keymap};
use lntop::ui::navigation::ViewName;
use lntop::ui::UiError;

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn keys(quit: &[&str], help: &[&str]) -> KeysConfig {
    KeysConfig {
        quit: quit.iter().map(|s| s.to_string()).collect(),
        help: help.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn test_default_bindings() {
    let keymap = Keymap::from_config(&KeysConfig::default()).expect("keymap");
    let cases = [
        (key(KeyCode::Char('c'), KeyModifiers::CONTROL), Action::Quit),
        (key(KeyCode::F(10), KeyModifiers::NONE), Action::Quit),
        (key(KeyCode::F(1), KeyModifiers::NONE), Action::Help),
        (key(KeyCode::Up, KeyModifiers::NONE), Action::CursorUp),
        (key(KeyCode::Down, KeyModifiers::NONE), Action::CursorDown),
        (key(KeyCode::Left, KeyModifiers::NONE), Action::CursorLeft),
        (key(KeyCode::Right, KeyModifiers::NONE), Action::CursorRight),
        (key(KeyCode::Enter, KeyModifiers::NONE), Action::Enter),
    ];
    for (event, action) in cases {
        assert_eq!(keymap.action(&event), Some(action), "{event:?}");
    }
    assert_eq!(keymap.action(&key(KeyCode::Char('c'), KeyModifiers::NONE)), None);
}

#[test]
fn test_configured_matches_builtin_defaults() {
    let configured = Keymap::from_config(&KeysConfig::default()).expect("keymap");
    let mut from_config = configured.describe();
    let mut builtin = Keymap::default().describe();
    from_config.sort();
    builtin.sort();
    assert_eq!(from_config, builtin);
}

#[test]
fn test_overrides_replace_quit_and_help() {
    let keymap = Keymap::from_config(&keys(&["q", "shift-x"], &["?"])).expect("keymap");
    assert_eq!(
        keymap.action(&key(KeyCode::Char('q'), KeyModifiers::NONE)),
        Some(Action::Quit)
    );
    assert_eq!(
        keymap.action(&key(KeyCode::Char('X'), KeyModifiers::SHIFT)),
        Some(Action::Quit)
    );
    assert_eq!(
        keymap.action(&key(KeyCode::Char('?'), KeyModifiers::SHIFT)),
        Some(Action::Help)
    );
    assert_eq!(keymap.action(&key(KeyCode::F(10), KeyModifiers::NONE)), None);
}

#[test]
fn test_release_events_ignored() {
    let keymap = Keymap::default();
    let release = KeyEvent::new_with_kind(
        KeyCode::Enter,
        KeyModifiers::NONE,
        KeyEventKind::Release,
    );
    assert_eq!(keymap.action(&release), None);
}

#[test]
fn test_duplicate_binding_fails() {
    let result = Keymap::from_config(&keys(&["ctrl-c"], &["ctrl-c"]));
    assert!(matches!(result, Err(UiError::BindingSetup { .. })));

    // Clashes with a fixed binding too.
    let result = Keymap::from_config(&keys(&["enter"], &["f1"]));
    assert!(matches!(result, Err(UiError::BindingSetup { .. })));
}

#[test]
fn test_unparsable_binding_fails() {
    let result = Keymap::from_config(&keys(&["ctrl-c", "super-duper"], &["f1"]));
    match result {
        Err(UiError::BindingSetup { message }) => assert!(message.contains("super-duper")),
        other => panic!("Expected BindingSetup, got {other:?}"),
    }
}

#[test]
fn test_no_quit_key_fails() {
    let result = Keymap::from_config(&keys(&[], &["f1"]));
    assert!(matches!(result, Err(UiError::BindingSetup { .. })));
}

#[tokio::test]
async fn test_handle_key_routes_to_app() {
    let source = MockSource::with_channels(2);
    let mut app = make_app(&source).await;

    handle_key(&mut app, key(KeyCode::Down, KeyModifiers::NONE));
    handle_key(&mut app, key(KeyCode::Enter, KeyModifiers::NONE));
    assert_eq!(app.views().active(), ViewName::Channel);
    assert_eq!(app.models().current_channel_index(), Some(1));

    handle_key(&mut app, key(KeyCode::F(1), KeyModifiers::NONE));
    assert_eq!(app.views().active(), ViewName::Help);

    handle_key(&mut app, key(KeyCode::Char('z'), KeyModifiers::NONE));
    assert!(!app.should_quit());
    handle_key(&mut app, key(KeyCode::F(10), KeyModifiers::NONE));
    assert!(app.should_quit());
}
