use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::KeysConfig;
use crate::ui::app::App;
use crate::ui::UiError;

/// What a bound key asks the dashboard to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    Enter,
    Help,
}

impl Action {
    const ORDER: [Action; 7] = [
        Action::Quit,
        Action::Help,
        Action::Enter,
        Action::CursorUp,
        Action::CursorDown,
        Action::CursorLeft,
        Action::CursorRight,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Action::Quit => "quit",
            Action::CursorUp => "previous channel",
            Action::CursorDown => "next channel",
            Action::CursorLeft => "scroll columns left",
            Action::CursorRight => "scroll columns right",
            Action::Enter => "open or close channel detail",
            Action::Help => "toggle this help",
        }
    }
}

type Binding = (KeyCode, KeyModifiers);

const FIXED: [(Action, &str); 5] = [
    (Action::CursorUp, "up"),
    (Action::CursorDown, "down"),
    (Action::CursorLeft, "left"),
    (Action::CursorRight, "right"),
    (Action::Enter, "enter"),
];

/// Key-to-action table. Arrows and enter are fixed; quit and help keys come
/// from the `[keys]` config section.
#[derive(Debug, Clone)]
pub struct Keymap {
    actions: HashMap<Binding, Action>,
    labels: Vec<(Action, String)>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut keymap = Self::empty();
        let defaults = [
            (Action::Quit, "ctrl-c", (KeyCode::Char('c'), KeyModifiers::CONTROL)),
            (Action::Quit, "f10", (KeyCode::F(10), KeyModifiers::NONE)),
            (Action::Help, "f1", (KeyCode::F(1), KeyModifiers::NONE)),
            (Action::CursorUp, "up", (KeyCode::Up, KeyModifiers::NONE)),
            (Action::CursorDown, "down", (KeyCode::Down, KeyModifiers::NONE)),
            (Action::CursorLeft, "left", (KeyCode::Left, KeyModifiers::NONE)),
            (Action::CursorRight, "right", (KeyCode::Right, KeyModifiers::NONE)),
            (Action::Enter, "enter", (KeyCode::Enter, KeyModifiers::NONE)),
        ];
        for (action, label, binding) in defaults {
            keymap.actions.insert(binding, action);
            keymap.labels.push((action, label.to_string()));
        }
        keymap
    }
}

impl Keymap {
    fn empty() -> Self {
        Self {
            actions: HashMap::new(),
            labels: Vec::new(),
        }
    }

    pub fn from_config(keys: &KeysConfig) -> Result<Self, UiError> {
        let mut keymap = Self::empty();
        let configured = keys
            .quit
            .iter()
            .map(|spec| (Action::Quit, spec.as_str()))
            .chain(keys.help.iter().map(|spec| (Action::Help, spec.as_str())));
        for (action, spec) in FIXED.into_iter().chain(configured) {
            keymap.bind(action, spec)?;
        }
        if !keymap.labels.iter().any(|(action, _)| *action == Action::Quit) {
            return Err(UiError::BindingSetup {
                message: "no quit key configured".to_string(),
            });
        }
        Ok(keymap)
    }

    fn bind(&mut self, action: Action, spec: &str) -> Result<(), UiError> {
        let binding = parse_key(spec)?;
        if let Some(existing) = self.actions.insert(binding, action) {
            return Err(UiError::BindingSetup {
                message: format!("key '{spec}' is already bound to {existing:?}"),
            });
        }
        self.labels.push((action, spec.trim().to_ascii_lowercase()));
        Ok(())
    }

    pub fn action(&self, key: &KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        self.actions.get(&normalize(key.code, key.modifiers)).copied()
    }

    /// Bound keys per action, e.g. `("ctrl-c, f10", "quit")`.
    pub fn describe(&self) -> Vec<(String, &'static str)> {
        Action::ORDER
            .iter()
            .filter_map(|action| {
                let keys: Vec<&str> = self
                    .labels
                    .iter()
                    .filter(|(bound, _)| bound == action)
                    .map(|(_, label)| label.as_str())
                    .collect();
                (!keys.is_empty()).then(|| (keys.join(", "), action.description()))
            })
            .collect()
    }
}

/// Route a key press through the app's keymap.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if let Some(action) = app.keymap().action(&key) {
        app.on_action(action);
    }
}

/// Parse specs like `q`, `f10`, `ctrl-c` or `alt-enter`.
fn parse_key(spec: &str) -> Result<Binding, UiError> {
    let invalid = || UiError::BindingSetup {
        message: format!("invalid key '{spec}'"),
    };

    let lowered = spec.trim().to_ascii_lowercase();
    // "-" and "ctrl--" name the minus key itself.
    let parts: Vec<&str> = if lowered == "-" {
        vec!["-"]
    } else if let Some(prefix) = lowered.strip_suffix("--") {
        prefix.split('-').chain(std::iter::once("-")).collect()
    } else {
        lowered.split('-').collect()
    };
    let Some((name, modifiers)) = parts.split_last() else {
        return Err(invalid());
    };

    let mut mods = KeyModifiers::NONE;
    for modifier in modifiers {
        mods |= match *modifier {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" | "meta" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            _ => return Err(invalid()),
        };
    }

    let code = match *name {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                (Some('f'), Some(_)) => match other[1..].parse::<u8>() {
                    Ok(n @ 1..=12) => KeyCode::F(n),
                    _ => return Err(invalid()),
                },
                _ => return Err(invalid()),
            }
        }
    };

    // Specs are lowercased, so an uppercase char is only reachable via shift.
    let code = match code {
        KeyCode::Char(ch) if mods.contains(KeyModifiers::SHIFT) => {
            KeyCode::Char(ch.to_ascii_uppercase())
        }
        other => other,
    };
    Ok(normalize(code, mods))
}

/// Shift is folded into the character for printable keys.
fn normalize(code: KeyCode, modifiers: KeyModifiers) -> Binding {
    let mut modifiers =
        modifiers.intersection(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT);
    if matches!(code, KeyCode::Char(_)) {
        modifiers.remove(KeyModifiers::SHIFT);
    }
    (code, modifiers)
}
