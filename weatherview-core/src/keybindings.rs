//! Context-aware key bindings
//!
//! Bindings map command names to key strings such as `"q"`, `"esc"` or
//! `"ctrl+t"`, grouped by a [`BindingContext`] (one per screen) plus a
//! global group consulted as a fallback. Key strings are parsed once when a
//! binding is added; unparseable strings are logged and skipped.
//!
//! In a config file the bindings look like:
//!
//! ```toml
//! [global]
//! quit = ["ctrl+c", "ctrl+q"]
//!
//! [search]
//! toggle_mode = ["ctrl+t"]
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::hash::Hash;

/// A screen or mode that owns its own set of bindings.
pub trait BindingContext: Clone + Copy + Eq + Hash {
    /// The context name as used in config files
    fn name(&self) -> &'static str;

    /// Parse a context from its name
    fn from_name(name: &str) -> Option<Self>;
}

#[derive(Debug, Clone, PartialEq)]
struct Binding {
    raw: String,
    code: KeyCode,
    modifiers: KeyModifiers,
}

impl Binding {
    fn parse(raw: &str) -> Option<Self> {
        let key = parse_key_string(raw)?;
        Some(Self {
            raw: raw.trim().to_lowercase(),
            code: key.code,
            modifiers: key.modifiers,
        })
    }

    fn matches(&self, key: &KeyEvent) -> bool {
        let codes_match = match (self.code, key.code) {
            (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        };
        // Terminals report shift on uppercase chars inconsistently
        let modifiers = match key.code {
            KeyCode::Char(_) => key.modifiers.difference(KeyModifiers::SHIFT),
            _ => key.modifiers,
        };
        codes_match && self.modifiers == modifiers
    }
}

type CommandMap = HashMap<String, Vec<Binding>>;

/// Key bindings grouped by context
#[derive(Debug, Clone)]
pub struct Keybindings<C: BindingContext> {
    global: CommandMap,
    contexts: HashMap<C, CommandMap>,
}

impl<C: BindingContext> Default for Keybindings<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: BindingContext> Keybindings<C> {
    /// Create an empty set of bindings
    pub fn new() -> Self {
        Self {
            global: HashMap::new(),
            contexts: HashMap::new(),
        }
    }

    /// Bind `command` to `keys` in every context
    pub fn bind_global(&mut self, command: &str, keys: &[&str]) -> &mut Self {
        self.global.insert(command.to_string(), parse_all(command, keys));
        self
    }

    /// Bind `command` to `keys` in one context, replacing earlier keys
    pub fn bind(&mut self, context: C, command: &str, keys: &[&str]) -> &mut Self {
        self.contexts
            .entry(context)
            .or_default()
            .insert(command.to_string(), parse_all(command, keys));
        self
    }

    /// Command bound to `key` in `context`, falling back to global bindings
    pub fn command_for(&self, key: &KeyEvent, context: C) -> Option<&str> {
        self.contexts
            .get(&context)
            .and_then(|commands| find_command(commands, key))
            .or_else(|| find_command(&self.global, key))
    }

    /// First key string bound to `command`, for help text
    pub fn first_key(&self, command: &str, context: C) -> Option<&str> {
        self.contexts
            .get(&context)
            .and_then(|commands| commands.get(command))
            .or_else(|| self.global.get(command))
            .and_then(|bindings| bindings.first())
            .map(|binding| binding.raw.as_str())
    }

    /// Overlay `user` onto `self`: commands present in `user` replace ours
    pub fn merge(mut self, user: Self) -> Self {
        self.global.extend(user.global);
        for (context, commands) in user.contexts {
            self.contexts.entry(context).or_default().extend(commands);
        }
        self
    }
}

fn parse_all(command: &str, keys: &[&str]) -> Vec<Binding> {
    keys.iter()
        .filter_map(|raw| {
            let binding = Binding::parse(raw);
            if binding.is_none() {
                tracing::warn!(command, key = %raw, "Ignoring unparseable key binding");
            }
            binding
        })
        .collect()
}

fn find_command<'a>(commands: &'a CommandMap, key: &KeyEvent) -> Option<&'a str> {
    commands
        .iter()
        .find(|(_, bindings)| bindings.iter().any(|binding| binding.matches(key)))
        .map(|(command, _)| command.as_str())
}

impl<'de, C: BindingContext> Deserialize<'de> for Keybindings<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: HashMap<String, HashMap<String, Vec<String>>> =
            HashMap::deserialize(deserializer)?;

        let mut bindings = Keybindings::new();
        for (group, commands) in raw {
            let context = if group == "global" {
                None
            } else if let Some(context) = C::from_name(&group) {
                Some(context)
            } else {
                tracing::warn!(context = %group, "Ignoring bindings for unknown context");
                continue;
            };

            for (command, keys) in commands {
                let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
                match context {
                    Some(context) => bindings.bind(context, &command, &keys),
                    None => bindings.bind_global(&command, &keys),
                };
            }
        }
        Ok(bindings)
    }
}

/// Parse a key string like "q", "esc", "ctrl+t", "shift+tab" into a KeyEvent
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim().to_lowercase();
    if key_str.is_empty() {
        return None;
    }

    // "+" on its own is a key, not a separator
    let (modifier_part, key_part) = match key_str.rsplit_once('+') {
        Some((mods, "")) => (mods.strip_suffix('+').unwrap_or(mods), "+"),
        Some((mods, key)) => (mods, key),
        None => ("", key_str.as_str()),
    };

    let mut modifiers = KeyModifiers::empty();
    for part in modifier_part.split('+').filter(|p| !p.is_empty()) {
        match part.trim() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let code = match key_part.trim() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
        "tab" => KeyCode::Tab,
        "backtab" => {
            modifiers |= KeyModifiers::SHIFT;
            KeyCode::BackTab
        }
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') => {
            let n: u8 = f[1..].parse().ok()?;
            if !(1..=12).contains(&n) {
                return None;
            }
            KeyCode::F(n)
        }
        c => {
            let mut chars = c.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(ch)
        }
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// Format a key string for display ("ctrl+t" -> "^T", "esc" -> "Esc")
pub fn format_key_for_display(key_str: &str) -> String {
    let Some(key) = parse_key_string(key_str) else {
        return key_str.to_string();
    };

    let mut out = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        out.push('^');
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        out.push_str("Alt+");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) && key.code != KeyCode::BackTab {
        out.push_str("Shift+");
    }

    match key.code {
        KeyCode::Char(' ') => out.push_str("Space"),
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            out.extend(c.to_uppercase())
        }
        KeyCode::Char(c) => out.push(c),
        KeyCode::BackTab => out.push_str("Shift+Tab"),
        KeyCode::F(n) => out.push_str(&format!("F{}", n)),
        KeyCode::Backspace => out.push_str("Bksp"),
        other => out.push_str(&format!("{:?}", other)),
    }
    out
}
