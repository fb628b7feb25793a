//! Key binding contexts and commands
//!
//! ```toml
//! [keys.search]
//! toggle_mode = ["ctrl+t"]
//!
//! [keys.weather]
//! back = ["b", "backspace", "esc"]
//! ```

use weatherview_core::{BindingContext, Keybindings};

use crate::state::Route;

/// Binding context, one per route
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    Search,
    Weather,
}

impl From<Route> for Screen {
    fn from(route: Route) -> Self {
        match route {
            Route::Search => Screen::Search,
            Route::Weather => Screen::Weather,
        }
    }
}

impl BindingContext for Screen {
    fn name(&self) -> &'static str {
        match self {
            Screen::Search => "search",
            Screen::Weather => "weather",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "search" => Some(Screen::Search),
            "weather" => Some(Screen::Weather),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Activate whatever has focus
    Activate,
    ToggleMode,
    NextFocus,
    PrevFocus,
    Back,
    Quit,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Activate => "activate",
            Command::ToggleMode => "toggle_mode",
            Command::NextFocus => "next_focus",
            Command::PrevFocus => "prev_focus",
            Command::Back => "back",
            Command::Quit => "quit",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "activate" => Some(Command::Activate),
            "toggle_mode" => Some(Command::ToggleMode),
            "next_focus" => Some(Command::NextFocus),
            "prev_focus" => Some(Command::PrevFocus),
            "back" => Some(Command::Back),
            "quit" => Some(Command::Quit),
            _ => None,
        }
    }
}

pub fn default_keybindings() -> Keybindings<Screen> {
    let mut keys = Keybindings::new();
    keys.bind_global(Command::Quit.name(), &["ctrl+c", "ctrl+q"]);
    keys.bind(Screen::Search, Command::Activate.name(), &["enter"])
        .bind(Screen::Search, Command::ToggleMode.name(), &["ctrl+t"])
        .bind(Screen::Search, Command::NextFocus.name(), &["tab"])
        .bind(Screen::Search, Command::PrevFocus.name(), &["shift+tab"]);
    keys.bind(Screen::Weather, Command::Back.name(), &["b", "backspace", "esc"]);
    keys
}

/// Defaults with `user` layered on top
pub fn keybindings_with(user: Keybindings<Screen>) -> Keybindings<Screen> {
    default_keybindings().merge(user)
}

/// Resolve a key press to a command in `screen`
pub fn command_for(
    keys: &Keybindings<Screen>,
    key: &crossterm::event::KeyEvent,
    screen: Screen,
) -> Option<Command> {
    keys.command_for(key, screen).and_then(Command::from_name)
}
