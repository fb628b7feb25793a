//! The search screen: mode toggle, search field, search button
//!
//! Focus cycles input -> toggle -> button. Enter in the field goes through
//! `press_enter`; activating the button goes through `click_search`.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use weatherview_core::{EventKind, Keybindings};

use super::Component;
use crate::action::Action;
use crate::keymap::{command_for, Command, Screen};
use crate::search::SearchCoordinator;
use crate::services::{ErrorReporter, WeatherFetcher};

pub const PLACEHOLDER: &str = "Enter a City or Zip";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Input,
    Toggle,
    Button,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Input => Focus::Toggle,
            Focus::Toggle => Focus::Button,
            Focus::Button => Focus::Input,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Input => Focus::Button,
            Focus::Toggle => Focus::Input,
            Focus::Button => Focus::Toggle,
        }
    }
}

pub struct SearchViewProps<'a> {
    pub keys: &'a Keybindings<Screen>,
    pub error: Option<&'a str>,
}

pub struct SearchView<H> {
    coordinator: SearchCoordinator<H>,
    focus: Focus,
}

impl<H> SearchView<H>
where
    H: WeatherFetcher + ErrorReporter,
{
    pub fn new(coordinator: SearchCoordinator<H>) -> Self {
        Self {
            coordinator,
            focus: Focus::default(),
        }
    }

    pub fn coordinator(&self) -> &SearchCoordinator<H> {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut SearchCoordinator<H> {
        &mut self.coordinator
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    fn activate(&mut self) {
        match self.focus {
            Focus::Toggle => self.coordinator.toggle_forecast_mode(),
            Focus::Input | Focus::Button if self.coordinator.state().is_submitting => {
                tracing::debug!("Search already in flight, ignoring submit");
            }
            Focus::Input => {
                self.coordinator.press_enter();
            }
            Focus::Button => {
                self.coordinator.click_search();
            }
        }
    }

    fn edit(&mut self, edit: impl FnOnce(&mut String)) {
        let mut text = self.coordinator.state().raw_text.clone();
        edit(&mut text);
        self.coordinator.update_search_text(text);
    }

    fn focus_style(&self, focus: Focus) -> Style {
        if self.focus == focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }
}

impl<H> Component<Action> for SearchView<H>
where
    H: WeatherFetcher + ErrorReporter,
{
    type Props<'a> = SearchViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let Some(key) = event.key_press() else {
            return None::<Action>;
        };

        if let Some(command) = command_for(props.keys, key, Screen::Search) {
            match command {
                Command::Quit => return Some(Action::Quit),
                Command::Activate => self.activate(),
                Command::ToggleMode => self.coordinator.toggle_forecast_mode(),
                Command::NextFocus => self.focus = self.focus.next(),
                Command::PrevFocus => self.focus = self.focus.prev(),
                Command::Back => {}
            }
            return None;
        }

        let typing = !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match (key.code, self.focus) {
            (KeyCode::Char(' '), Focus::Toggle | Focus::Button) => self.activate(),
            (KeyCode::Char(c), Focus::Input) if typing => self.edit(|text| text.push(c)),
            (KeyCode::Backspace, Focus::Input) => self.edit(|text| {
                text.pop();
            }),
            (KeyCode::Char('u'), Focus::Input) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit(String::clear)
            }
            _ => {}
        }
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = self.coordinator.state();
        let [toggle_area, input_area, error_area, button_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let marker = if state.is_forecast_mode { "[x]" } else { "[ ]" };
        let toggle = Line::from(vec![
            Span::styled(format!("{} ", marker), self.focus_style(Focus::Toggle)),
            Span::raw(state.mode().label()),
        ]);
        frame.render_widget(Paragraph::new(toggle), toggle_area);

        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.focus_style(Focus::Input));
        let input = if state.raw_text.is_empty() {
            Paragraph::new(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)))
        } else {
            Paragraph::new(state.raw_text.as_str())
        };
        frame.render_widget(input.block(input_block), input_area);
        if self.focus == Focus::Input {
            let offset = u16::try_from(state.raw_text.chars().count()).unwrap_or(u16::MAX);
            let x = input_area
                .x
                .saturating_add(1)
                .saturating_add(offset)
                .min(input_area.right().saturating_sub(2));
            frame.set_cursor_position((x, input_area.y + 1));
        }

        if let Some(error) = props.error {
            frame.render_widget(
                Paragraph::new(Span::styled(error, Style::default().fg(Color::Red))),
                error_area,
            );
        }

        let label = if state.is_submitting {
            "[ Searching... ]"
        } else {
            "[ Search ]"
        };
        let button_style = if self.focus == Focus::Button {
            Style::default().fg(Color::Black).bg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::Cyan)
        };
        frame.render_widget(Paragraph::new(Span::styled(label, button_style)), button_area);
    }
}
