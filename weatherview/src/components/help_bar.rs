use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use weatherview_core::{format_key_for_display, Keybindings};

use super::Component;
use crate::action::Action;
use crate::keymap::{Command, Screen};

#[derive(Default)]
pub struct HelpBar;

pub struct HelpBarProps<'a> {
    pub keys: &'a Keybindings<Screen>,
    pub screen: Screen,
}

impl HelpBar {
    fn entries(screen: Screen) -> &'static [(Command, &'static str)] {
        match screen {
            Screen::Search => &[
                (Command::Activate, "search"),
                (Command::ToggleMode, "mode"),
                (Command::NextFocus, "focus"),
                (Command::Quit, "quit"),
            ],
            Screen::Weather => &[(Command::Back, "back"), (Command::Quit, "quit")],
        }
    }
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let mut spans = Vec::new();
        for (command, label) in Self::entries(props.screen) {
            // Commands a user unbound are left out
            let Some(key) = props.keys.first_key(command.name(), props.screen) else {
                continue;
            };
            spans.push(Span::styled(
                format!(" {}", format_key_for_display(key)),
                Style::default().fg(Color::Cyan).bold(),
            ));
            spans.push(Span::styled(
                format!(" {} ", label),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
