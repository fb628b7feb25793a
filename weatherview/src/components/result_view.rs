//! The result screen: back action plus the weather card

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use weatherview_core::{format_key_for_display, EventKind, Keybindings};

use super::{Component, WeatherCard, WeatherCardProps};
use crate::action::Action;
use crate::keymap::{command_for, Command, Screen};
use crate::presenter::ResultPresenter;
use crate::services::Navigator;

pub struct ResultViewProps<'a> {
    pub keys: &'a Keybindings<Screen>,
}

pub struct ResultView<N> {
    presenter: ResultPresenter<N>,
    card: WeatherCard,
}

impl<N: Navigator> ResultView<N> {
    /// Mount the view; an empty result redirects straight away
    pub fn mount(mut presenter: ResultPresenter<N>) -> Self {
        presenter.activate();
        Self {
            presenter,
            card: WeatherCard,
        }
    }

    pub fn presenter(&self) -> &ResultPresenter<N> {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut ResultPresenter<N> {
        &mut self.presenter
    }
}

impl<N: Navigator> Component<Action> for ResultView<N> {
    type Props<'a> = ResultViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let command = event
            .key_press()
            .and_then(|key| command_for(props.keys, key, Screen::Weather));
        match command {
            Some(Command::Quit) => Some(Action::Quit),
            Some(Command::Back) => {
                self.presenter.back_to_search();
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        // Nothing to show while the redirect is pending
        let Some(report) = self.presenter.report() else {
            return;
        };

        let [back_area, card_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(3)]).areas(area);

        let hint = props
            .keys
            .first_key(Command::Back.name(), Screen::Weather)
            .map(|key| format!(" ({})", format_key_for_display(key)))
            .unwrap_or_default();
        let back = Line::from(vec![
            Span::styled("← Back to Search", Style::default().fg(Color::Cyan)),
            Span::styled(hint, Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(back), back_area);

        self.card.render(frame, card_area, WeatherCardProps { report });
    }
}
