use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;

pub const TITLE: &str = "WeatherView";
pub const ATTRIBUTION: &str = "Powered by https://openweathermap.org";

#[derive(Default)]
pub struct Header;

pub struct HeaderProps;

impl Component<Action> for Header {
    type Props<'a> = HeaderProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, _props: Self::Props<'_>) {
        let lines = vec![
            Line::from(Span::styled(TITLE, Style::default().fg(Color::Cyan).bold())).centered(),
            Line::from(Span::styled(ATTRIBUTION, Style::default().fg(Color::DarkGray))).centered(),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }
}
