//! Detail display for a single weather report

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::{Conditions, ForecastEntry, ForecastMode, Outlook, Units, WeatherReport};

#[derive(Default)]
pub struct WeatherCard;

pub struct WeatherCardProps<'a> {
    pub report: &'a WeatherReport,
}

/// "few clouds" -> "Few clouds"
fn sentence_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn field<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

impl WeatherCard {
    fn render_current(frame: &mut Frame, area: Rect, now: &Conditions, units: Units, block: Block) {
        let lines = vec![
            Line::from(Span::styled(
                sentence_case(&now.description),
                Style::default().bold(),
            )),
            Line::default(),
            field("Temperature", units.format_temperature(now.temperature)),
            field("Feels like", units.format_temperature(now.feels_like)),
            field("Humidity", format!("{}%", now.humidity)),
            field("Wind", format!("{:.1} {}", now.wind_speed, units.speed_symbol())),
            field("Observed", now.at.format("%a %H:%M UTC").to_string()),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_forecast(
        frame: &mut Frame,
        area: Rect,
        entries: &[ForecastEntry],
        units: Units,
        block: Block,
    ) {
        let header = Row::new(["Time", "Temp", "Rain", "Conditions"])
            .style(Style::default().fg(Color::DarkGray));
        let rows = entries.iter().map(|entry| {
            Row::new([
                entry.conditions.at.format("%a %H:%M").to_string(),
                units.format_temperature(entry.conditions.temperature),
                format!("{:.0}%", entry.precipitation_chance * 100.0),
                sentence_case(&entry.conditions.description),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Length(8),
                Constraint::Length(5),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(block);
        frame.render_widget(table, area);
    }
}

impl Component<Action> for WeatherCard {
    type Props<'a> = WeatherCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let report = props.report;
        let mode = match report.outlook {
            Outlook::Current(_) => ForecastMode::Current,
            Outlook::Forecast(_) => ForecastMode::Forecast,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} · {} ", report.display_location(), mode.label()));

        match &report.outlook {
            Outlook::Current(now) => Self::render_current(frame, area, now, report.units, block),
            Outlook::Forecast(entries) => {
                Self::render_forecast(frame, area, entries, report.units, block)
            }
        }
    }
}
