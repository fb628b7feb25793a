//! Render tests using RenderHarness

use chrono::{TimeZone, Utc};
use weatherview::app::WeatherUi;
use weatherview::components::{
    Component, HelpBar, HelpBarProps, SearchView, SearchViewProps, WeatherCard, WeatherCardProps,
    ATTRIBUTION, PLACEHOLDER, TITLE,
};
use weatherview::keymap::{default_keybindings, Screen};
use weatherview::search::{SearchCoordinator, INVALID_SEARCH_MESSAGE};
use weatherview::state::{Conditions, ForecastEntry, Outlook, Route, Units, WeatherReport};
use weatherview::{reducer, Action, AppState};
use weatherview_core::testing::*;
use weatherview_core::EffectStore;

fn conditions(hour: u32, description: &str, temperature: f64) -> Conditions {
    Conditions {
        at: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
        description: description.into(),
        temperature,
        feels_like: temperature - 1.5,
        humidity: 55,
        wind_speed: 3.4,
    }
}

fn current_report() -> WeatherReport {
    WeatherReport {
        location: "Chicago".into(),
        country: Some("US".into()),
        units: Units::Metric,
        outlook: Outlook::Current(conditions(14, "few clouds", 12.3)),
    }
}

#[test]
fn test_render_current_card() {
    let mut render = RenderHarness::new(60, 12);
    let report = current_report();

    let output = render.render_to_string_plain(|frame| {
        WeatherCard.render(frame, frame.area(), WeatherCardProps { report: &report });
    });

    assert!(output.contains("Chicago, US"), "Should show location");
    assert!(output.contains("Current Weather"), "Should show mode label");
    assert!(output.contains("Few clouds"), "Should show description");
    assert!(output.contains("12.3°C"), "Should show temperature");
    assert!(output.contains("55%"), "Should show humidity");
    assert!(output.contains("Fri 14:00 UTC"), "Should show observation time");
}

#[test]
fn test_render_forecast_card() {
    let mut render = RenderHarness::new(60, 14);
    let entries = (0..8)
        .map(|i| ForecastEntry {
            conditions: conditions(i * 3, "light rain", 5.0 + f64::from(i)),
            precipitation_chance: 0.25,
        })
        .collect();
    let report = WeatherReport {
        location: "Seattle".into(),
        country: None,
        units: Units::Imperial,
        outlook: Outlook::Forecast(entries),
    };

    let output = render.render_to_string_plain(|frame| {
        WeatherCard.render(frame, frame.area(), WeatherCardProps { report: &report });
    });

    assert!(output.contains("Seattle · 24 Hour Forecast"));
    assert!(output.contains("Fri 00:00"), "Should show first slot");
    assert!(output.contains("Fri 21:00"), "Should show last slot");
    assert!(output.contains("12.0°F"));
    assert!(output.contains("25%"));
}

#[test]
fn test_render_search_view_placeholder_and_error() {
    let mut render = RenderHarness::new(50, 8);
    let harness = TestHarness::<AppState, Action>::default();
    let mut store = EffectStore::new(AppState::default(), reducer);
    let coordinator = SearchCoordinator::new(harness.dispatcher(), &store.observe());
    let mut view = SearchView::new(coordinator);
    let keys = default_keybindings();

    let output = render.render_to_string_plain(|frame| {
        let props = SearchViewProps {
            keys: &keys,
            error: Some(INVALID_SEARCH_MESSAGE),
        };
        view.render(frame, frame.area(), props);
    });

    assert!(output.contains("[ ] Current Weather"));
    assert!(output.contains(PLACEHOLDER));
    assert!(output.contains(INVALID_SEARCH_MESSAGE));
    assert!(output.contains("[ Search ]"));
}

#[test]
fn test_render_search_view_while_submitting() {
    let mut render = RenderHarness::new(50, 8);
    let harness = TestHarness::<AppState, Action>::default();
    let mut store = EffectStore::new(AppState::default(), reducer);
    let coordinator =
        SearchCoordinator::new(harness.dispatcher(), &store.observe()).with_forecast_mode(true);
    let mut view = SearchView::new(coordinator);
    let keys = default_keybindings();

    view.coordinator_mut().update_search_text("Chicago");
    view.coordinator_mut().press_enter();

    let output = render.render_to_string_plain(|frame| {
        let props = SearchViewProps {
            keys: &keys,
            error: None,
        };
        view.render(frame, frame.area(), props);
    });

    assert!(output.contains("[x] 24 Hour Forecast"));
    assert!(output.contains("Chicago"));
    assert!(!output.contains(PLACEHOLDER));
    assert!(output.contains("Searching..."));
}

#[test]
fn test_help_bar_uses_bound_keys() {
    let mut render = RenderHarness::new(60, 1);
    let keys = default_keybindings();

    let output = render.render_to_string_plain(|frame| {
        let props = HelpBarProps {
            keys: &keys,
            screen: Screen::Weather,
        };
        HelpBar.render(frame, frame.area(), props);
    });

    assert!(output.contains("b back"));
    assert!(output.contains("^C quit"));
}

#[test]
fn test_render_app_routes() {
    let mut render = RenderHarness::new(70, 20);
    let harness = TestHarness::<AppState, Action>::default();
    let mut store = EffectStore::new(AppState::default(), reducer);
    let mut ui = WeatherUi::new(harness.dispatcher(), store.observe(), default_keybindings());

    let output = render.render_to_string_plain(|frame| {
        ui.render(frame, frame.area(), store.state());
    });
    assert!(output.contains(TITLE));
    assert!(output.contains(ATTRIBUTION));
    assert!(output.contains(PLACEHOLDER));

    let seq = match store
        .dispatch(Action::WeatherFetch(weatherview::state::WeatherQuery::current(
            weatherview::state::SearchTerm::City("Chicago".into()),
        )))
        .effects
        .as_slice()
    {
        [weatherview::Effect::FetchWeather { seq, .. }] => *seq,
        other => panic!("expected fetch effect, got {:?}", other),
    };
    store.dispatch(Action::WeatherDidLoad {
        seq,
        report: current_report(),
    });
    assert_eq!(store.state().route, Route::Weather);

    let output = render.render_to_string_plain(|frame| {
        ui.render(frame, frame.area(), store.state());
    });
    assert!(output.contains("← Back to Search (b)"));
    assert!(output.contains("Chicago, US"));
}
