//! Top-level UI: mounts the view for the current route and routes events
//! to it.
//!
//! Views are recreated on every route change, so a search view always
//! starts from fresh search state and a result view re-checks its payload.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};
use weatherview_core::{Dispatcher, EventKind, EventOutcome, Keybindings, StateObserver};

use crate::action::Action;
use crate::components::{
    Component, Header, HeaderProps, HelpBar, HelpBarProps, ResultView, ResultViewProps,
    SearchView, SearchViewProps,
};
use crate::keymap::Screen;
use crate::presenter::ResultPresenter;
use crate::search::SearchCoordinator;
use crate::state::{AppState, Route};

enum View {
    Search(SearchView<Dispatcher<Action>>),
    Weather(ResultView<Dispatcher<Action>>),
}

impl View {
    fn route(&self) -> Route {
        match self {
            View::Search(_) => Route::Search,
            View::Weather(_) => Route::Weather,
        }
    }
}

pub struct WeatherUi {
    dispatcher: Dispatcher<Action>,
    observer: StateObserver<AppState>,
    keys: Keybindings<Screen>,
    start_in_forecast: bool,
    view: Option<View>,
    header: Header,
    help: HelpBar,
}

impl WeatherUi {
    pub fn new(
        dispatcher: Dispatcher<Action>,
        observer: StateObserver<AppState>,
        keys: Keybindings<Screen>,
    ) -> Self {
        Self {
            dispatcher,
            observer,
            keys,
            start_in_forecast: false,
            view: None,
            header: Header,
            help: HelpBar,
        }
    }

    /// New search views start in forecast mode
    pub fn with_forecast_default(mut self, forecast: bool) -> Self {
        self.start_in_forecast = forecast;
        self
    }

    pub fn mounted_route(&self) -> Option<Route> {
        self.view.as_ref().map(View::route)
    }

    pub fn search_view(&self) -> Option<&SearchView<Dispatcher<Action>>> {
        match &self.view {
            Some(View::Search(view)) => Some(view),
            _ => None,
        }
    }

    pub fn result_view(&self) -> Option<&ResultView<Dispatcher<Action>>> {
        match &self.view {
            Some(View::Weather(view)) => Some(view),
            _ => None,
        }
    }

    /// Fill the search field and submit it as if Enter was pressed
    pub fn submit_search(&mut self, text: &str, state: &AppState) {
        self.sync(state);
        if let Some(View::Search(view)) = &mut self.view {
            let coordinator = view.coordinator_mut();
            coordinator.update_search_text(text);
            coordinator.press_enter();
        }
    }

    /// Mount the view for `state.route` if needed and apply pending
    /// notifications. Returns whether anything visible changed.
    pub fn sync(&mut self, state: &AppState) -> bool {
        let mut changed = false;
        if self.mounted_route() != Some(state.route) {
            self.mount(state.route);
            changed = true;
        }
        match &mut self.view {
            Some(View::Search(view)) => changed |= view.coordinator_mut().sync(),
            Some(View::Weather(view)) => changed |= view.presenter_mut().sync(),
            None => {}
        }
        changed
    }

    fn mount(&mut self, route: Route) {
        tracing::debug!(%route, "Mounting view");
        // Drop the old view first so its subscriptions go with it
        self.view = None;
        self.view = Some(match route {
            Route::Search => {
                let coordinator = SearchCoordinator::new(self.dispatcher.clone(), &self.observer)
                    .with_forecast_mode(self.start_in_forecast);
                View::Search(SearchView::new(coordinator))
            }
            Route::Weather => {
                let presenter = ResultPresenter::new(self.dispatcher.clone(), &self.observer);
                View::Weather(ResultView::mount(presenter))
            }
        });
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        self.sync(state);

        let [header_area, body_area, help_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.header.render(frame, header_area, HeaderProps);

        match &mut self.view {
            Some(View::Search(view)) => {
                let props = SearchViewProps {
                    keys: &self.keys,
                    error: state.error.active(),
                };
                view.render(frame, body_area, props);
            }
            Some(View::Weather(view)) => {
                view.render(frame, body_area, ResultViewProps { keys: &self.keys });
            }
            None => {}
        }

        let props = HelpBarProps {
            keys: &self.keys,
            screen: Screen::from(state.route),
        };
        self.help.render(frame, help_area, props);
    }

    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        let synced = self.sync(state);

        if event.is_quit() {
            return EventOutcome::action(Action::Quit);
        }
        if let EventKind::Resize(..) = event {
            return EventOutcome::needs_render();
        }

        let actions: Vec<Action> = match &mut self.view {
            Some(View::Search(view)) => {
                let props = SearchViewProps {
                    keys: &self.keys,
                    error: state.error.active(),
                };
                view.handle_event(event, props).into_iter().collect()
            }
            Some(View::Weather(view)) => view
                .handle_event(event, ResultViewProps { keys: &self.keys })
                .into_iter()
                .collect(),
            None => Vec::new(),
        };

        // Typing and focus moves only touch view-local state
        let outcome = EventOutcome::from_actions(actions);
        if synced || event.key_press().is_some() {
            outcome.with_render()
        } else {
            outcome
        }
    }
}
