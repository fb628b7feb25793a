pub mod header;
pub mod help_bar;
pub mod result_view;
pub mod search_view;
pub mod weather_card;

// Re-export core Component trait
pub use weatherview_core::Component;

pub use header::{Header, HeaderProps, ATTRIBUTION, TITLE};
pub use help_bar::{HelpBar, HelpBarProps};
pub use result_view::{ResultView, ResultViewProps};
pub use search_view::{Focus, SearchView, SearchViewProps, PLACEHOLDER};
pub use weather_card::{WeatherCard, WeatherCardProps};
