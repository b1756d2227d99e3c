pub mod query_form;
pub mod result_panel;
pub mod title_header;
pub mod weather_widget;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use query_form::{QueryForm, QueryFormProps};
pub use result_panel::{ERROR_ICON, ResultPanel, ResultPanelProps};
pub use title_header::{TitleHeader, TitleHeaderProps};
pub use weather_widget::{WeatherWidget, WeatherWidgetProps};
