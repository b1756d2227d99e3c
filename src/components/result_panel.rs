use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};
use tui_dispatch::DataResource;

use super::Component;
use crate::action::Action;
use crate::state::{AppState, CityWeather};

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";
pub const HEADING: &str = "Current temperature in";
pub const IDLE_PROMPT: &str = "Enter a city to get started";

/// Ticks per ellipsis frame (15 ms ticks → ~300 ms per dot)
const ELLIPSIS_FRAME_TICKS: u32 = 20;

/// The card showing exactly one of: prompt, loading ellipsis, error, result
pub struct ResultPanel;

pub struct ResultPanelProps<'a> {
    pub state: &'a AppState,
}

/// What the panel shows; one variant per panel state
enum PanelView<'a> {
    Idle,
    Loading,
    Error(&'a str),
    Ready(&'a CityWeather),
}

impl<'a> PanelView<'a> {
    fn from_state(state: &'a AppState) -> Self {
        match &state.weather {
            DataResource::Empty => PanelView::Idle,
            DataResource::Loading => PanelView::Loading,
            DataResource::Failed(error) => PanelView::Error(error),
            DataResource::Loaded(weather) => PanelView::Ready(weather),
        }
    }
}

/// `.`, `..`, `...` cycling with the tick counter
pub fn loading_ellipsis(tick_count: u32) -> &'static str {
    match (tick_count / ELLIPSIS_FRAME_TICKS) % 3 {
        0 => ".",
        1 => "..",
        _ => "...",
    }
}

impl Component<Action> for ResultPanel {
    type Props<'a> = ResultPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let state = props.state;
        match PanelView::from_state(state) {
            PanelView::Error(message) => render_error(frame, inner, message),
            PanelView::Idle => render_reading(
                frame,
                inner,
                &state.city_name,
                Span::styled(IDLE_PROMPT, Style::default().fg(Color::Gray)),
            ),
            PanelView::Loading => render_reading(
                frame,
                inner,
                &state.city_name,
                Span::styled(
                    loading_ellipsis(state.tick_count),
                    Style::default()
                        .fg(Color::Rgb(129, 140, 248))
                        .add_modifier(Modifier::BOLD),
                ),
            ),
            PanelView::Ready(weather) => render_reading(
                frame,
                inner,
                &weather.city_name,
                Span::styled(
                    weather.reading.display(),
                    Style::default()
                        .fg(Color::Rgb(129, 140, 248))
                        .add_modifier(Modifier::BOLD),
                ),
            ),
        }
    }
}

fn render_reading(frame: &mut Frame, area: Rect, city_name: &str, value: Span<'_>) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // heading
        Constraint::Length(1), // city
        Constraint::Length(1), // blank
        Constraint::Length(1), // value
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(HEADING, Style::default().fg(Color::Gray))).centered(),
        ),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(city_name.to_string(), Style::default().bold())).centered(),
        ),
        chunks[1],
    );
    frame.render_widget(Paragraph::new(Line::from(value).centered()), chunks[3]);
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // icon
        Constraint::Length(1), // message
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(ERROR_ICON).centered()),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                message.to_string(),
                Style::default().fg(Color::Rgb(220, 38, 38)),
            )])
            .centered(),
        ),
        chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{WeatherReading, CITY_NOT_FOUND};
    use tui_dispatch::testing::*;

    fn render_state(state: &AppState) -> String {
        let mut render = RenderHarness::new(50, 9);
        let mut panel = ResultPanel;
        render.render_to_string_plain(|frame| {
            panel.render(frame, frame.area(), ResultPanelProps { state });
        })
    }

    #[test]
    fn test_ellipsis_cycles() {
        assert_eq!(loading_ellipsis(0), ".");
        assert_eq!(loading_ellipsis(ELLIPSIS_FRAME_TICKS), "..");
        assert_eq!(loading_ellipsis(ELLIPSIS_FRAME_TICKS * 2), "...");
        assert_eq!(loading_ellipsis(ELLIPSIS_FRAME_TICKS * 3), ".");
    }

    #[test]
    fn test_render_idle_prompt() {
        let output = render_state(&AppState::new("San Francisco"));
        assert!(output.contains(HEADING));
        assert!(output.contains("San Francisco"));
        assert!(output.contains(IDLE_PROMPT));
    }

    #[test]
    fn test_render_result() {
        let state = AppState {
            weather: DataResource::Loaded(CityWeather {
                city_name: "Paris".into(),
                reading: WeatherReading {
                    temperature_celsius: 18.5,
                },
            }),
            ..Default::default()
        };
        let output = render_state(&state);
        assert!(output.contains("Paris"));
        assert!(output.contains("18.5°C"));
        assert!(!output.contains(IDLE_PROMPT));
    }

    #[test]
    fn test_render_error_hides_heading() {
        let state = AppState {
            weather: DataResource::Failed(CITY_NOT_FOUND.into()),
            ..Default::default()
        };
        let output = render_state(&state);
        assert!(output.contains(CITY_NOT_FOUND));
        assert!(!output.contains(HEADING));
    }

    #[test]
    fn test_render_loading_replaces_digits() {
        let state = AppState {
            weather: DataResource::Loading,
            tick_count: ELLIPSIS_FRAME_TICKS * 2,
            last_result: Some(CityWeather {
                city_name: "Paris".into(),
                reading: WeatherReading {
                    temperature_celsius: 18.5,
                },
            }),
            ..Default::default()
        };
        let output = render_state(&state);
        assert!(output.contains("..."));
        assert!(!output.contains("18.5°C"));
    }
}
