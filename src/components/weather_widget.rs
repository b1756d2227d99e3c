use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    Component, QueryForm, QueryFormProps, ResultPanel, ResultPanelProps, TitleHeader,
    TitleHeaderProps,
};
use crate::action::Action;
use crate::state::AppState;

/// Props for WeatherWidget - read-only view of state
pub struct WeatherWidgetProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole page: title, form, result panel, key hints
#[derive(Default)]
pub struct WeatherWidget {
    form: QueryForm,
}

impl WeatherWidget {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for WeatherWidget {
    type Props<'a> = WeatherWidgetProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let form_props = QueryFormProps {
            query: &props.state.query,
            is_loading: props.state.is_loading(),
            is_focused: props.is_focused,
            on_change: Action::QueryChange,
            on_submit: Action::QuerySubmit,
        };
        self.form
            .handle_event(event, form_props)
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherWidgetProps<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Max(6),    // Title
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Form
            Constraint::Length(1), // Spacer
            Constraint::Min(6),    // Result panel
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let mut title = TitleHeader;
        title.render(
            frame,
            chunks[0],
            TitleHeaderProps {
                is_animating: state.loading_anim_active(),
                tick_count: state.tick_count,
            },
        );

        self.form.render(
            frame,
            chunks[2],
            QueryFormProps {
                query: &state.query,
                is_loading: state.is_loading(),
                is_focused: props.is_focused,
                on_change: Action::QueryChange,
                on_submit: Action::QuerySubmit,
            },
        );

        let mut panel = ResultPanel;
        panel.render(frame, chunks[4], ResultPanelProps { state });

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[5],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "get weather"),
                    StatusBarHint::new("esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
