use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;

pub const PLACEHOLDER: &str = "Enter city name...";
pub const SUBMIT_LABEL: &str = "Get Weather";
pub const SUBMIT_LABEL_LOADING: &str = "Loading...";

/// Width of the submit button, wide enough for either label plus padding
const BUTTON_WIDTH: u16 = 15;

/// City input plus submit button. Enter submits; submission is never blocked.
pub struct QueryForm {
    input: TextInput,
    /// Whether the cursor has been moved past the pre-filled query
    cursor_synced: bool,
}

pub struct QueryFormProps<'a> {
    pub query: &'a str,
    pub is_loading: bool,
    pub is_focused: bool,
    // Action constructors
    pub on_change: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

impl Default for QueryForm {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            cursor_synced: false,
        }
    }
}

impl QueryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// The input starts with its cursor at 0. Park it after the starting city
    /// once so typing appends instead of prepending.
    fn sync_cursor(&mut self, query: &str) {
        if self.cursor_synced {
            return;
        }
        self.cursor_synced = true;

        let end = EventKind::Key(KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        let props = TextInputProps {
            value: query,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: TextInputStyle::default(),
            on_change: Action::QueryChange,
            on_submit: Action::QuerySubmit,
            on_cursor_move: None,
        };
        let _ = self.input.handle_event(&end, props);
    }
}

impl Component<Action> for QueryForm {
    type Props<'a> = QueryFormProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        self.sync_cursor(props.query);

        match key.code {
            KeyCode::Esc => return vec![Action::Quit],
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::Quit];
            }
            KeyCode::Enter => return vec![(props.on_submit)(props.query.to_string())],
            _ => {}
        }

        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::new(1, 0, 1, 0),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::horizontal([
            Constraint::Min(10),              // Input
            Constraint::Length(1),            // Gap
            Constraint::Length(BUTTON_WIDTH), // Button
        ])
        .split(area);

        self.sync_cursor(props.query);
        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::all(1),
                    bg: Some(Color::Rgb(50, 50, 60)),
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, chunks[0], input_props);

        let (label, bg) = if props.is_loading {
            (SUBMIT_LABEL_LOADING, Color::Rgb(110, 110, 120))
        } else {
            (SUBMIT_LABEL, Color::Rgb(79, 70, 229))
        };
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(chunks[2]);
        let button_style = Style::default().bg(bg);
        for row in rows.iter() {
            frame.render_widget(Paragraph::new("").style(button_style), *row);
        }
        frame.render_widget(
            Paragraph::new(Line::from(label).centered()).style(
                button_style
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            rows[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    fn props(query: &str) -> QueryFormProps<'_> {
        QueryFormProps {
            query,
            is_loading: false,
            is_focused: true,
            on_change: Action::QueryChange,
            on_submit: Action::QuerySubmit,
        }
    }

    fn press(code: KeyCode) -> EventKind {
        EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_enter_submits_current_text() {
        let mut form = QueryForm::new();
        let actions: Vec<_> = form
            .handle_event(&press(KeyCode::Enter), props("Paris"))
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::QuerySubmit("Paris".into()));
    }

    #[test]
    fn test_escape_quits() {
        let mut form = QueryForm::new();
        let actions: Vec<_> = form
            .handle_event(&press(KeyCode::Esc), props("Paris"))
            .into_iter()
            .collect();
        actions.assert_first(Action::Quit);
    }

    #[test]
    fn test_unfocused_ignores() {
        let mut form = QueryForm::new();
        let actions: Vec<_> = form
            .handle_event(
                &press(KeyCode::Enter),
                QueryFormProps {
                    is_focused: false,
                    ..props("Paris")
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_typing_appends_to_prefilled_city() {
        let mut form = QueryForm::new();
        let actions: Vec<_> = form
            .handle_event(&press(KeyCode::Char('e')), props("Rom"))
            .into_iter()
            .collect();
        actions.assert_first(Action::QueryChange("Rome".into()));
    }

    #[test]
    fn test_backspace_removes_last_prefilled_char() {
        let mut form = QueryForm::new();
        let actions: Vec<_> = form
            .handle_event(&press(KeyCode::Backspace), props("Paris"))
            .into_iter()
            .collect();
        actions.assert_first(Action::QueryChange("Pari".into()));
    }

    #[test]
    fn test_render_button_label_follows_loading() {
        let mut render = RenderHarness::new(50, 3);
        let mut form = QueryForm::new();

        let idle = render.render_to_string_plain(|frame| {
            form.render(frame, frame.area(), props("Paris"));
        });
        assert!(idle.contains(SUBMIT_LABEL));

        let loading = render.render_to_string_plain(|frame| {
            form.render(
                frame,
                frame.area(),
                QueryFormProps {
                    is_loading: true,
                    ..props("Paris")
                },
            );
        });
        assert!(loading.contains(SUBMIT_LABEL_LOADING));
    }
}
