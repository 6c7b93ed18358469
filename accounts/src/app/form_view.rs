use super::effect::SubmissionId;
use accounts_core::{Field, Page};
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

/// Height of one field: a bordered input plus a line for its error.
const FIELD_HEIGHT: u16 = 4;

/// A form page on screen: the page's view model plus the text inputs and
/// focus that only matter to the terminal.
#[derive(Debug)]
pub struct FormView<P> {
    /// The view model
    page: P,

    /// Which field we're editing, as an index into the form's fields
    active: usize,

    /// One input per field, in the same order as the form's fields
    inputs: Vec<Input>,

    /// The submission this form is waiting on, if any
    pending: Option<SubmissionId>,
}

/// What the user asked a form to do.
#[derive(Debug, PartialEq, Eq)]
pub enum FormEvent {
    /// Nothing beyond editing
    Edited,

    /// Submit the form
    Submit,
}

impl<P: Page + Default> Default for FormView<P> {
    fn default() -> Self {
        let page = P::default();
        let inputs = page
            .form()
            .fields()
            .iter()
            .map(|_| Input::default())
            .collect();

        Self {
            page,
            active: 0,
            inputs,
            pending: None,
        }
    }
}

impl<P: Page> FormView<P> {
    /// The view model behind this form.
    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// The field with focus
    pub fn active_field(&self) -> Field {
        self.page.form().fields()[self.active]
    }

    /// Handle a key press that wasn't handled globally.
    pub fn handle_event(&mut self, key: KeyEvent) -> FormEvent {
        let len = self.inputs.len();

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.active = (self.active + 1) % len;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.active = (self.active + len - 1) % len;
            }
            KeyCode::Enter => return FormEvent::Submit,
            _ => {
                let field = self.active_field();
                let input = &mut self.inputs[self.active];

                if input.handle_event(&Event::Key(key)).is_some() {
                    self.page.form_mut().set_field(field, input.value());
                }
            }
        }

        FormEvent::Edited
    }

    /// Remember that this form is waiting on `id`.
    pub fn wait_for(&mut self, id: SubmissionId) {
        self.pending = Some(id);
    }

    /// If this form is waiting on `id`, stop waiting and reset the form.
    /// Returns whether it was.
    pub fn finish(&mut self, id: SubmissionId) -> bool {
        if self.pending != Some(id) {
            return false;
        }

        self.pending = None;
        self.page.form_mut().finish_submit();
        self.sync_inputs();

        true
    }

    /// Bring the inputs back in line with the form, e.g. after it was reset
    /// by a finished submission.
    pub fn sync_inputs(&mut self) {
        let form = self.page.form();

        for (input, field) in self.inputs.iter_mut().zip(form.fields()) {
            let value = form.value(*field);

            if input.value() != value {
                *input = Input::new(value.to_string());
            }
        }
    }

    /// Draw the form in the middle of `body_area`.
    #[expect(clippy::cast_possible_truncation)]
    pub fn render(&self, frame: &mut Frame<'_>, body_area: Rect) {
        let form = self.page.form();
        let fields = form.fields();

        let height = 2 + 3 + FIELD_HEIGHT * fields.len() as u16 + 2;
        let popup_vert = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
        let popup_horiz = Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

        let [popup_area] = popup_vert.areas(body_area);
        let [popup_area] = popup_horiz.areas(popup_area);
        frame.render_widget(Clear, popup_area);

        let [title_area, blurb_area, fields_area, link_area, submit_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(FIELD_HEIGHT * fields.len() as u16),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(popup_area);

        frame.render_widget(
            Paragraph::new(P::TITLE).bold().centered(),
            title_area,
        );
        frame.render_widget(
            Paragraph::new(P::BLURB).centered().wrap(Wrap { trim: true }),
            blurb_area,
        );

        let field_areas =
            Layout::vertical(fields.iter().map(|_| Constraint::Length(FIELD_HEIGHT))).split(fields_area);

        let width = popup_area.width.saturating_sub(2 + 1); // -2 for the border, -1 for the cursor

        for (idx, (field, area)) in fields.iter().zip(field_areas.iter()).enumerate() {
            let [input_area, error_area] =
                Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(*area);

            let input = &self.inputs[idx];
            let is_active = idx == self.active;
            let input_scroll = input.visual_scroll(width as usize);

            let border_style = if is_active {
                Style::default().fg(Color::Blue)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let text = if input.value().is_empty() && !is_active {
                Line::from(field.placeholder()).fg(Color::DarkGray)
            } else if field.is_secret() {
                Line::from("*".repeat(input.value().chars().count()))
            } else {
                Line::from(input.value())
            };

            let widget = Paragraph::new(text)
                .scroll((0, input_scroll as u16))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(field.label())
                        .border_style(border_style),
                );

            frame.render_widget(widget, input_area);

            if let Some(message) = form.error(*field) {
                frame.render_widget(
                    Paragraph::new(message).fg(Color::Red),
                    error_area,
                );
            }

            if is_active {
                frame.set_cursor_position((
                    input_area.x
                        + (input.visual_cursor().max(input_scroll) - input_scroll) as u16 // current end of text
                        + 1, // just past the end of the text
                    input_area.y + 1, // +1 row for the border/title
                ));
            }
        }

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw(P::LINK.prompt),
                Span::raw(" "),
                Span::styled(
                    P::LINK.title,
                    Style::default()
                        .add_modifier(Modifier::UNDERLINED)
                        .fg(Color::Yellow),
                ),
            ]))
            .bold(),
            link_area,
        );

        let submit = if form.is_submitting() {
            Paragraph::new("Submitting…").fg(Color::DarkGray)
        } else {
            Paragraph::new("[ Enter ] Submit").fg(Color::Blue)
        };

        frame.render_widget(submit.centered(), submit_area);
    }
}
