use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    widgets::{Block, Borders, Clear, Padding, Row, Table},
    Frame,
};

/// Show a table of keyboard shortcuts over `body_area`.
pub fn render(frame: &mut Frame<'_>, body_area: Rect) {
    let popup_vert = Layout::vertical([Constraint::Length(16)]).flex(Flex::Center);
    let popup_horiz = Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

    let [popup_area] = popup_vert.areas(body_area);
    let [popup_area] = popup_horiz.areas(popup_area);

    let popup = Table::new(
        [
            Row::new(vec!["?", "Display this help"]),
            Row::new(vec!["F1 / esc", "Go home"]),
            Row::new(vec!["F2 / l", "Log into an existing account"]),
            Row::new(vec!["F3 / c", "Create a new account"]),
            Row::new(vec!["q (home)", "Quit"]),
            Row::new(vec!["ctrl-c", "Quit from anywhere"]),
            Row::new(vec!["q / esc (help)", "Close help"]),
            Row::new(vec!["tab (form)", "Next field"]),
            Row::new(vec!["shift-tab (form)", "Previous field"]),
            Row::new(vec!["enter (form)", "Submit"]),
            Row::new(vec!["ctrl-o (form)", "Follow the link under the form"]),
        ],
        [Constraint::Max(18), Constraint::Fill(1)],
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Keyboard Shortcuts")
            .padding(Padding::horizontal(1))
            .border_style(Style::new().blue()),
    );

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}
