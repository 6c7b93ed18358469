/// Things that can happen to this app
mod action;
pub use action::Action;

/// Side effects the app asks the shell to run
mod effect;
pub use effect::{Effect, SubmissionId};

/// A form page on screen
mod form_view;
use form_view::{FormEvent, FormView};

/// The keyboard shortcuts popover
mod help;

use accounts_core::{
    api::{self, login, register, Client, Response},
    form::Rejected,
    CreateAccountPage, FormValues, LoginPage, Page, Route,
};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Paragraph, Tabs, Wrap},
    Frame,
};
use std::process::ExitCode;

/// The "functional core" of the app.
pub struct App {
    /// Used to build effects that talk to the server
    client: Client,

    /// Status to display (visible at the bottom of the screen)
    status_line: Option<String>,

    /// The page we're on
    screen: Screen,

    /// Whether the keyboard shortcuts are showing
    showing_help: bool,

    /// Id for the next submission we send
    next_submission: u64,

    /// Set once we want to quit
    exit: Option<ExitCode>,
}

impl App {
    /// Create a new instance of the app
    pub fn new(client: Client, route: Route) -> Self {
        Self {
            client,
            status_line: None,
            screen: Screen::for_route(route),
            showing_help: false,
            next_submission: 0,
            exit: None,
        }
    }

    /// The page we're currently on
    pub fn route(&self) -> Route {
        self.screen.route()
    }

    /// Render the app's UI to the screen
    pub fn render(&self, frame: &mut Frame) {
        let vertical = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ]);
        let [header_area, body_area, footer_area, status_area] = vertical.areas(frame.area());

        // HEADER
        let selected = Route::NAV
            .iter()
            .position(|route| *route == self.route())
            .unwrap_or_default();

        let header = Tabs::new(Route::NAV.iter().map(|route| route.nav_label()))
            .select(selected)
            .style(Style::new().bg(Color::Black).fg(Color::White))
            .highlight_style(Style::new().bold().fg(Color::Yellow));

        frame.render_widget(header, header_area);

        // BODY
        match &self.screen {
            Screen::Home => frame.render_widget(
                Paragraph::new(vec![
                    Line::from("Welcome!").bold(),
                    Line::from(""),
                    Line::from("Press l to log in, c to create an account, or ? for help."),
                ])
                .centered()
                .wrap(Wrap { trim: true }),
                body_area,
            ),
            Screen::CreateAccount(view) => view.render(frame, body_area),
            Screen::Login(view) => view.render(frame, body_area),
        }

        if self.showing_help {
            help::render(frame, body_area);
        }

        // FOOTER
        frame.render_widget(
            Paragraph::new("F1 home · F2 login · F3 create account · ctrl-c quit")
                .fg(Color::DarkGray)
                .centered(),
            footer_area,
        );

        let status = Paragraph::new(match &self.status_line {
            Some(line) => line.as_str(),
            None => "All good!",
        });

        frame.render_widget(status, status_area);
    }

    /// Handle an `Action`, updating the app's state and producing some side effect(s)
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Key(key) => self.handle_key(key),
            Action::Problem(problem) => {
                self.status_line = Some(problem);

                vec![]
            }
            Action::Registered(id, result) => {
                if let Screen::CreateAccount(view) = &mut self.screen {
                    Self::finish(&mut self.status_line, view, id, &result);
                } else {
                    tracing::debug!(?id, "got a registration response after leaving the page");
                }

                vec![]
            }
            Action::LoggedIn(id, result) => {
                if let Screen::Login(view) = &mut self.screen {
                    Self::finish(&mut self.status_line, view, id, &result);
                } else {
                    tracing::debug!(?id, "got a login response after leaving the page");
                }

                vec![]
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press {
            return vec![];
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.exit = Some(ExitCode::SUCCESS);
            return vec![];
        }

        if self.showing_help {
            if matches!(key.code, KeyCode::Char('q' | '?') | KeyCode::Esc) {
                self.showing_help = false;
            }
            return vec![];
        }

        match key.code {
            KeyCode::F(1) => {
                self.navigate(Route::Home);
                return vec![];
            }
            KeyCode::F(2) => {
                self.navigate(Route::Login);
                return vec![];
            }
            KeyCode::F(3) => {
                self.navigate(Route::CreateAccount);
                return vec![];
            }
            _ => {}
        }

        match &mut self.screen {
            Screen::Home => {
                match key.code {
                    KeyCode::Char('q') => self.exit = Some(ExitCode::SUCCESS),
                    KeyCode::Char('l') => self.navigate(Route::Login),
                    KeyCode::Char('c') => self.navigate(Route::CreateAccount),
                    KeyCode::Char('?') => self.showing_help = true,
                    _ => self.status_line = Some(format!("Unknown key {:?}", key.code)),
                }

                vec![]
            }
            Screen::CreateAccount(view) => match Self::form_key(view, key) {
                FormKey::Submit => Self::begin(view, &mut self.next_submission, &mut self.status_line)
                    .map(|(id, values)| {
                        vec![Effect::Register(id, self.client.clone(), register::Req::from(&values))]
                    })
                    .unwrap_or_default(),
                FormKey::Go(route) => {
                    self.navigate(route);
                    vec![]
                }
                FormKey::Handled => vec![],
            },
            Screen::Login(view) => match Self::form_key(view, key) {
                FormKey::Submit => Self::begin(view, &mut self.next_submission, &mut self.status_line)
                    .map(|(id, values)| {
                        vec![Effect::LogIn(id, self.client.clone(), login::Req::from(&values))]
                    })
                    .unwrap_or_default(),
                FormKey::Go(route) => {
                    self.navigate(route);
                    vec![]
                }
                FormKey::Handled => vec![],
            },
        }
    }

    /// Keys that mean the same thing on every form page.
    fn form_key<P: Page>(view: &mut FormView<P>, key: KeyEvent) -> FormKey {
        if key.code == KeyCode::Esc {
            return FormKey::Go(Route::Home);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('o') {
            return FormKey::Go(P::LINK.to);
        }

        match view.handle_event(key) {
            FormEvent::Submit => FormKey::Submit,
            FormEvent::Edited => FormKey::Handled,
        }
    }

    /// Validate and mark the form as submitting. Returns the values to send,
    /// tagged with a fresh submission id, if everything passed.
    fn begin<P: Page>(
        view: &mut FormView<P>,
        next_submission: &mut u64,
        status_line: &mut Option<String>,
    ) -> Option<(SubmissionId, FormValues)> {
        match view.page_mut().form_mut().begin_submit() {
            Ok(values) => {
                let id = SubmissionId(*next_submission);
                *next_submission += 1;
                view.wait_for(id);

                *status_line = Some("Submitting…".to_string());
                Some((id, values))
            }
            Err(Rejected::Invalid(errors)) => {
                tracing::debug!(%errors, "not submitting an invalid form");
                None
            }
            Err(Rejected::InFlight) => {
                *status_line = Some("Still waiting on the server…".to_string());
                None
            }
        }
    }

    /// A request is done. Reset the form on screen if it is the one that
    /// sent it; anything else is a leftover from a form we already left.
    fn finish<P: Page>(
        status_line: &mut Option<String>,
        view: &mut FormView<P>,
        id: SubmissionId,
        result: &api::Result<Response>,
    ) {
        if view.finish(id) {
            tracing::debug!(?id, ok = result.is_ok(), "finished submission");
            *status_line = None;
        } else {
            tracing::debug!(?id, "ignoring a response for a form that was left");
        }
    }

    /// Move to another page. Form values on the page we leave are discarded.
    fn navigate(&mut self, route: Route) {
        if route != self.route() {
            tracing::debug!(from = %self.route(), to = %route, "navigating");
            self.screen = Screen::for_route(route);
            self.status_line = None;
        }
    }

    /// Let the TUI manager know whether we're all wrapped up and can exit.
    pub fn should_exit(&self) -> Option<ExitCode> {
        self.exit
    }
}

/// What a key press on a form page turned into
enum FormKey {
    /// Nothing beyond editing the form
    Handled,

    /// The user wants to submit
    Submit,

    /// The user wants to go somewhere else
    Go(Route),
}

/// The page currently on screen, with its state
#[derive(Debug)]
enum Screen {
    /// Landing page
    Home,

    /// Registering a new account
    CreateAccount(FormView<CreateAccountPage>),

    /// Logging in
    Login(FormView<LoginPage>),
}

impl Screen {
    /// A fresh page for a route
    fn for_route(route: Route) -> Self {
        match route {
            Route::Home => Self::Home,
            Route::CreateAccount => Self::CreateAccount(FormView::default()),
            Route::Login => Self::Login(FormView::default()),
        }
    }

    fn route(&self) -> Route {
        match self {
            Self::Home => Route::Home,
            Self::CreateAccount(_) => CreateAccountPage::ROUTE,
            Self::Login(_) => LoginPage::ROUTE,
        }
    }
}
