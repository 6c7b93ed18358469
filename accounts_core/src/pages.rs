use crate::api::{self, login, register, Client, Response};
use crate::form::{FormState, Submission};
use crate::validation::{CreateAccountSchema, LoginSchema, Schema};
use crate::Route;

/// A link from one page to another, shown under a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    /// Text before the link
    pub prompt: &'static str,

    /// The link itself
    pub title: &'static str,

    /// Where it goes
    pub to: Route,
}

/// What a form page looks like, independent of how it gets drawn.
pub trait Page {
    /// The rules this page's form follows.
    type Schema: Schema;

    /// Where the page lives.
    const ROUTE: Route;

    /// Heading
    const TITLE: &'static str;

    /// Explanatory text under the heading
    const BLURB: &'static str;

    /// Link to the other form
    const LINK: Link;

    /// The form on this page.
    fn form(&self) -> &FormState<Self::Schema>;

    /// The form on this page, for editing.
    fn form_mut(&mut self) -> &mut FormState<Self::Schema>;
}

/// Register a new account.
#[derive(Debug, Default)]
pub struct CreateAccountPage {
    form: FormState<CreateAccountSchema>,
}

impl CreateAccountPage {
    /// Validate the form and, if it passes, register with the server.
    pub async fn submit(&mut self, client: &Client) -> Submission<Response, api::Error> {
        let outcome = self
            .form
            .submit(|values| async move { register(client, &register::Req::from(&values)).await })
            .await;

        if let Submission::Sent(resp) = &outcome {
            tracing::info!(status = %resp.status, body = %resp.text(), "registered");
        }

        outcome
    }
}

impl Page for CreateAccountPage {
    type Schema = CreateAccountSchema;

    const ROUTE: Route = Route::CreateAccount;

    const TITLE: &'static str = "Create Account";

    const BLURB: &'static str = "Please enter your email address. And we'll send you a \
        verification email to finish your account creation process.";

    const LINK: Link = Link {
        prompt: "Already have an account?",
        title: "Login now.",
        to: Route::Login,
    };

    fn form(&self) -> &FormState<Self::Schema> {
        &self.form
    }

    fn form_mut(&mut self) -> &mut FormState<Self::Schema> {
        &mut self.form
    }
}

/// Log into an existing account.
#[derive(Debug, Default)]
pub struct LoginPage {
    form: FormState<LoginSchema>,
}

impl LoginPage {
    /// Validate the form and, if it passes, log in.
    pub async fn submit(&mut self, client: &Client) -> Submission<Response, api::Error> {
        let outcome = self
            .form
            .submit(|values| async move { login(client, &login::Req::from(&values)).await })
            .await;

        if let Submission::Sent(resp) = &outcome {
            tracing::info!(status = %resp.status, body = %resp.text(), "logged in");
        }

        outcome
    }
}

impl Page for LoginPage {
    type Schema = LoginSchema;

    const ROUTE: Route = Route::Login;

    const TITLE: &'static str = "Log into Account";

    const BLURB: &'static str = "Please enter the email address and password you \
        signed up with.";

    const LINK: Link = Link {
        prompt: "Don't have an account yet?",
        title: "Create one now.",
        to: Route::CreateAccount,
    };

    fn form(&self) -> &FormState<Self::Schema> {
        &self.form
    }

    fn form_mut(&mut self) -> &mut FormState<Self::Schema> {
        &mut self.form
    }
}
