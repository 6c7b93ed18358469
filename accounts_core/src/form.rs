use crate::validation::{Schema, ValidationErrors};
use crate::{Field, FormValues};
use core::fmt::Display;
use core::future::Future;

/// How a call to `FormState::submit` ended.
#[derive(Debug, PartialEq)]
pub enum Submission<T, E> {
    /// Some rule failed. Nothing was sent and the values were kept.
    Invalid(ValidationErrors),

    /// Another submission has not finished yet. Nothing was sent.
    InFlight,

    /// The submit handler succeeded with this payload.
    Sent(T),

    /// The submit handler failed. The failure has already been logged.
    Failed(E),
}

impl<T, E> Submission<T, E> {
    /// Whether the form got as far as calling the submit handler.
    pub fn was_sent(&self) -> bool {
        matches!(self, Self::Sent(_) | Self::Failed(_))
    }
}

/// Why `FormState::begin_submit` refused to start a submission.
#[derive(Debug, PartialEq)]
pub enum Rejected {
    /// Some rule failed.
    Invalid(ValidationErrors),

    /// A submission is already running.
    InFlight,
}

/// The state behind one form on screen: current values, the errors from the
/// last submit attempt, and whether a submission is running.
#[derive(Debug)]
pub struct FormState<S> {
    schema: S,
    values: FormValues,
    errors: ValidationErrors,
    submitting: bool,
}

impl<S: Schema> FormState<S> {
    /// A blank form for the given schema.
    pub fn new(schema: S) -> Self {
        let values = FormValues::empty(schema.fields());

        Self {
            schema,
            values,
            errors: ValidationErrors::default(),
            submitting: false,
        }
    }

    /// Update one field. Fields the schema doesn't know about are ignored.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        if !self.values.set(field, value.into()) {
            tracing::debug!(%field, "ignoring value for a field this form does not have");
        }
    }

    /// Validate and, if everything passes, hand the values as typed to
    /// `on_submit`. Whatever `on_submit` returns, the form is blank and idle
    /// again afterwards.
    pub async fn submit<F, Fut, T, E>(&mut self, on_submit: F) -> Submission<T, E>
    where
        F: FnOnce(FormValues) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let values = match self.begin_submit() {
            Ok(values) => values,
            Err(Rejected::Invalid(errors)) => return Submission::Invalid(errors),
            Err(Rejected::InFlight) => return Submission::InFlight,
        };

        let result = on_submit(values).await;
        self.finish_submit();

        match result {
            Ok(sent) => Submission::Sent(sent),
            Err(err) => {
                tracing::warn!(%err, "form submission failed");
                Submission::Failed(err)
            }
        }
    }

    /// First half of `submit`, for callers that run the request somewhere
    /// else (e.g. on a spawned task.) On success the form is marked as
    /// submitting until `finish_submit` is called.
    ///
    /// ## Errors
    ///
    /// - `Rejected::InFlight` if a submission is already running
    /// - `Rejected::Invalid` if any rule failed; the errors are also kept for
    ///   `error` to show inline
    pub fn begin_submit(&mut self) -> Result<FormValues, Rejected> {
        if self.submitting {
            return Err(Rejected::InFlight);
        }

        if let Err(errors) = self.schema.validate(&self.values) {
            tracing::debug!(%errors, "form did not validate");
            self.errors = errors.clone();
            return Err(Rejected::Invalid(errors));
        }

        self.errors = ValidationErrors::default();
        self.submitting = true;

        Ok(self.values.clone())
    }

    /// Second half of `submit`: the request is done (successfully or not), so
    /// go back to a blank, idle form.
    pub fn finish_submit(&mut self) {
        self.submitting = false;
        self.values.clear();
    }

    /// The fields of this form, in display order.
    pub fn fields(&self) -> &'static [Field] {
        self.schema.fields()
    }

    /// The current values, as typed.
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// The current value of a single field, as typed.
    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    /// Errors from the last submit attempt.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// The inline message for a field from the last submit attempt.
    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.message(field)
    }

    /// Whether a submission has started but not finished.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}

impl<S: Schema + Default> Default for FormState<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::validation::{CreateAccountSchema, LoginSchema};
    use std::cell::Cell;

    fn filled_login() -> FormState<LoginSchema> {
        let mut form = FormState::new(LoginSchema);
        form.set_field(Field::Email, "a@b.com");
        form.set_field(Field::Password, "x");
        form
    }

    #[test_log::test(tokio::test)]
    async fn valid_submit_calls_handler_once_with_values_as_typed() {
        let mut form = FormState::new(CreateAccountSchema);
        form.set_field(Field::FirstName, " Alice ");
        form.set_field(Field::Email, "alice@example.com ");
        form.set_field(Field::Password, "Secr3tPwd");

        let calls = Cell::new(0);
        let outcome: Submission<FormValues, String> = form
            .submit(|values| {
                calls.set(calls.get() + 1);
                async move { Ok(values) }
            })
            .await;

        assert_eq!(calls.get(), 1);
        let Submission::Sent(sent) = outcome else {
            panic!("expected the form to be sent, got {outcome:?}");
        };
        assert_eq!(sent.get(Field::FirstName), " Alice ");
        assert_eq!(sent.get(Field::Email), "alice@example.com ");
        assert_eq!(sent.get(Field::Password), "Secr3tPwd");
    }

    #[test_log::test(tokio::test)]
    async fn invalid_submit_does_not_call_handler_and_keeps_values() {
        let mut form = FormState::new(LoginSchema);
        form.set_field(Field::Email, "not an email");

        let called = Cell::new(false);
        let outcome: Submission<(), String> = form
            .submit(|_| {
                called.set(true);
                async { Ok(()) }
            })
            .await;

        assert!(!called.get(), "handler should not be called");

        let Submission::Invalid(errors) = outcome else {
            panic!("expected the form to be invalid, got {outcome:?}");
        };
        assert!(errors.message(Field::Email).is_some());
        assert_eq!(form.value(Field::Email), "not an email");
        assert_eq!(form.error(Field::Password), Some("Password is required"));
        assert!(!form.is_submitting());
    }

    #[test_log::test(tokio::test)]
    async fn resets_after_success() {
        let mut form = filled_login();

        let outcome: Submission<(), String> = form.submit(|_| async { Ok(()) }).await;

        assert_eq!(outcome, Submission::Sent(()));
        assert!(form.values().is_blank());
        assert!(!form.is_submitting());
    }

    #[test_log::test(tokio::test)]
    async fn resets_after_failure() {
        let mut form = filled_login();

        let outcome: Submission<(), String> = form
            .submit(|_| async { Err("connection refused".to_string()) })
            .await;

        assert_eq!(outcome, Submission::Failed("connection refused".to_string()));
        assert!(form.values().is_blank());
        assert!(form.errors().is_empty());
        assert!(!form.is_submitting());
    }

    #[test_log::test(tokio::test)]
    async fn clears_stale_errors_on_successful_attempt() {
        let mut form = FormState::new(LoginSchema);
        assert!(form.begin_submit().is_err());
        assert!(!form.errors().is_empty());

        form.set_field(Field::Email, "a@b.com");
        form.set_field(Field::Password, "x");
        let outcome: Submission<(), String> = form.submit(|_| async { Ok(()) }).await;

        assert!(outcome.was_sent());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn submitting_flag_is_held_until_finished() {
        let mut form = filled_login();

        let values = form.begin_submit().unwrap();
        assert_eq!(values.get(Field::Email), "a@b.com");
        assert!(form.is_submitting());

        assert_eq!(form.begin_submit(), Err(Rejected::InFlight));

        form.finish_submit();
        assert!(!form.is_submitting());
        assert!(form.values().is_blank());
    }

    #[test]
    fn ignores_fields_outside_the_schema() {
        let mut form = FormState::new(LoginSchema);
        form.set_field(Field::FirstName, "Alice");

        assert_eq!(form.value(Field::FirstName), "");
        assert!(!form.values().contains(Field::FirstName));
    }

    mod state_machine {
        use super::*;
        use proptest::prelude::*;
        use proptest_state_machine::*;

        static SAMPLE_VALUES: &[&str] = &[
            "",
            "x",
            "Alice",
            "Secr3tPwd",
            "alice@example.com",
            " alice@example.com ",
        ];

        #[derive(Debug, Clone)]
        enum Transition {
            SetField(Field, String),
            Begin,
            Finish,
        }

        #[derive(Debug, Clone, Default)]
        struct RefState {
            first_name: String,
            email: String,
            password: String,
            submitting: bool,
        }

        impl RefState {
            fn value(&self, field: Field) -> &str {
                match field {
                    Field::FirstName => &self.first_name,
                    Field::Email => &self.email,
                    Field::Password => &self.password,
                }
            }

            fn is_valid(&self) -> bool {
                let mut values = FormValues::empty(CreateAccountSchema.fields());
                values.set(Field::FirstName, self.first_name.clone());
                values.set(Field::Email, self.email.clone());
                values.set(Field::Password, self.password.clone());

                CreateAccountSchema.validate(&values).is_ok()
            }
        }

        impl ReferenceStateMachine for RefState {
            type State = RefState;

            type Transition = Transition;

            fn init_state() -> BoxedStrategy<Self::State> {
                Just(RefState::default()).boxed()
            }

            fn transitions(_: &Self::State) -> BoxedStrategy<Self::Transition> {
                prop_oneof![
                    10 => (any::<Field>(), prop::sample::select(SAMPLE_VALUES))
                        .prop_map(|(field, value)| Transition::SetField(field, value.to_string())),
                    3 => Just(Transition::Begin),
                    3 => Just(Transition::Finish),
                ]
                .boxed()
            }

            fn preconditions(state: &Self::State, transition: &Self::Transition) -> bool {
                match transition {
                    Transition::Finish => state.submitting,
                    _ => true,
                }
            }

            fn apply(mut state: Self::State, transition: &Self::Transition) -> Self::State {
                match transition {
                    Transition::SetField(field, value) => match field {
                        Field::FirstName => state.first_name.clone_from(value),
                        Field::Email => state.email.clone_from(value),
                        Field::Password => state.password.clone_from(value),
                    },
                    Transition::Begin => {
                        if !state.submitting && state.is_valid() {
                            state.submitting = true;
                        }
                    }
                    Transition::Finish => {
                        state = RefState::default();
                    }
                }

                state
            }
        }

        struct FormStateMachine {}

        impl StateMachineTest for FormStateMachine {
            type SystemUnderTest = FormState<CreateAccountSchema>;

            type Reference = RefState;

            fn init_test(
                _: &<Self::Reference as ReferenceStateMachine>::State,
            ) -> Self::SystemUnderTest {
                FormState::new(CreateAccountSchema)
            }

            fn apply(
                mut state: Self::SystemUnderTest,
                ref_state: &<Self::Reference as ReferenceStateMachine>::State,
                transition: <Self::Reference as ReferenceStateMachine>::Transition,
            ) -> Self::SystemUnderTest {
                match transition {
                    Transition::SetField(field, value) => {
                        state.set_field(field, value);
                    }
                    Transition::Begin => {
                        let _ = state.begin_submit();

                        assert_eq!(
                            state.is_submitting(),
                            ref_state.submitting,
                            "submitting flag was not the same. Actual: `{}`, reference: `{}`",
                            state.is_submitting(),
                            ref_state.submitting
                        );
                    }
                    Transition::Finish => {
                        state.finish_submit();
                    }
                }

                for field in state.fields() {
                    let actual = state.value(*field);
                    let reference = ref_state.value(*field);

                    assert_eq!(
                        actual, reference,
                        "inconsistent {field}. Actual: `{actual}`, reference: `{reference}`"
                    );
                }

                state
            }

            fn check_invariants(
                state: &Self::SystemUnderTest,
                _: &<Self::Reference as ReferenceStateMachine>::State,
            ) {
                // a submission only ever starts from a form that validated
                if state.is_submitting() {
                    assert!(
                        state.errors().is_empty(),
                        "submitting with outstanding errors: {}",
                        state.errors()
                    );
                }
            }
        }

        prop_state_machine! {
            #[test]
            fn state_machine(sequential 1..30 => FormStateMachine);
        }
    }
}
