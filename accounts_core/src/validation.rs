use crate::{Field, FormValues};
use core::fmt::{self, Display, Formatter};
use std::{collections::BTreeMap, error::Error};
use validator::ValidateEmail;

/// Shortest name we accept when creating an account.
pub const MIN_NAME_LENGTH: usize = 4;

/// Longest name we accept when creating an account.
pub const MAX_NAME_LENGTH: usize = 18;

/// Shortest password we accept when creating an account.
pub const MIN_PASSWORD_LENGTH: usize = 8;

static NAME_REQUIRED: &str = "Name is required";
static NAME_TOO_SHORT: &str = "Name must be at least 4 characters";
static NAME_TOO_LONG: &str = "Name can not be more than 18 characters";
static EMAIL_REQUIRED: &str = "Email is required";
static EMAIL_INVALID: &str = "Please provide valid email address";
static PASSWORD_REQUIRED: &str = "Password is required";
static PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
static PASSWORD_IS_IDENTITY: &str = "Name or email can't be password";

/// A set of rules over a form's fields.
pub trait Schema {
    /// The fields this schema covers, in display order.
    fn fields(&self) -> &'static [Field];

    /// Check every rule against the (trimmed) values.
    ///
    /// ## Errors
    ///
    /// Returns every violated rule, keyed by field. Checking does not stop at
    /// the first failure.
    fn validate(&self, values: &FormValues) -> Result<(), ValidationErrors>;
}

/// Rules for registering a new account.
#[derive(Debug, Default, Clone, Copy)]
pub struct CreateAccountSchema;

impl Schema for CreateAccountSchema {
    fn fields(&self) -> &'static [Field] {
        &[Field::FirstName, Field::Email, Field::Password]
    }

    fn validate(&self, values: &FormValues) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        // Rule order decides which message shows inline, so an empty field
        // reports its length rule first.
        let name = values.trimmed(Field::FirstName);
        length_at_most(&mut errors, Field::FirstName, name, MAX_NAME_LENGTH, NAME_TOO_LONG);
        length_at_least(&mut errors, Field::FirstName, name, MIN_NAME_LENGTH, NAME_TOO_SHORT);
        required(&mut errors, Field::FirstName, name, NAME_REQUIRED);

        let email = values.trimmed(Field::Email);
        check_email(&mut errors, email);

        let password = values.trimmed(Field::Password);
        length_at_least(
            &mut errors,
            Field::Password,
            password,
            MIN_PASSWORD_LENGTH,
            PASSWORD_TOO_SHORT,
        );
        required(&mut errors, Field::Password, password, PASSWORD_REQUIRED);
        if password == email || password == name {
            errors.add(Field::Password, PASSWORD_IS_IDENTITY);
        }

        errors.into_result()
    }
}

/// Rules for logging into an existing account. Deliberately loose: the server
/// is the one that knows whether the password is right.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoginSchema;

impl Schema for LoginSchema {
    fn fields(&self) -> &'static [Field] {
        &[Field::Email, Field::Password]
    }

    fn validate(&self, values: &FormValues) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        check_email(&mut errors, values.trimmed(Field::Email));
        required(
            &mut errors,
            Field::Password,
            values.trimmed(Field::Password),
            PASSWORD_REQUIRED,
        );

        errors.into_result()
    }
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    required(errors, Field::Email, email, EMAIL_REQUIRED);

    if !email.is_empty() && !email.validate_email() {
        errors.add(Field::Email, EMAIL_INVALID);
    }
}

fn required(errors: &mut ValidationErrors, field: Field, value: &str, message: &'static str) {
    if value.is_empty() {
        errors.add(field, message);
    }
}

fn length_at_least(
    errors: &mut ValidationErrors,
    field: Field,
    value: &str,
    min: usize,
    message: &'static str,
) {
    if value.chars().count() < min {
        errors.add(field, message);
    }
}

fn length_at_most(
    errors: &mut ValidationErrors,
    field: Field,
    value: &str,
    max: usize,
    message: &'static str,
) {
    if value.chars().count() > max {
        errors.add(field, message);
    }
}

/// Messages for every rule a form broke, grouped by field in rule order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, Vec<&'static str>>,
}

impl ValidationErrors {
    fn add(&mut self, field: Field, message: &'static str) {
        self.errors.entry(field).or_default().push(message);
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// `true` when no rule was broken.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The message to show next to a field, if it has one. This is the first
    /// rule the field broke.
    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.errors
            .get(&field)
            .and_then(|messages| messages.first().copied())
    }

    /// All messages for a field.
    pub fn messages(&self, field: Field) -> &[&'static str] {
        self.errors.get(&field).map_or(&[], Vec::as_slice)
    }

    /// Fields with at least one broken rule.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut first = true;

        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                first = false;

                write!(f, "{field}: {message}")?;
            }
        }

        Ok(())
    }
}

impl Error for ValidationErrors {}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    fn create_account(first_name: &str, email: &str, password: &str) -> FormValues {
        let mut values = FormValues::empty(CreateAccountSchema.fields());
        values.set(Field::FirstName, first_name.to_string());
        values.set(Field::Email, email.to_string());
        values.set(Field::Password, password.to_string());
        values
    }

    fn login(email: &str, password: &str) -> FormValues {
        let mut values = FormValues::empty(LoginSchema.fields());
        values.set(Field::Email, email.to_string());
        values.set(Field::Password, password.to_string());
        values
    }

    mod create_account {
        use super::*;

        #[test]
        fn accepts_valid_input() {
            let values = create_account("Alice", "alice@example.com", "Secr3tPwd");

            assert_eq!(CreateAccountSchema.validate(&values), Ok(()));
        }

        #[test]
        fn trims_before_checking() {
            let values = create_account("  Alice  ", " alice@example.com ", " Secr3tPwd ");

            assert_eq!(CreateAccountSchema.validate(&values), Ok(()));
        }

        #[test]
        fn reports_every_field_at_once() {
            let errors = CreateAccountSchema
                .validate(&create_account("", "", ""))
                .unwrap_err();

            assert_eq!(
                errors.fields().collect::<Vec<_>>(),
                vec![Field::FirstName, Field::Email, Field::Password]
            );
            assert_eq!(
                errors.messages(Field::FirstName),
                &[NAME_TOO_SHORT, NAME_REQUIRED]
            );
            assert_eq!(errors.messages(Field::Email), &[EMAIL_REQUIRED]);
            assert_eq!(
                errors.messages(Field::Password),
                &[PASSWORD_TOO_SHORT, PASSWORD_REQUIRED, PASSWORD_IS_IDENTITY]
            );
        }

        #[test]
        fn empty_fields_show_their_length_rule_inline() {
            let errors = CreateAccountSchema
                .validate(&create_account("  ", "alice@example.com", ""))
                .unwrap_err();

            assert_eq!(errors.message(Field::FirstName), Some(NAME_TOO_SHORT));
            assert_eq!(errors.message(Field::Password), Some(PASSWORD_TOO_SHORT));
            assert_eq!(
                errors.messages(Field::Password),
                &[PASSWORD_TOO_SHORT, PASSWORD_REQUIRED, PASSWORD_IS_IDENTITY]
            );
        }

        #[test]
        fn empty_password_only_matches_empty_identity_fields() {
            let errors = CreateAccountSchema
                .validate(&create_account("Alice", "alice@example.com", ""))
                .unwrap_err();

            assert_eq!(
                errors.messages(Field::Password),
                &[PASSWORD_TOO_SHORT, PASSWORD_REQUIRED]
            );
        }

        #[test]
        fn name_at_length_bounds() {
            let short = create_account("Abc", "alice@example.com", "Secr3tPwd");
            let min = create_account("Abcd", "alice@example.com", "Secr3tPwd");
            let max = create_account(&"a".repeat(18), "alice@example.com", "Secr3tPwd");
            let long = create_account(&"a".repeat(19), "alice@example.com", "Secr3tPwd");

            assert_eq!(
                CreateAccountSchema.validate(&short).unwrap_err().message(Field::FirstName),
                Some(NAME_TOO_SHORT)
            );
            assert_eq!(CreateAccountSchema.validate(&min), Ok(()));
            assert_eq!(CreateAccountSchema.validate(&max), Ok(()));
            assert_eq!(
                CreateAccountSchema.validate(&long).unwrap_err().message(Field::FirstName),
                Some(NAME_TOO_LONG)
            );
        }

        #[test]
        fn counts_characters_not_bytes() {
            let values = create_account("Zoë", "zoe@example.com", "Secr3tPwd");

            assert_eq!(
                CreateAccountSchema.validate(&values).unwrap_err().message(Field::FirstName),
                Some(NAME_TOO_SHORT)
            );

            let values = create_account("Zoëé", "zoe@example.com", "Secr3tPwd");

            assert_eq!(CreateAccountSchema.validate(&values), Ok(()));
        }

        #[test]
        fn rejects_email_without_at_sign() {
            let values = create_account("Alice", "alice.example.com", "Secr3tPwd");

            let errors = CreateAccountSchema.validate(&values).unwrap_err();

            assert_eq!(errors.messages(Field::Email), &[EMAIL_INVALID]);
        }

        #[test]
        fn rejects_short_password() {
            let values = create_account("Alice", "alice@example.com", "short");

            let errors = CreateAccountSchema.validate(&values).unwrap_err();

            assert_eq!(errors.messages(Field::Password), &[PASSWORD_TOO_SHORT]);
        }

        #[test]
        fn rejects_password_equal_to_email() {
            let values = create_account("Alice", "alice@example.com", " alice@example.com ");

            let errors = CreateAccountSchema.validate(&values).unwrap_err();

            assert_eq!(errors.messages(Field::Password), &[PASSWORD_IS_IDENTITY]);
        }

        #[test]
        fn rejects_password_equal_to_name() {
            let values = create_account("Alexander", "alex@example.com", "Alexander");

            let errors = CreateAccountSchema.validate(&values).unwrap_err();

            assert_eq!(errors.messages(Field::Password), &[PASSWORD_IS_IDENTITY]);
        }

        proptest! {
            #[test]
            fn name_outside_bounds_fails(
                name in prop_oneof!["[a-zA-Z]{0,3}", "[a-zA-Z]{19,40}"],
                padding in " {0,3}",
            ) {
                let values = create_account(
                    &format!("{padding}{name}{padding}"),
                    "alice@example.com",
                    "Secr3tPwd",
                );

                let errors = CreateAccountSchema.validate(&values).unwrap_err();
                let messages = errors.messages(Field::FirstName);

                prop_assert!(
                    messages.contains(&NAME_TOO_SHORT) || messages.contains(&NAME_TOO_LONG),
                    "expected a length error, got {messages:?}"
                );
            }

            #[test]
            fn password_equal_to_email_or_name_fails(
                name in "[a-z]{8,18}",
                use_name in any::<bool>(),
            ) {
                let email = format!("{name}@example.com");
                let password = if use_name { name.clone() } else { email.clone() };

                let errors = CreateAccountSchema
                    .validate(&create_account(&name, &email, &password))
                    .unwrap_err();

                prop_assert_eq!(errors.messages(Field::Password), &[PASSWORD_IS_IDENTITY]);
            }
        }
    }

    mod login {
        use super::*;

        #[test]
        fn accepts_any_non_empty_password() {
            assert_eq!(LoginSchema.validate(&login("a@b.com", "x")), Ok(()));
        }

        #[test]
        fn does_not_compare_password_with_email() {
            assert_eq!(LoginSchema.validate(&login("a@b.com", "a@b.com")), Ok(()));
        }

        #[test]
        fn requires_both_fields() {
            let errors = LoginSchema.validate(&login(" ", "   ")).unwrap_err();

            assert_eq!(errors.message(Field::Email), Some(EMAIL_REQUIRED));
            assert_eq!(errors.message(Field::Password), Some(PASSWORD_REQUIRED));
            assert_eq!(errors.message(Field::FirstName), None);
        }

        proptest! {
            #[test]
            fn email_without_at_sign_fails(email in "[a-z.]{1,30}") {
                let errors = LoginSchema.validate(&login(&email, "x")).unwrap_err();

                prop_assert_eq!(errors.messages(Field::Email), &[EMAIL_INVALID]);
            }
        }
    }

    #[test]
    fn display_lists_every_message() {
        let errors = LoginSchema.validate(&login("", "")).unwrap_err();

        assert_eq!(
            errors.to_string(),
            "email: Email is required; password: Password is required"
        );
    }
}
