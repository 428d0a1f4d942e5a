//! Registration form fields and per-field state

use std::fmt;

use common::user_api::RegisterPayload;

/// One input of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Nickname,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    /// All fields, in form order
    pub const ALL: [Field; 4] = [
        Field::Nickname,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
    ];

    /// Name of the field in backend payloads and error maps
    pub fn api_name(self) -> &'static str {
        match self {
            Field::Nickname => "nickname",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }

    /// Label shown next to the input
    pub fn label(self) -> &'static str {
        match self {
            Field::Nickname => "昵称",
            Field::Email => "邮箱",
            Field::Password => "密码",
            Field::ConfirmPassword => "确认密码",
        }
    }
}

/// Values typed into the registration form
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationInput {
    pub nickname: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationInput {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Nickname => &self.nickname,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Nickname => self.nickname = value,
            Field::Email => self.email = value,
            Field::Password => self.password = value,
            Field::ConfirmPassword => self.confirm_password = value,
        }
    }

    /// Flags for every field left empty
    pub fn empty_fields(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        for field in Field::ALL {
            if self.get(field).is_empty() {
                errors.flag(field);
            }
        }
        errors
    }

    /// Fields whose value differs from what was sent in `payload`
    pub fn changed_since(&self, payload: &RegisterPayload) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|&field| {
                let sent = match field {
                    Field::Nickname => &payload.nickname,
                    Field::Email => &payload.email,
                    Field::Password => &payload.password,
                    Field::ConfirmPassword => &payload.confirm_password,
                };
                self.get(field) != sent.as_str()
            })
            .collect()
    }

    pub fn to_payload(&self) -> RegisterPayload {
        RegisterPayload {
            nickname: self.nickname.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        }
    }
}

// Passwords stay out of logs
impl fmt::Debug for RegistrationInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationInput")
            .field("nickname", &self.nickname)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .finish()
    }
}

/// Error highlighting, one flag per field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub nickname: bool,
    pub email: bool,
    pub password: bool,
    pub confirm_password: bool,
}

impl FieldErrors {
    /// Flags with only `field` set
    pub fn only(field: Field) -> Self {
        let mut errors = Self::default();
        errors.flag(field);
        errors
    }

    pub fn flag(&mut self, field: Field) {
        *self.slot(field) = true;
    }

    pub fn clear(&mut self, field: Field) {
        *self.slot(field) = false;
    }

    pub fn is_flagged(&self, field: Field) -> bool {
        match field {
            Field::Nickname => self.nickname,
            Field::Email => self.email,
            Field::Password => self.password,
            Field::ConfirmPassword => self.confirm_password,
        }
    }

    pub fn any(&self) -> bool {
        Field::ALL.iter().any(|field| self.is_flagged(*field))
    }

    /// Flagged fields, in form order
    pub fn flagged(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.is_flagged(*field))
            .collect()
    }

    fn slot(&mut self, field: Field) -> &mut bool {
        match field {
            Field::Nickname => &mut self.nickname,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        }
    }
}

/// The two password inputs of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordField {
    Password,
    ConfirmPassword,
}

impl From<PasswordField> for Field {
    fn from(field: PasswordField) -> Self {
        match field {
            PasswordField::Password => Field::Password,
            PasswordField::ConfirmPassword => Field::ConfirmPassword,
        }
    }
}

/// How a password input renders its value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Masked,
    Plain,
}

impl InputMode {
    pub fn toggled(self) -> Self {
        match self {
            InputMode::Masked => InputMode::Plain,
            InputMode::Plain => InputMode::Masked,
        }
    }

    /// Value of the input's `type` attribute
    pub fn html_type(self) -> &'static str {
        match self {
            InputMode::Masked => "password",
            InputMode::Plain => "text",
        }
    }
}

/// Input modes of both password inputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordVisibility {
    pub password: InputMode,
    pub confirm_password: InputMode,
}

impl PasswordVisibility {
    pub fn mode(&self, field: PasswordField) -> InputMode {
        match field {
            PasswordField::Password => self.password,
            PasswordField::ConfirmPassword => self.confirm_password,
        }
    }

    pub fn toggle(&mut self, field: PasswordField) {
        match field {
            PasswordField::Password => self.password = self.password.toggled(),
            PasswordField::ConfirmPassword => {
                self.confirm_password = self.confirm_password.toggled()
            }
        }
    }
}
