//! Password strength heuristic

use std::fmt;

const MEDIUM_MIN_LENGTH: usize = 8;
const STRONG_MIN_LENGTH: usize = 12;

/// Strength tier of a password, for user feedback only
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    pub fn label(self) -> &'static str {
        match self {
            PasswordStrength::Weak => "弱",
            PasswordStrength::Medium => "中等",
            PasswordStrength::Strong => "强",
        }
    }

    /// Text shown under the password input
    pub fn caption(self) -> String {
        format!("密码强度: {}", self.label())
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a password
///
/// Medium needs at least 8 characters mixing letters with digits or upper
/// with lower case. Strong additionally needs a symbol and at least 12
/// characters. Everything else is weak.
pub fn compute_strength(password: &str) -> PasswordStrength {
    let length = password.chars().count();

    let mut has_upper = false;
    let mut has_lower = false;
    let mut has_letter = false;
    let mut has_digit = false;
    let mut has_symbol = false;

    for c in password.chars() {
        if c.is_uppercase() {
            has_upper = true;
        }
        if c.is_lowercase() {
            has_lower = true;
        }
        if c.is_alphabetic() {
            has_letter = true;
        } else if c.is_numeric() {
            has_digit = true;
        } else if !c.is_whitespace() {
            has_symbol = true;
        }
    }

    let diverse = (has_letter && has_digit) || (has_upper && has_lower);

    if length >= STRONG_MIN_LENGTH && diverse && has_symbol {
        PasswordStrength::Strong
    } else if length >= MEDIUM_MIN_LENGTH && diverse {
        PasswordStrength::Medium
    } else {
        PasswordStrength::Weak
    }
}
