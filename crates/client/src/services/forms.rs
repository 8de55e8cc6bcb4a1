//! Form input checks for sign-in, registration and order submission.
//!
//! Each form collects one message per failing field into [`FieldErrors`] and
//! only converts to a request payload when every field passes.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    api::auth::{LoginRequest, RegisterRequest},
    error::{AppError, FieldErrors, Result},
    models::NewOrder,
};

pub const ROLE_OPTIONS: [&str; 1] = ["CUSTOMER"];

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+7|8)(?:-\d{3}){2}(?:-\d{2}){2}$").expect("phone pattern is valid")
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) -> bool {
    if is_blank(value) {
        errors.add(field, message);
        false
    } else {
        true
    }
}

fn check_email(errors: &mut FieldErrors, value: &str) {
    if require(errors, "email", value, "Введите email") && !EMAIL_PATTERN.is_match(value.trim()) {
        errors.add("email", "Некорректный email");
    }
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

/// Reformat free-form phone input as `+7-ddd-ddd-dd-dd` (or with an `8`
/// prefix), keeping whatever digits have been typed so far.
pub fn format_phone(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return String::new();
    }

    let (prefix, rest) = match digits.as_bytes()[0] {
        b'8' => ("8", &digits[1..]),
        b'7' => ("+7", &digits[1..]),
        _ => ("+7", digits.as_str()),
    };
    let rest = &rest[..rest.len().min(10)];

    let parts: Vec<&str> = [(0, 3), (3, 6), (6, 8), (8, 10)]
        .iter()
        .filter(|(start, _)| rest.len() > *start)
        .map(|(start, end)| &rest[*start..(*end).min(rest.len())])
        .collect();

    if parts.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix}-{}", parts.join("-"))
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub login: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "login", &self.login, "Введите логин");
        require(&mut errors, "password", &self.password, "Введите пароль");
        errors.into_result()?;

        Ok(LoginRequest {
            login: self.login.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub login: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            login: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            role: ROLE_OPTIONS[0].to_string(),
        }
    }
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<RegisterRequest> {
        let mut errors = FieldErrors::new();
        let phone = format_phone(&self.phone);

        require(&mut errors, "login", &self.login, "Введите логин");
        require(&mut errors, "password", &self.password, "Введите пароль");
        if require(
            &mut errors,
            "confirmPassword",
            &self.confirm_password,
            "Повторите пароль",
        ) && self.confirm_password != self.password
        {
            errors.add("confirmPassword", "Пароли не совпадают");
        }
        require(&mut errors, "fullName", &self.full_name, "Введите имя");
        check_email(&mut errors, &self.email);
        if require(&mut errors, "phone", &phone, "Введите телефон") && !is_valid_phone(&phone) {
            errors.add("phone", "Неверный формат телефона");
        }
        if require(&mut errors, "role", &self.role, "Выберите роль")
            && !ROLE_OPTIONS.contains(&self.role.trim())
        {
            errors.add("role", "Выберите роль");
        }
        errors.into_result()?;

        Ok(RegisterRequest {
            login: self.login.trim().to_string(),
            password: self.password.clone(),
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone,
            role: self.role.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderForm {
    pub project_template_id: i64,
    pub address: String,
    pub requested_timeline: Option<String>,
    pub phone: String,
    pub email: String,
    pub customer_id: Option<i64>,
}

impl OrderForm {
    pub fn validate(&self) -> Result<NewOrder> {
        let mut errors = FieldErrors::new();
        require(
            &mut errors,
            "address",
            &self.address,
            "Введите адрес строительства",
        );
        require(&mut errors, "phone", &self.phone, "Введите телефон для связи");
        check_email(&mut errors, &self.email);
        if self.project_template_id <= 0 {
            errors.add("projectTemplateId", "Выберите проект");
        }
        errors.into_result()?;

        Ok(NewOrder {
            project_template_id: self.project_template_id,
            address: self.address.trim().to_string(),
            requested_timeline: self
                .requested_timeline
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            customer_id: self.customer_id,
        })
    }
}

/// Field errors carried by `err`, if it is a validation failure.
pub fn field_errors(err: &AppError) -> Option<&FieldErrors> {
    match err {
        AppError::Validation(errors) => Some(errors),
        _ => None,
    }
}
