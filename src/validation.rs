//! 申込フォームの入力チェック
//!
//! フィールドごとにエラーを1件保持し、再入力時はそのフィールドだけ再判定する。

use regex::Regex;
use std::collections::BTreeMap;

pub const MIN_PASSWORD_LEN: usize = 8;

lazy_static::lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    // 04xx xxx xxx / +61 4xx xxx xxx / 固定電話 0[2378] xxxx xxxx
    static ref PHONE_RE: Regex = Regex::new(r"^(?:\+?61|0)[2-478]\d{8}$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    FullName,
    Email,
    Phone,
    Password,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Password => "password",
        }
    }
}

/// フィールド単位のエラー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<Field, String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(|s| s.as_str())
    }

    /// 1フィールドだけ再判定（他のフィールドのエラーは残す）
    pub fn revalidate(&mut self, field: Field, value: &str) {
        match validate_field(field, value) {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    /// 表示用に連結
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field.as_str(), message))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// 空白・ハイフン・括弧は無視して判定
pub fn is_valid_phone(value: &str) -> bool {
    let digits: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    PHONE_RE.is_match(&digits)
}

pub fn validate_field(field: Field, value: &str) -> Option<String> {
    let value_trimmed = value.trim();
    match field {
        Field::FullName if value_trimmed.is_empty() => Some("Full name is required".into()),
        Field::Email if value_trimmed.is_empty() => Some("Email is required".into()),
        Field::Email if !is_valid_email(value) => Some("Please enter a valid email address".into()),
        Field::Phone if value_trimmed.is_empty() => Some("Phone number is required".into()),
        Field::Phone if !is_valid_phone(value) => Some("Please enter a valid phone number".into()),
        Field::Password if value.chars().count() < MIN_PASSWORD_LEN => Some(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )),
        _ => None,
    }
}

/// 申込者情報
#[derive(Debug, Clone, Default)]
pub struct ApplicantDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

impl ApplicantDetails {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        errors.revalidate(Field::FullName, &self.full_name);
        errors.revalidate(Field::Email, &self.email);
        errors.revalidate(Field::Phone, &self.phone);
        errors
    }
}
