//! Request field checks shared by the route handlers.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::AppError;

static PLAYER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-]{1,64}$").expect("valid regex"));

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]{0,20}$").expect("valid regex"));

pub fn player_id(value: &str) -> Result<(), AppError> {
    if value.is_empty() {
        return Err(AppError::BadRequest("Missing required field: playerId".into()));
    }
    if !PLAYER_ID_RE.is_match(value) {
        return Err(AppError::BadRequest(
            "Player id can only contain letters, numbers, dashes and underscores (max 64)".into(),
        ));
    }
    Ok(())
}

pub fn username(value: &str) -> Result<(), AppError> {
    if !USERNAME_RE.is_match(value) {
        return Err(AppError::BadRequest(
            "Username can only contain letters, numbers, and underscores (max 20)".into(),
        ));
    }
    Ok(())
}

pub fn rating(value: Option<i32>) -> Result<(), AppError> {
    match value {
        Some(r) if !(0..=4000).contains(&r) => Err(AppError::BadRequest(format!(
            "Rating {r} is out of range"
        ))),
        _ => Ok(()),
    }
}
