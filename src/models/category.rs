use crate::errors::{AppError, AppResult};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String, // "#RRGGBB"
}

impl Category {
    pub fn new(name: &str, color: &str) -> AppResult<Self> {
        Ok(Self {
            id: 0,
            name: name.trim().to_string(),
            color: normalize_color(color)?,
        })
    }
}

/// Accept `#abc`, `abc`, `#aabbcc` or `aabbcc`; store `#AABBCC`.
pub fn normalize_color(raw: &str) -> AppResult<String> {
    let hex = raw.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AppError::InvalidColor(raw.to_string()));
    }

    let full = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => hex.to_string(),
        _ => return Err(AppError::InvalidColor(raw.to_string())),
    };

    Ok(format!("#{}", full.to_uppercase()))
}
