// src/models/admin.rs

use crate::error::AppError;
use serde::Serialize;
use std::fmt;

/// Administrative level selector, ADM_0 (country) through ADM_5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmLevel(u8);

impl AdmLevel {
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Option<Self> {
        (level <= Self::MAX).then_some(Self(level))
    }

    /// Accepts "adm_3", "ADM_3", bare "3" and the alias "country".
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let normalized = input.trim().to_ascii_lowercase();
        let digits = match normalized.as_str() {
            "country" => "0",
            other => other.strip_prefix("adm_").unwrap_or(other),
        };
        digits
            .parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Invalid administrative level '{input}'. Must be between ADM_0 and ADM_5."
                ))
            })
    }

    pub fn as_u8(self) -> u8 {
        self.0
    }
}

impl fmt::Display for AdmLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ADM_{}", self.0)
    }
}

/// One entry in the resolved name hierarchy (NAME_1..NAME_5).
#[derive(Debug, Serialize)]
pub struct AdminName {
    pub level: u8,
    pub name: String,
}

/// Response body for POST /locate.
#[derive(Debug, Serialize)]
pub struct LocateResponse {
    pub longitude: f64,
    pub latitude: f64,
    pub country: String,
    pub administrative_levels: Vec<AdminName>,
}

/// Response body for GET /available-levels.
#[derive(Debug, Serialize)]
pub struct AvailableLevelsResponse {
    pub country: String,
    pub gid: String,
    pub available_levels: Vec<String>,
}
