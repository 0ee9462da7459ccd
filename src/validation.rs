use crate::error::{SantaError, SantaResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> SantaResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(SantaError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Validates an optional amount (None is valid, Some(x) must be finite and >= 0).
pub fn optional_non_negative(value: Option<f64>, field: &str) -> SantaResult<Option<f64>> {
    match value {
        Some(x) if !x.is_finite() => Err(SantaError::NotFinite {
            field: field.to_string(),
        }),
        Some(x) if x < 0.0 => Err(SantaError::Negative {
            field: field.to_string(),
        }),
        other => Ok(other),
    }
}

/// Validates a group budget. Either bound may be absent; when both are
/// present the minimum must not exceed the maximum.
pub fn budget_range(min: Option<f64>, max: Option<f64>) -> SantaResult<(Option<f64>, Option<f64>)> {
    let min = optional_non_negative(min, "budget_min")?;
    let max = optional_non_negative(max, "budget_max")?;
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return Err(SantaError::InvalidBudget { min: lo, max: hi });
        }
    }
    Ok((min, max))
}

/// Trims an optional email, returning None if blank. Only checks the shape
/// `local@domain`; delivery is not our concern.
pub fn optional_email(value: Option<&str>) -> SantaResult<Option<String>> {
    match trim_optional(value) {
        None => Ok(None),
        Some(email) => match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(Some(email)),
            _ => Err(SantaError::InvalidEmail(email)),
        },
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
