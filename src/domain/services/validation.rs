use crate::domain::models::event::{EventCandidate, ValidationReport};

/// Checks every rule and reports all violations in rule order.
pub fn validate(candidate: &EventCandidate) -> ValidationReport {
    let mut errors = Vec::new();

    if let Some(id) = &candidate.id
        && id.trim().is_empty() {
        errors.push("Event ID is required".to_string());
    }

    if candidate.name.trim().is_empty() {
        errors.push("Event name is required".to_string());
    }

    if candidate.description.trim().is_empty() {
        errors.push("Event description is required".to_string());
    }

    if candidate.image_url.trim().is_empty() {
        errors.push("Event image URL is required".to_string());
    }

    if !candidate.capacity.is_finite() {
        errors.push("Capacity must be a valid number".to_string());
    } else if candidate.capacity <= 0.0 {
        errors.push("Capacity must be greater than 0".to_string());
    }

    if !candidate.sold.is_finite() {
        errors.push("Sold tickets must be a valid number".to_string());
    } else if candidate.sold < 0.0 {
        errors.push("Sold tickets cannot be negative".to_string());
    } else if candidate.capacity.is_finite() && candidate.sold > candidate.capacity {
        errors.push("Sold tickets cannot exceed capacity".to_string());
    }

    if !candidate.price.is_finite() {
        errors.push("Price must be a valid number".to_string());
    } else if candidate.price < 0.0 {
        errors.push("Price cannot be negative".to_string());
    }

    if candidate.start_time.is_none() {
        errors.push("Start time must be a valid date".to_string());
    }

    if candidate.end_time.is_none() {
        errors.push("End time must be a valid date".to_string());
    }

    if let (Some(start), Some(end)) = (candidate.start_time, candidate.end_time)
        && end <= start {
        errors.push("End time must be after start time".to_string());
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}
