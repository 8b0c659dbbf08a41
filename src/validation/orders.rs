use crate::error::{AppError, Result};
use crate::services::orders::CartItem;

/// Validates a customer name.
pub fn validate_customer_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation(
            "Customer name cannot be empty".to_string(),
        ));
    }

    if name.len() > 255 {
        return Err(AppError::Validation(
            "Customer name must be at most 255 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates a customer phone number.
///
/// Algerian mobile and landline numbers are 9 or 10 digits; an optional
/// leading + and spacing are tolerated.
pub fn validate_customer_phone(phone: &str) -> Result<()> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() < 9 || digits.len() > 13 {
        return Err(AppError::Validation(
            "Phone number must contain 9 to 13 digits".to_string(),
        ));
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == '+' || c == ' ' || c == '-')
    {
        return Err(AppError::Validation(
            "Phone number contains invalid characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates requested cart items.
pub fn validate_items(items: &[CartItem]) -> Result<()> {
    if items.is_empty() {
        return Err(AppError::Validation(
            "Order must contain at least one item".to_string(),
        ));
    }

    for item in items {
        if item.quantity <= 0 {
            return Err(AppError::Validation(format!(
                "Quantity for product {} must be positive",
                item.product_id
            )));
        }
    }

    Ok(())
}
