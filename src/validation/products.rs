use crate::error::{AppError, Result};

/// Validates a product name.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation(
            "Product name cannot be empty".to_string(),
        ));
    }

    if name.len() > 255 {
        return Err(AppError::Validation(
            "Product name must be at most 255 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates a product price in Algerian dinars.
pub fn validate_price(price: i64) -> Result<()> {
    if price < 0 {
        return Err(AppError::Validation(
            "Price cannot be negative".to_string(),
        ));
    }

    Ok(())
}

/// Validates a primary image reference.
pub fn validate_image(image: &str) -> Result<()> {
    if image.trim().is_empty() {
        return Err(AppError::Validation(
            "Primary image is required".to_string(),
        ));
    }

    Ok(())
}

/// Validates a stock count.
pub fn validate_stock(stock: Option<i32>) -> Result<()> {
    if let Some(count) = stock {
        if count < 0 {
            return Err(AppError::Validation(
                "Stock cannot be negative".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_price() {
        assert!(validate_price(-1).is_err());
        assert!(validate_price(0).is_ok());
        assert!(validate_price(1500).is_ok());
    }

    #[test]
    fn rejects_negative_stock() {
        assert!(validate_stock(Some(-1)).is_err());
        assert!(validate_stock(Some(0)).is_ok());
        assert!(validate_stock(None).is_ok());
    }

    #[test]
    fn requires_name_and_image() {
        assert!(validate_name("").is_err());
        assert!(validate_image(" ").is_err());
        assert!(validate_name("Tee Kabyle motif").is_ok());
        assert!(validate_image("/uploads/tee-16.webp").is_ok());
    }
}
