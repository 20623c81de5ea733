//! Cabin record - the domain data behind the admin table

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One rentable cabin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cabin {
    /// Store-assigned identifier; 0 until persisted
    pub id: u64,
    pub name: String,
    pub max_capacity: u32,
    /// Nightly price
    pub regular_price: f64,
    /// Flat discount off the nightly price
    pub discount: f64,
    pub description: String,
    pub created_at: DateTime<Local>,
}

impl Cabin {
    pub fn has_discount(&self) -> bool {
        self.discount > 0.0
    }

    /// Nightly price after discount
    pub fn effective_price(&self) -> f64 {
        self.regular_price - self.discount
    }

    /// Check the record is storable. Returns the first problem found,
    /// phrased for display in the form.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".into());
        }
        if self.max_capacity == 0 {
            return Err("capacity must be at least 1".into());
        }
        if self.regular_price <= 0.0 {
            return Err("price must be greater than zero".into());
        }
        if self.discount < 0.0 {
            return Err("discount must not be negative".into());
        }
        if self.discount > self.regular_price {
            return Err("discount must not exceed the price".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Cabin {
        Cabin {
            id: 1,
            name: "Birch".into(),
            max_capacity: 4,
            regular_price: 250.0,
            discount: 25.0,
            description: "Cosy cabin by the lake".into(),
            created_at: Local::now(),
        }
    }

    #[test]
    fn test_valid_cabin_passes() {
        assert!(sample().validate().is_ok());
        assert!(sample().has_discount());
        assert_eq!(sample().effective_price(), 225.0);
    }

    #[test]
    fn test_validation_rejects_bad_fields() {
        let mut cabin = sample();
        cabin.name = "  ".into();
        assert!(cabin.validate().is_err());

        let mut cabin = sample();
        cabin.max_capacity = 0;
        assert!(cabin.validate().is_err());

        let mut cabin = sample();
        cabin.regular_price = 0.0;
        assert!(cabin.validate().is_err());

        let mut cabin = sample();
        cabin.discount = 300.0;
        assert_eq!(
            cabin.validate().unwrap_err(),
            "discount must not exceed the price"
        );
    }
}
