//! Discount filter - which cabins the table shows

use crate::model::cabin::Cabin;

/// Filter over the cabin list, cycled from the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscountFilter {
    #[default]
    All,
    NoDiscount,
    WithDiscount,
}

impl DiscountFilter {
    pub fn all() -> [DiscountFilter; 3] {
        [
            DiscountFilter::All,
            DiscountFilter::NoDiscount,
            DiscountFilter::WithDiscount,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            DiscountFilter::All => "All",
            DiscountFilter::NoDiscount => "No discount",
            DiscountFilter::WithDiscount => "With discount",
        }
    }

    pub fn matches(&self, cabin: &Cabin) -> bool {
        match self {
            DiscountFilter::All => true,
            DiscountFilter::NoDiscount => !cabin.has_discount(),
            DiscountFilter::WithDiscount => cabin.has_discount(),
        }
    }

    pub fn cycle(&self) -> DiscountFilter {
        match self {
            DiscountFilter::All => DiscountFilter::NoDiscount,
            DiscountFilter::NoDiscount => DiscountFilter::WithDiscount,
            DiscountFilter::WithDiscount => DiscountFilter::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn cabin(discount: f64) -> Cabin {
        Cabin {
            id: 1,
            name: "Pine".into(),
            max_capacity: 2,
            regular_price: 100.0,
            discount,
            description: String::new(),
            created_at: Local::now(),
        }
    }

    #[test]
    fn test_predicates() {
        assert!(DiscountFilter::All.matches(&cabin(0.0)));
        assert!(DiscountFilter::All.matches(&cabin(10.0)));
        assert!(DiscountFilter::NoDiscount.matches(&cabin(0.0)));
        assert!(!DiscountFilter::NoDiscount.matches(&cabin(10.0)));
        assert!(DiscountFilter::WithDiscount.matches(&cabin(10.0)));
        assert!(!DiscountFilter::WithDiscount.matches(&cabin(0.0)));
    }

    #[test]
    fn test_cycle_visits_every_option() {
        let start = DiscountFilter::All;
        let mut seen = vec![start];
        let mut current = start;
        for _ in 0..2 {
            current = current.cycle();
            seen.push(current);
        }
        assert_eq!(seen.len(), 3);
        assert_eq!(current.cycle(), start);
    }
}
