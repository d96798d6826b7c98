// Cost and duration estimates attached to an appointment when it is requested.

use crate::modules::calendar::core::policy::service_slots;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModificationItem {
    pub id: String,
    pub name: String,
    pub estimated_hours: f64,
    pub unit_price: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Estimate {
    pub cost: i64,
    pub hours: i64,
}

/// A service occupies one slot at a flat price.
pub fn service_estimate(service_price: i64) -> Estimate {
    Estimate {
        cost: service_price,
        hours: service_slots()[0].hours(),
    }
}

/// Every item beyond the first adds 10% coordination overhead to the summed hours.
pub fn modification_estimate(items: &[ModificationItem]) -> Estimate {
    if items.is_empty() {
        return Estimate { cost: 0, hours: 0 };
    }
    let cost = items.iter().map(|item| item.unit_price).sum();
    let base_hours: f64 = items.iter().map(|item| item.estimated_hours).sum();
    let overhead = 1.0 + 0.1 * (items.len() - 1) as f64;
    Estimate {
        cost,
        hours: (base_hours * overhead).ceil() as i64,
    }
}

#[cfg(test)]
mod estimates_tests {
    use super::*;
    use rstest::rstest;

    fn item(id: &str, hours: f64, price: i64) -> ModificationItem {
        ModificationItem {
            id: id.into(),
            name: format!("Item {id}"),
            estimated_hours: hours,
            unit_price: price,
        }
    }

    #[rstest]
    fn it_should_price_a_service_as_one_slot() {
        assert_eq!(service_estimate(5000), Estimate { cost: 5000, hours: 3 });
    }

    #[rstest]
    #[case(vec![], 0, 0)]
    #[case(vec![item("m-1", 2.0, 15000)], 15000, 2)]
    #[case(vec![item("m-1", 2.0, 15000), item("m-2", 3.0, 8000)], 23000, 6)]
    #[case(vec![item("m-1", 4.0, 1), item("m-2", 4.0, 1), item("m-3", 2.0, 1)], 3, 12)]
    fn it_should_sum_prices_and_add_overhead_per_extra_item(
        #[case] items: Vec<ModificationItem>,
        #[case] cost: i64,
        #[case] hours: i64,
    ) {
        assert_eq!(modification_estimate(&items), Estimate { cost, hours });
    }
}
