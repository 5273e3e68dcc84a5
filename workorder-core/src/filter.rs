use crate::types::{WorkOrder, WorkOrderStatus};

/// Status predicate for the dashboard listing. `All` is the "all"
/// sentinel: no status filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(WorkOrderStatus),
}

impl StatusFilter {
    pub fn matches(self, status: WorkOrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => status == wanted,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

/// Derive the visible rows from the full collection and a filter choice.
///
/// Pure and re-derivable at any time: the input is never mutated and
/// filtered-out orders stay in the store. The status predicate and the
/// case-insensitive retailer-name substring are ANDed; an empty substring
/// matches everything. Input order is preserved.
pub fn filter_orders(
    orders: &[WorkOrder],
    status: StatusFilter,
    retailer_substring: &str,
) -> Vec<WorkOrder> {
    let needle = retailer_substring.to_lowercase();
    orders
        .iter()
        .filter(|order| status.matches(order.status))
        .filter(|order| needle.is_empty() || order.retailer_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
