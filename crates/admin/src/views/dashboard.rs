//! Dashboard cards.

use storedash_core::Amount;

/// Dashboard metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardMetrics {
    pub products: usize,
    pub orders: usize,
    pub users: usize,
    pub revenue: Amount,
}

impl DashboardMetrics {
    /// Revenue as shown on its card, e.g. `$10` or `$12.5`.
    #[must_use]
    pub fn revenue_display(&self) -> String {
        format!("${}", self.revenue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zeroed() {
        let metrics = DashboardMetrics::default();
        assert_eq!(metrics.products, 0);
        assert_eq!(metrics.revenue_display(), "$0");
    }

    #[test]
    fn test_revenue_display() {
        let metrics = DashboardMetrics {
            revenue: Amount::coerce(Some("12.50")),
            ..DashboardMetrics::default()
        };
        assert_eq!(metrics.revenue_display(), "$12.5");
    }
}
