//! Reports module for Nexora
//!
//! Pure computations over data already fetched from the API: monthly
//! insights for the dashboard and the spending-by-category chart.

pub mod chart;
pub mod monthly;

pub use chart::{spending_by_category, ChartSlice, PALETTE};
pub use monthly::{CategorySpending, MonthlyInsights, TOP_CATEGORY_LIMIT};
