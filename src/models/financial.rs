use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::analytics::coerce::{coerce_number, coerce_string, finite_or_zero, saturate};

/// One project's revenue and costs for a single reporting slice (GBP).
///
/// Several rows may share a `project_id`; they are summed by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRow {
    pub project_id: String,
    pub project_name: String,
    pub actual_revenue: f64,
    pub actual_costs: f64,
}

impl FinancialRow {
    pub fn new(project_id: &str, project_name: &str, actual_revenue: f64, actual_costs: f64) -> Self {
        Self {
            project_id: project_id.to_string(),
            project_name: project_name.to_string(),
            actual_revenue,
            actual_costs,
        }
    }

    /// Normalize a loosely typed record. Missing or malformed amounts become 0.
    /// Amounts may be named `actual_revenue`/`actual_costs` or `revenue`/`costs`.
    pub fn from_value(value: &Value) -> Self {
        Self {
            project_id: coerce_string(value.get("project_id")).trim().to_string(),
            project_name: coerce_string(value.get("project_name")).trim().to_string(),
            actual_revenue: coerce_number(value.get("actual_revenue").or_else(|| value.get("revenue"))),
            actual_costs: coerce_number(value.get("actual_costs").or_else(|| value.get("costs"))),
        }
    }
}

/// Per-project rollup with derived profit and margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub project_id: String,
    pub project_name: String,
    pub actual_revenue: f64,
    pub actual_costs: f64,
    pub profit: f64,
    /// Percentage of revenue kept as profit; 0 whenever revenue is not positive.
    pub profit_margin: f64,
}

impl ProjectSummary {
    pub fn empty(project_id: &str, project_name: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            project_name: project_name.to_string(),
            actual_revenue: 0.0,
            actual_costs: 0.0,
            profit: 0.0,
            profit_margin: 0.0,
        }
    }

    /// Fold one slice of revenue/costs into the running totals and refresh
    /// the derived fields. Totals saturate at `f64::MAX` rather than overflow.
    pub fn accumulate(&mut self, revenue: f64, costs: f64) {
        self.actual_revenue = saturate(self.actual_revenue + finite_or_zero(revenue));
        self.actual_costs = saturate(self.actual_costs + finite_or_zero(costs));
        self.profit = saturate(self.actual_revenue - self.actual_costs);
        self.profit_margin = profit_margin(self.profit, self.actual_revenue);
    }
}

/// `profit / revenue * 100`, or 0 when there is no positive revenue.
pub fn profit_margin(profit: f64, revenue: f64) -> f64 {
    if revenue > 0.0 {
        finite_or_zero(profit / revenue * 100.0)
    } else {
        0.0
    }
}
