use indexmap::IndexMap;
use crate::models::{FinancialRow, ProjectSummary};

/// Fold financial rows into one summary per project, in order of first
/// appearance.
///
/// Rows sharing a `project_id` are summed. The project name is the one seen
/// on the first row for that id.
pub fn aggregate_projects<'a, I>(rows: I) -> Vec<ProjectSummary>
where
    I: IntoIterator<Item = &'a FinancialRow>,
{
    let mut totals: IndexMap<&'a str, ProjectSummary> = IndexMap::new();

    for row in rows {
        totals
            .entry(row.project_id.as_str())
            .or_insert_with(|| ProjectSummary::empty(&row.project_id, &row.project_name))
            .accumulate(row.actual_revenue, row.actual_costs);
    }

    totals.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn row(id: &str, name: &str, revenue: f64, costs: f64) -> FinancialRow {
        FinancialRow::new(id, name, revenue, costs)
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let rows: Vec<FinancialRow> = Vec::new();
        assert!(aggregate_projects(&rows).is_empty());
    }

    #[test]
    fn test_rows_for_same_project_are_summed() {
        let rows = vec![
            row("p1", "Alpha", 1000.0, 600.0),
            row("p1", "Alpha", 500.0, 100.0),
        ];
        let summaries = aggregate_projects(&rows);
        assert_eq!(summaries.len(), 1);

        let p1 = &summaries[0];
        assert_eq!(p1.project_id, "p1");
        assert_eq!(p1.project_name, "Alpha");
        assert_eq!(p1.actual_revenue, 1500.0);
        assert_eq!(p1.actual_costs, 700.0);
        assert_eq!(p1.profit, 800.0);
        assert!((p1.profit_margin - 53.333_333).abs() < 1e-4);
    }

    #[test]
    fn test_first_appearance_order_preserved() {
        let rows = vec![
            row("zeta", "Zeta", 10.0, 0.0),
            row("alpha", "Alpha", 20.0, 0.0),
            row("zeta", "Zeta", 5.0, 0.0),
            row("mid", "Mid", 1.0, 0.0),
        ];
        let ids: Vec<_> = aggregate_projects(&rows).into_iter().map(|s| s.project_id).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_distinct_summary_count_matches_distinct_ids() {
        let rows = vec![
            row("a", "A", 1.0, 1.0),
            row("b", "B", 2.0, 1.0),
            row("a", "A", 3.0, 1.0),
            row("c", "C", 0.0, 0.0),
            row("b", "B", 1.0, 4.0),
            row("a", "A", 1.0, 1.0),
        ];
        let distinct: HashSet<_> = rows.iter().map(|r| r.project_id.as_str()).collect();
        assert_eq!(aggregate_projects(&rows).len(), distinct.len());
    }

    #[test]
    fn test_fold_order_does_not_change_totals() {
        let a = row("p1", "Alpha", 1234.56, 789.01);
        let b = row("p1", "Alpha", 98.7, 65.43);

        let forward = aggregate_projects(&[a.clone(), b.clone()]);
        let backward = aggregate_projects(&[b, a]);

        assert_eq!(forward[0].actual_revenue, backward[0].actual_revenue);
        assert_eq!(forward[0].actual_costs, backward[0].actual_costs);
        assert_eq!(forward[0].profit, backward[0].profit);
        assert_eq!(forward[0].profit_margin, backward[0].profit_margin);
    }

    #[test]
    fn test_reaggregating_summaries_is_idempotent() {
        let rows = vec![
            row("p1", "Alpha", 1000.0, 600.0),
            row("p2", "Beta", 0.0, 250.0),
            row("p1", "Alpha", 500.0, 100.0),
        ];
        let once = aggregate_projects(&rows);
        let as_rows: Vec<FinancialRow> = once
            .iter()
            .map(|s| FinancialRow::new(&s.project_id, &s.project_name, s.actual_revenue, s.actual_costs))
            .collect();
        let twice = aggregate_projects(&as_rows);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_zero_revenue_margin_is_zero() {
        let summaries = aggregate_projects(&[row("p2", "Beta", 0.0, 250.0)]);
        assert_eq!(summaries[0].profit, -250.0);
        assert_eq!(summaries[0].profit_margin, 0.0);
    }

    #[test]
    fn test_later_name_is_ignored() {
        let rows = vec![
            row("p1", "Alpha", 1.0, 0.0),
            row("p1", "Alpha (renamed)", 1.0, 0.0),
        ];
        assert_eq!(aggregate_projects(&rows)[0].project_name, "Alpha");
    }

    #[test]
    fn test_negative_amounts_accepted() {
        let summaries = aggregate_projects(&[row("p1", "Refund", -200.0, 50.0)]);
        assert_eq!(summaries[0].actual_revenue, -200.0);
        assert_eq!(summaries[0].profit, -250.0);
        assert_eq!(summaries[0].profit_margin, 0.0);
    }

    #[test]
    fn test_non_finite_row_does_not_poison_totals() {
        let rows = vec![
            row("p1", "Alpha", 100.0, 20.0),
            row("p1", "Alpha", f64::NAN, f64::INFINITY),
            row("p1", "Alpha", 50.0, 10.0),
        ];
        let p1 = &aggregate_projects(&rows)[0];
        assert_eq!(p1.actual_revenue, 150.0);
        assert_eq!(p1.actual_costs, 30.0);
        assert_eq!(p1.profit, 120.0);
        assert!(p1.profit_margin.is_finite());
    }

    #[test]
    fn test_loose_records_aggregate_after_normalizing() {
        let records = [
            json!({"project_id": "p1", "project_name": "Alpha", "actual_revenue": "1000", "actual_costs": 600}),
            json!({"project_id": "p1", "project_name": "Alpha", "actual_revenue": null, "actual_costs": "oops"}),
            json!({"project_id": "p2", "project_name": "Beta"}),
        ];
        let rows: Vec<FinancialRow> = records.iter().map(FinancialRow::from_value).collect();
        let summaries = aggregate_projects(&rows);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].actual_revenue, 1000.0);
        assert_eq!(summaries[0].actual_costs, 600.0);
        assert_eq!(summaries[1].profit, 0.0);
    }
}
