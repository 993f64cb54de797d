use std::fmt;
use std::str::FromStr;
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::analytics::coerce::{coerce_number, coerce_string};

/// One calendar month of the revenue trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: f64,
    pub costs: f64,
    pub profit: f64,
}

impl MonthlyRevenue {
    /// Normalize one loosely typed time-series row.
    ///
    /// `profit` is taken from the row as supplied (0 when absent), not
    /// recomputed from revenue and costs.
    pub fn from_value(value: &Value) -> Self {
        Self {
            month: coerce_string(value.get("month")),
            revenue: coerce_number(value.get("revenue")),
            costs: coerce_number(value.get("costs")),
            profit: coerce_number(value.get("profit")),
        }
    }
}

/// Requested window for the revenue trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Period {
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[default]
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "all")]
    All,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMonth => "1m",
            Self::ThreeMonths => "3m",
            Self::SixMonths => "6m",
            Self::OneYear => "1y",
            Self::All => "all",
        }
    }

    /// Number of months before the current one that the window reaches back.
    fn months_back(&self) -> Option<u32> {
        match self {
            Self::OneMonth => Some(0),
            Self::ThreeMonths => Some(2),
            Self::SixMonths => Some(5),
            Self::OneYear => Some(11),
            Self::All => None,
        }
    }

    /// First month (`YYYY-MM`) included in the window ending at `today`'s
    /// month, or `None` for an unbounded window.
    pub fn start_month(&self, today: NaiveDate) -> Option<String> {
        let back = self.months_back()?;
        let first_of_month = today.with_day(1)?;
        let start = first_of_month.checked_sub_months(Months::new(back))?;
        Some(start.format("%Y-%m").to_string())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1m" => Ok(Self::OneMonth),
            "3m" => Ok(Self::ThreeMonths),
            "6m" => Ok(Self::SixMonths),
            "1y" => Ok(Self::OneYear),
            "all" => Ok(Self::All),
            other => Err(format!("unknown period '{}'", other)),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
