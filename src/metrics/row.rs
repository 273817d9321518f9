//! One month of observations and its derived indicators.

use serde::{Deserialize, Serialize};

use super::schema::Measure;

/// Raw measures for one calendar month.
///
/// `None` marks a cell that was missing, non-numeric or negative in the
/// input; it is kept distinct from an observed zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRow {
    pub month: String,
    pub engaged_accounts: Option<f64>,
    pub followers: Option<f64>,
    pub reach: Option<f64>,
    pub interactions: Option<f64>,
    pub likes: Option<f64>,
    pub comments: Option<f64>,
}

impl MetricsRow {
    /// Row with every measure present.
    pub fn observed(month: impl Into<String>, values: [f64; 6]) -> Self {
        let [engaged_accounts, followers, reach, interactions, likes, comments] = values;
        Self {
            month: month.into(),
            engaged_accounts: Some(engaged_accounts),
            followers: Some(followers),
            reach: Some(reach),
            interactions: Some(interactions),
            likes: Some(likes),
            comments: Some(comments),
        }
    }

    pub fn get(&self, measure: Measure) -> Option<f64> {
        match measure {
            Measure::EngagedAccounts => self.engaged_accounts,
            Measure::Followers => self.followers,
            Measure::Reach => self.reach,
            Measure::Interactions => self.interactions,
            Measure::Likes => self.likes,
            Measure::Comments => self.comments,
        }
    }

    pub(crate) fn set(&mut self, measure: Measure, value: Option<f64>) {
        let slot = match measure {
            Measure::EngagedAccounts => &mut self.engaged_accounts,
            Measure::Followers => &mut self.followers,
            Measure::Reach => &mut self.reach,
            Measure::Interactions => &mut self.interactions,
            Measure::Likes => &mut self.likes,
            Measure::Comments => &mut self.comments,
        };
        *slot = value;
    }

    /// Engagement rate in percent: interactions / reach * 100.
    ///
    /// Undefined when reach is zero or either value is missing.
    pub fn engagement_rate(&self) -> Option<f64> {
        match (self.interactions, self.reach) {
            (Some(interactions), Some(reach)) if reach > 0.0 => Some(interactions / reach * 100.0),
            _ => None,
        }
    }
}

/// Parse one measure cell. Non-numeric, empty, non-finite and negative
/// cells are treated as missing data rather than failing the table.
pub fn parse_measure(cell: &str) -> Option<f64> {
    let value = cell.trim().parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Percentage change from `previous` to `current`.
///
/// Undefined when either side is missing or the predecessor is zero.
pub fn growth_pct(previous: Option<f64>, current: Option<f64>) -> Option<f64> {
    match (previous, current) {
        (Some(prev), Some(cur)) if prev != 0.0 => Some((cur - prev) / prev * 100.0),
        _ => None,
    }
}

/// Indicators computed after chronological ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub follower_growth_pct: Option<f64>,
    pub reach_growth_pct: Option<f64>,
    pub engaged_growth_pct: Option<f64>,
    pub engagement_rate_pct: Option<f64>,
}

/// Selector over [`DerivedMetrics`] fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DerivedField {
    FollowerGrowth,
    ReachGrowth,
    EngagedGrowth,
    EngagementRate,
}

impl DerivedMetrics {
    /// Derive indicators for `current` given its chronological predecessor.
    pub fn derive(previous: Option<&MetricsRow>, current: &MetricsRow) -> Self {
        let growth = |measure: Measure| previous.and_then(|prev| growth_pct(prev.get(measure), current.get(measure)));
        Self {
            follower_growth_pct: growth(Measure::Followers),
            reach_growth_pct: growth(Measure::Reach),
            engaged_growth_pct: growth(Measure::EngagedAccounts),
            engagement_rate_pct: current.engagement_rate(),
        }
    }

    pub fn get(&self, field: DerivedField) -> Option<f64> {
        match field {
            DerivedField::FollowerGrowth => self.follower_growth_pct,
            DerivedField::ReachGrowth => self.reach_growth_pct,
            DerivedField::EngagedGrowth => self.engaged_growth_pct,
            DerivedField::EngagementRate => self.engagement_rate_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_measure() {
        assert_eq!(parse_measure(" 476 "), Some(476.0));
        assert_eq!(parse_measure("12.5"), Some(12.5));
        assert_eq!(parse_measure("0"), Some(0.0));
        assert_eq!(parse_measure("n/a"), None);
        assert_eq!(parse_measure(""), None);
        assert_eq!(parse_measure("-3"), None);
        assert_eq!(parse_measure("NaN"), None);
    }

    #[test]
    fn test_growth_zero_is_defined() {
        assert_eq!(growth_pct(Some(10.0), Some(10.0)), Some(0.0));
        assert_eq!(growth_pct(Some(0.0), Some(10.0)), None);
        assert_eq!(growth_pct(None, Some(10.0)), None);
    }

    #[test]
    fn test_engagement_rate_zero_reach_is_undefined() {
        let mut row = MetricsRow::observed("Janeiro", [1.0, 2.0, 0.0, 5.0, 1.0, 1.0]);
        assert_eq!(row.engagement_rate(), None);
        row.set(Measure::Reach, None);
        assert_eq!(row.engagement_rate(), None);
        row.set(Measure::Reach, Some(50.0));
        assert_eq!(row.engagement_rate(), Some(10.0));
    }

    #[test]
    fn test_derive_first_row_has_no_growth() {
        let row = MetricsRow::observed("Dezembro", [59.0, 476.0, 1322.0, 125.0, 95.0, 30.0]);
        let derived = DerivedMetrics::derive(None, &row);
        assert_eq!(derived.follower_growth_pct, None);
        assert_eq!(derived.reach_growth_pct, None);
        assert_eq!(derived.engaged_growth_pct, None);
        assert!(derived.engagement_rate_pct.is_some());
    }
}
