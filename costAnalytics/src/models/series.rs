use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar-month key used to join the two price series.
/// Equality is exact on both fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Truncates a full date to month granularity.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub month: YearMonth,
    pub value: f64,
}

/// An ordered monthly price series with at most one value per month.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series from month/value pairs, sorting by month and keeping
    /// the first value seen for any duplicated month. The dropped duplicate
    /// months are returned so callers can report them.
    pub fn from_points(mut points: Vec<PricePoint>) -> (Self, Vec<YearMonth>) {
        // Stable sort keeps the first occurrence ahead of its duplicates.
        points.sort_by_key(|p| p.month);

        let mut duplicates = Vec::new();
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last() {
                Some(last) if last.month == point.month => duplicates.push(point.month),
                _ => deduped.push(point),
            }
        }

        (Self { points: deduped }, duplicates)
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn get(&self, month: YearMonth) -> Option<f64> {
        self.points
            .binary_search_by_key(&month, |p| p.month)
            .ok()
            .map(|idx| self.points[idx].value)
    }

    pub fn first_month(&self) -> Option<YearMonth> {
        self.points.first().map(|p| p.month)
    }

    pub fn last_month(&self) -> Option<YearMonth> {
        self.points.last().map(|p| p.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(year: i32, month: u32, value: f64) -> PricePoint {
        PricePoint {
            month: YearMonth::new(year, month),
            value,
        }
    }

    #[test]
    fn months_order_by_year_then_month() {
        assert!(YearMonth::new(2019, 12) < YearMonth::new(2020, 1));
        assert!(YearMonth::new(2020, 1) < YearMonth::new(2020, 2));
        assert_eq!(YearMonth::new(2020, 3), YearMonth::new(2020, 3));
    }

    #[test]
    fn from_date_truncates_to_month() {
        let date = NaiveDate::from_ymd_opt(2020, 7, 23).unwrap();
        assert_eq!(YearMonth::from_date(date), YearMonth::new(2020, 7));
    }

    #[test]
    fn from_points_sorts_and_keeps_first_duplicate() {
        let (series, duplicates) = PriceSeries::from_points(vec![
            point(2020, 2, 3.3),
            point(2020, 1, 3.0),
            point(2020, 2, 9.9),
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series.get(YearMonth::new(2020, 2)), Some(3.3));
        assert_eq!(duplicates, vec![YearMonth::new(2020, 2)]);
    }

    #[test]
    fn lookup_misses_absent_months() {
        let (series, _) = PriceSeries::from_points(vec![point(2020, 1, 3.0)]);
        assert_eq!(series.get(YearMonth::new(2020, 2)), None);
    }
}
