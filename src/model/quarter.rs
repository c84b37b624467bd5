use std::fmt;

use chrono::{Datelike, NaiveDate};
use indexmap::IndexSet;
use serde::{Serialize, Serializer};

/// A calendar quarter. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quarter {
    pub year: i32,
    /// 1 through 4
    pub number: u8,
}

impl Quarter {
    /// The quarter containing `date`.
    pub fn from_date<D: Datelike>(date: &D) -> Quarter {
        Quarter {
            year: date.year(),
            number: ((date.month0() / 3) + 1) as u8,
        }
    }

    /// First month of the quarter (1-based).
    pub fn first_month(self) -> u32 {
        (u32::from(self.number) - 1) * 3 + 1
    }

    /// Last month of the quarter (1-based).
    pub fn last_month(self) -> u32 {
        u32::from(self.number) * 3
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.first_month(), 1)
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{} {}", self.number, self.year)
    }
}

impl Serialize for Quarter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered, de-duplicated quarters forming the horizontal axis of every
/// roadmap view. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuarterAxis {
    quarters: Vec<Quarter>,
}

impl QuarterAxis {
    /// Build an axis from quarters in the order given, dropping repeats.
    /// Returns `None` when no quarters are supplied.
    pub fn new<I>(quarters: I) -> Option<QuarterAxis>
    where
        I: IntoIterator<Item = Quarter>,
    {
        let unique: IndexSet<Quarter> = quarters.into_iter().collect();
        if unique.is_empty() {
            None
        } else {
            Some(QuarterAxis {
                quarters: unique.into_iter().collect(),
            })
        }
    }

    /// A one-quarter axis.
    pub fn single(quarter: Quarter) -> QuarterAxis {
        QuarterAxis {
            quarters: vec![quarter],
        }
    }

    pub fn len(&self) -> usize {
        self.quarters.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.quarters.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.quarters.len().saturating_sub(1)
    }

    /// Index of the first occurrence of `quarter`.
    pub fn position(&self, quarter: Quarter) -> Option<usize> {
        self.quarters.iter().position(|q| *q == quarter)
    }

    pub fn get(&self, index: usize) -> Option<Quarter> {
        self.quarters.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Quarter> + '_ {
        self.quarters.iter().copied()
    }

    /// Labels such as `Q1 2025`, in axis order.
    pub fn labels(&self) -> Vec<String> {
        self.quarters.iter().map(Quarter::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn q(year: i32, number: u8) -> Quarter {
        Quarter { year, number }
    }

    #[test]
    fn test_quarter_from_date() {
        let d = |m| NaiveDate::from_ymd_opt(2025, m, 15).unwrap();
        assert_eq!(Quarter::from_date(&d(1)), q(2025, 1));
        assert_eq!(Quarter::from_date(&d(3)), q(2025, 1));
        assert_eq!(Quarter::from_date(&d(4)), q(2025, 2));
        assert_eq!(Quarter::from_date(&d(9)), q(2025, 3));
        assert_eq!(Quarter::from_date(&d(10)), q(2025, 4));
        assert_eq!(Quarter::from_date(&d(12)), q(2025, 4));
    }

    #[test]
    fn test_quarter_label() {
        assert_eq!(q(2025, 3).to_string(), "Q3 2025");
    }

    #[test]
    fn test_quarter_months() {
        assert_eq!(q(2025, 2).first_month(), 4);
        assert_eq!(q(2025, 2).last_month(), 6);
        assert_eq!(q(2025, 4).first_day(), NaiveDate::from_ymd_opt(2025, 10, 1));
    }

    #[test]
    fn test_quarter_ordering() {
        assert!(q(2024, 4) < q(2025, 1));
        assert!(q(2025, 1) < q(2025, 2));
    }

    #[test]
    fn test_axis_dedupes_in_first_seen_order() {
        let axis = QuarterAxis::new(vec![q(2025, 1), q(2025, 1), q(2025, 2), q(2025, 1)]).unwrap();
        assert_eq!(axis.labels(), vec!["Q1 2025", "Q2 2025"]);
        assert_eq!(axis.position(q(2025, 2)), Some(1));
        assert_eq!(axis.position(q(2026, 1)), None);
        assert_eq!(axis.last_index(), 1);
    }

    #[test]
    fn test_axis_rejects_empty() {
        assert!(QuarterAxis::new(Vec::<Quarter>::new()).is_none());
    }

    #[test]
    fn test_axis_serializes_as_labels() {
        let axis = QuarterAxis::new(vec![q(2025, 4), q(2026, 1)]).unwrap();
        assert_eq!(serde_json::to_string(&axis).unwrap(), r#"["Q4 2025","Q1 2026"]"#);
    }
}
