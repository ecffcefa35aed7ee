//! Order checking over a page of messages
//!
//! Scans records once, front to back, and yields a violation wherever a
//! timestamp breaks the expected order against its baseline. With the
//! default settings the baseline is the immediately preceding record, so
//! only local inversions are reported.

use std::fmt;
use std::iter::Enumerate;
use std::slice::Iter;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::MessageRecord;

/// Expected sort direction of `internal_date`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Newest first (non-increasing)
    #[default]
    Descending,
    /// Oldest first (non-decreasing)
    Ascending,
}

impl Direction {
    /// True if `current` is out of order after `previous`
    pub fn breaks(self, current: i64, previous: i64) -> bool {
        match self {
            Self::Descending => current > previous,
            Self::Ascending => current < previous,
        }
    }

    /// Comparison shown in violation reports
    pub fn symbol(self) -> char {
        match self {
            Self::Descending => '>',
            Self::Ascending => '<',
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "descending" | "desc" => Ok(Self::Descending),
            "ascending" | "asc" => Ok(Self::Ascending),
            other => Err(format!(
                "unknown direction '{other}', expected descending or ascending"
            )),
        }
    }
}

/// What each record is compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Baseline {
    /// The immediately preceding record
    #[default]
    #[serde(rename = "adjacent")]
    Adjacent,
    /// The tightest bound seen so far: the minimum when descending, the
    /// maximum when ascending. Every record that is out of place is reported,
    /// not only the first one of each inversion.
    #[serde(rename = "running")]
    Running,
}

impl FromStr for Baseline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "adjacent" => Ok(Self::Adjacent),
            "running" => Ok(Self::Running),
            other => Err(format!(
                "unknown baseline '{other}', expected adjacent or running"
            )),
        }
    }
}

/// A record that is out of order against its baseline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderViolation {
    /// Position of the offending record in scan order
    pub index: usize,
    pub current: i64,
    pub previous: i64,
    pub current_id: String,
    pub previous_id: String,
    pub direction: Direction,
}

impl fmt::Display for OrderViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order violation at index {}: {} {} {}",
            self.index,
            self.current,
            self.direction.symbol(),
            self.previous
        )
    }
}

/// Checker settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderChecker {
    pub direction: Direction,
    pub baseline: Baseline,
}

impl OrderChecker {
    pub fn new(direction: Direction, baseline: Baseline) -> Self {
        Self {
            direction,
            baseline,
        }
    }

    /// Lazily yield violations in scan order
    pub fn check<'a>(&self, records: &'a [MessageRecord]) -> OrderViolations<'a> {
        OrderViolations {
            records: records.iter().enumerate(),
            checker: *self,
            last: None,
        }
    }

    /// Run the whole scan and collect the outcome
    pub fn run(&self, records: &[MessageRecord]) -> CheckReport {
        CheckReport {
            violations: self.check(records).collect(),
            records_scanned: records.len(),
            direction: self.direction,
            baseline: self.baseline,
        }
    }
}

/// Check newest-first order against the immediately preceding record
pub fn check_order(records: &[MessageRecord]) -> OrderViolations<'_> {
    OrderChecker::default().check(records)
}

/// Iterator returned by [`OrderChecker::check`]
#[derive(Debug, Clone)]
pub struct OrderViolations<'a> {
    records: Enumerate<Iter<'a, MessageRecord>>,
    checker: OrderChecker,
    /// Baseline record; `None` before the first record, which no timestamp
    /// can break.
    last: Option<&'a MessageRecord>,
}

impl Iterator for OrderViolations<'_> {
    type Item = OrderViolation;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, record) in self.records.by_ref() {
            let previous = self.last;
            let direction = self.checker.direction;

            let violation = previous
                .filter(|prev| direction.breaks(record.internal_date, prev.internal_date))
                .map(|prev| OrderViolation {
                    index,
                    current: record.internal_date,
                    previous: prev.internal_date,
                    current_id: record.id.clone(),
                    previous_id: prev.id.clone(),
                    direction,
                });

            self.last = match (self.checker.baseline, previous) {
                (Baseline::Running, Some(prev)) if violation.is_some() => Some(prev),
                _ => Some(record),
            };

            if let Some(violation) = violation {
                tracing::debug!(
                    index,
                    current = violation.current,
                    previous = violation.previous,
                    id = %record.id,
                    "Order violation"
                );
                return Some(violation);
            }
        }
        None
    }
}

/// Outcome of a full scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub violations: Vec<OrderViolation>,
    pub records_scanned: usize,
    pub direction: Direction,
    pub baseline: Baseline,
}

impl CheckReport {
    pub fn is_sorted(&self) -> bool {
        self.violations.is_empty()
    }
}
