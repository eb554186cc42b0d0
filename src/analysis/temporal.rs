use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::models::{ContributionDay, NO_DATA_LABEL};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusiestPeriods {
    pub month: String,
    pub weekday: String,
}

/// Sums positive days per month and per weekday and picks the top bucket
/// of each. Ties go to the bucket seen first.
pub fn busiest_periods(days: &[ContributionDay]) -> BusiestPeriods {
    let mut months = Tally::default();
    let mut weekdays = Tally::default();

    for day in days.iter().filter(|d| d.count > 0) {
        months.add(MONTHS[day.date.month0() as usize], day.count);
        weekdays.add(
            WEEKDAYS[day.date.weekday().num_days_from_sunday() as usize],
            day.count,
        );
    }

    BusiestPeriods {
        month: months.busiest().to_string(),
        weekday: weekdays.busiest().to_string(),
    }
}

#[derive(Default)]
struct Tally {
    buckets: Vec<(&'static str, u64)>,
}

impl Tally {
    fn add(&mut self, label: &'static str, count: u32) {
        match self.buckets.iter_mut().find(|(l, _)| *l == label) {
            Some((_, sum)) => *sum += u64::from(count),
            None => self.buckets.push((label, u64::from(count))),
        }
    }

    fn busiest(&self) -> &'static str {
        let mut best: Option<(&'static str, u64)> = None;
        for &(label, sum) in &self.buckets {
            if best.map_or(true, |(_, top)| sum > top) {
                best = Some((label, sum));
            }
        }
        best.map_or(NO_DATA_LABEL, |(label, _)| label)
    }
}
