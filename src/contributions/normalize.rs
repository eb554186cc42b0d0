use chrono::NaiveDate;
use serde_json::Value;

use crate::contributions::source::YearSelector;
use crate::models::{ContributionDay, ContributionYear, DateRange};

/// Turns the loosely-typed calendar payload into a [`ContributionYear`].
///
/// Every field is optional upstream:
/// - a missing total for the requested year is `0`
/// - a missing or non-array `contributions` is an empty series
/// - entries that do not parse as a day are skipped
/// - `range` is kept only when the payload carries one
pub fn normalize_calendar(payload: &Value, year: YearSelector) -> ContributionYear {
    let total = payload
        .get("total")
        .and_then(|t| t.get(year.total_key()))
        .and_then(Value::as_u64)
        .unwrap_or(0);

    let contributions = payload
        .get("contributions")
        .and_then(Value::as_array)
        .map(|days| {
            days.iter()
                .filter_map(|day| serde_json::from_value::<ContributionDay>(day.clone()).ok())
                .collect()
        })
        .unwrap_or_default();

    let range = payload
        .get("range")
        .map(|r| DateRange {
            start: parse_date(r.get("start")),
            end: parse_date(r.get("end")),
        })
        .unwrap_or_default();

    ContributionYear {
        year: year.resolved_year(),
        total,
        range,
        contributions,
    }
}

fn parse_date(value: Option<&Value>) -> Option<NaiveDate> {
    value
        .and_then(Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalizes_full_payload() {
        let payload = json!({
            "total": { "2024": 12, "2025": 7 },
            "contributions": [
                { "date": "2025-01-01", "count": 3, "level": 2 },
                { "date": "2025-01-02", "count": 4, "level": 3 }
            ]
        });

        let year = normalize_calendar(&payload, YearSelector::Year(2025));
        assert_eq!(year.year, 2025);
        assert_eq!(year.total, 7);
        assert_eq!(year.contributions.len(), 2);
        assert_eq!(year.contributions[1].count, 4);
        assert!(year.range.is_empty());
    }

    #[test]
    fn test_missing_fields_default() {
        let year = normalize_calendar(&json!({}), YearSelector::Year(2025));
        assert_eq!(year.total, 0);
        assert!(year.contributions.is_empty());

        let year = normalize_calendar(
            &json!({ "total": { "2024": 99 }, "contributions": "oops" }),
            YearSelector::Year(2025),
        );
        assert_eq!(year.total, 0);
        assert!(year.contributions.is_empty());
    }

    #[test]
    fn test_skips_malformed_days() {
        let payload = json!({
            "contributions": [
                { "date": "2025-02-30", "count": 1 },
                { "date": "2025-03-01", "count": -2 },
                { "date": "2025-03-02", "count": 5 },
                "nonsense"
            ]
        });
        let year = normalize_calendar(&payload, YearSelector::Year(2025));
        assert_eq!(year.contributions.len(), 1);
        assert_eq!(year.contributions[0].level, 0);
    }

    #[test]
    fn test_last_year_total_and_range() {
        let payload = json!({
            "total": { "lastYear": 321 },
            "range": { "start": "2024-10-16", "end": "2025-10-16" },
            "contributions": []
        });
        let year = normalize_calendar(&payload, YearSelector::Last);
        assert_eq!(year.total, 321);
        assert_eq!(year.range.start, NaiveDate::from_ymd_opt(2024, 10, 16));
        assert_eq!(year.range.end, NaiveDate::from_ymd_opt(2025, 10, 16));
    }
}
