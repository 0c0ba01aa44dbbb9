pub mod dates;

use chrono::NaiveDate;

use crate::model::Record;

/// Narrowing applied to the record list before paging.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub type_substring: String,
    pub date: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn new(type_substring: impl Into<String>, date: Option<NaiveDate>) -> Self {
        Self {
            type_substring: type_substring.into(),
            date,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.type_substring.is_empty() && self.date.is_none()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.matches_type(record) && self.matches_date(record)
    }

    fn matches_type(&self, record: &Record) -> bool {
        if self.type_substring.is_empty() {
            return true;
        }
        record
            .event_type
            .to_lowercase()
            .contains(&self.type_substring.to_lowercase())
    }

    fn matches_date(&self, record: &Record) -> bool {
        match self.date {
            None => true,
            Some(day) => dates::event_day(&record.event_date) == Some(day),
        }
    }
}

/// Stable filter: keeps input order and leaves `records` untouched.
pub fn filter(records: &[Record], criteria: &FilterCriteria) -> Vec<Record> {
    records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(event_type: &str, event_date: &str) -> Record {
        Record::new(event_type, "", event_date)
    }

    fn sample() -> Vec<Record> {
        vec![
            rec("Alert", "2024-01-05T10:00:00Z"),
            rec("Info", "2024-01-06T09:00:00Z"),
            rec("FORMULARIO", "2024/01/05 18:30:00"),
            rec("alert-critical", "2024-01-07T00:00:00Z"),
            rec("Info", "not a date"),
        ]
    }

    #[test]
    fn empty_criteria_is_identity() {
        let records = sample();
        assert_eq!(filter(&records, &FilterCriteria::default()), records);
    }

    #[test]
    fn type_match_is_case_insensitive_substring() {
        let records = sample();
        let out = filter(&records, &FilterCriteria::new("AL", None));
        let types: Vec<_> = out.iter().map(|r| r.event_type.as_str()).collect();
        assert_eq!(types, vec!["Alert", "alert-critical"]);
    }

    #[test]
    fn alert_scenario_keeps_only_first() {
        let records = vec![
            rec("Alert", "2024-01-05T10:00:00Z"),
            rec("Info", "2024-01-06T09:00:00Z"),
        ];
        let out = filter(&records, &FilterCriteria::new("al", None));
        assert_eq!(out, vec![records[0].clone()]);
    }

    #[test]
    fn date_match_uses_calendar_day() {
        let records = sample();
        let day = NaiveDate::from_ymd_opt(2024, 1, 5);
        let out = filter(&records, &FilterCriteria::new("", day));
        let types: Vec<_> = out.iter().map(|r| r.event_type.as_str()).collect();
        assert_eq!(types, vec!["Alert", "FORMULARIO"]);
    }

    #[test]
    fn predicates_compose_with_and() {
        let records = sample();
        let day = NaiveDate::from_ymd_opt(2024, 1, 5);
        let out = filter(&records, &FilterCriteria::new("form", day));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].event_type, "FORMULARIO");

        let none = filter(&records, &FilterCriteria::new("info", day));
        assert!(none.is_empty());
    }

    #[test]
    fn unparseable_dates_only_fail_date_predicate() {
        let records = sample();
        let by_type = filter(&records, &FilterCriteria::new("info", None));
        assert_eq!(by_type.len(), 2);
        let day = NaiveDate::from_ymd_opt(2024, 1, 6);
        let by_date = filter(&records, &FilterCriteria::new("info", day));
        assert_eq!(by_date.len(), 1);
    }

    #[test]
    fn output_is_ordered_subsequence() {
        let records: Vec<Record> = (0..20)
            .map(|i| {
                let kind = if i % 3 == 0 { "Alert" } else { "Info" };
                Record::new(kind, format!("#{i}"), "2024-01-05T10:00:00Z")
            })
            .collect();
        let out = filter(&records, &FilterCriteria::new("aler", None));
        let mut cursor = records.iter();
        for kept in &out {
            assert!(cursor.any(|r| r == kept));
        }
        assert_eq!(out.len(), 7);
    }
}
