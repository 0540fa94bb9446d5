use std::collections::BTreeSet;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::month::{YearMonth, is_weekend};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Single,
    Range,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub mode: SelectionMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_date: Option<NaiveDate>,
    pub allow_weekends: bool,
    pub excluded_dates: BTreeSet<NaiveDate>,
    pub first_day_of_week: Weekday,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Single,
            initial_date: None,
            min_date: None,
            max_date: None,
            allow_weekends: true,
            excluded_dates: BTreeSet::new(),
            first_day_of_week: Weekday::Sun,
        }
    }
}

impl CalendarConfig {
    pub fn single() -> Self {
        Self::default()
    }

    pub fn range() -> Self {
        Self {
            mode: SelectionMode::Range,
            ..Self::default()
        }
    }

    pub fn with_bounds(mut self, min_date: Option<NaiveDate>, max_date: Option<NaiveDate>) -> Self {
        self.min_date = min_date;
        self.max_date = max_date;
        self
    }

    pub fn with_initial_date(mut self, date: NaiveDate) -> Self {
        self.initial_date = Some(date);
        self
    }

    pub fn without_weekends(mut self) -> Self {
        self.allow_weekends = false;
        self
    }

    pub fn excluding(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.excluded_dates.extend(dates);
        self
    }

    pub fn starting_week_on(mut self, weekday: Weekday) -> Self {
        self.first_day_of_week = weekday;
        self
    }

    /// False when `min_date` lies after `max_date`; such a calendar has no selectable dates.
    pub fn has_consistent_bounds(&self) -> bool {
        match (self.min_date, self.max_date) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }

    pub fn within_bounds(&self, date: NaiveDate) -> bool {
        self.has_consistent_bounds()
            && self.min_date.is_none_or(|min| min <= date)
            && self.max_date.is_none_or(|max| date <= max)
    }

    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        self.within_bounds(date)
            && (self.allow_weekends || !is_weekend(date))
            && !self.excluded_dates.contains(&date)
    }

    pub fn month_in_bounds(&self, month: YearMonth) -> bool {
        self.has_consistent_bounds()
            && self.min_date.is_none_or(|min| month.last_day() >= min)
            && self.max_date.is_none_or(|max| month.first_day() <= max)
    }

    /// Moves `month` onto the nearest month that overlaps the bounds.
    pub fn clamp_month(&self, month: YearMonth) -> YearMonth {
        if !self.has_consistent_bounds() {
            return month;
        }
        match (self.min_date, self.max_date) {
            (Some(min), _) if month.last_day() < min => YearMonth::of(min),
            (_, Some(max)) if month.first_day() > max => YearMonth::of(max),
            _ => month,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn bounded() -> CalendarConfig {
        CalendarConfig::single().with_bounds(Some(date(2025, 1, 1)), Some(date(2025, 12, 31)))
    }

    #[test]
    fn default_config_is_unbounded_single_mode() {
        let config = CalendarConfig::default();
        assert_eq!(config.mode, SelectionMode::Single);
        assert!(config.allow_weekends);
        assert!(config.is_selectable(date(1900, 6, 2)));
        assert!(config.is_selectable(date(2300, 6, 2)));
    }

    #[test]
    fn bounds_are_inclusive() {
        let config = bounded();
        assert!(config.is_selectable(date(2025, 1, 1)));
        assert!(config.is_selectable(date(2025, 12, 31)));
        assert!(!config.is_selectable(date(2024, 12, 31)));
        assert!(!config.is_selectable(date(2026, 1, 1)));
    }

    #[test]
    fn excluded_dates_are_disallowed_even_with_weekends_allowed() {
        let config = bounded().excluding([date(2025, 3, 1)]);
        assert!(!config.is_selectable(date(2025, 3, 1)));
        assert!(config.is_selectable(date(2025, 3, 2)));
    }

    #[test]
    fn inverted_bounds_have_no_selectable_dates() {
        let config = CalendarConfig::single().with_bounds(Some(date(2025, 6, 1)), Some(date(2025, 5, 1)));
        assert!(!config.has_consistent_bounds());
        assert!(!config.is_selectable(date(2025, 5, 15)));
        assert!(!config.month_in_bounds(YearMonth::of(date(2025, 5, 15))));
    }

    #[test]
    fn month_overlapping_bounds_partially_is_in_bounds() {
        let config = CalendarConfig::single().with_bounds(Some(date(2025, 3, 31)), None);
        assert!(config.month_in_bounds(YearMonth::of(date(2025, 3, 1))));
        assert!(!config.month_in_bounds(YearMonth::of(date(2025, 2, 1))));
    }

    #[test]
    fn clamp_moves_to_nearest_bound_month() {
        let config = bounded();
        assert_eq!(config.clamp_month(YearMonth::of(date(2030, 5, 5))), YearMonth::of(date(2025, 12, 1)));
        assert_eq!(config.clamp_month(YearMonth::of(date(2020, 5, 5))), YearMonth::of(date(2025, 1, 1)));
        assert_eq!(config.clamp_month(YearMonth::of(date(2025, 5, 5))), YearMonth::of(date(2025, 5, 1)));
    }

    #[test]
    fn parses_from_toml_with_defaults() {
        let config: CalendarConfig = toml::from_str(
            r#"
            mode = "range"
            min_date = "2025-01-01"
            allow_weekends = false
            excluded_dates = ["2025-03-01"]
            first_day_of_week = "Mon"
            "#,
        )
        .unwrap();

        assert_eq!(config.mode, SelectionMode::Range);
        assert_eq!(config.min_date, Some(date(2025, 1, 1)));
        assert_eq!(config.max_date, None);
        assert!(!config.allow_weekends);
        assert!(config.excluded_dates.contains(&date(2025, 3, 1)));
        assert_eq!(config.first_day_of_week, Weekday::Mon);
    }

    proptest! {
        #[test]
        fn weekend_rule_matches_weekday(offset in 0i64..3650) {
            let day = date(2020, 1, 1) + chrono::Duration::days(offset);
            let config = CalendarConfig::single().without_weekends();
            prop_assert_eq!(config.is_selectable(day), !is_weekend(day));
        }
    }
}
