use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Indoor,
    Outdoor,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Indoor => "indoor",
            Category::Outdoor => "outdoor",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "indoor" => Ok(Category::Indoor),
            "outdoor" => Ok(Category::Outdoor),
            other => Err(format!("unknown event category: {other}")),
        }
    }
}

/// Morning, afternoon or evening. Ordering follows the day, which is also the
/// order buckets are rendered in.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 3] = [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
        }
    }

    /// Bucket for grouping. Anything outside 06..18 is evening, so hours 0-5
    /// land there as well.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }

    /// Filter window on a start time. Evening is open-ended from 18:00, so
    /// unlike `from_hour` it does not match early-morning starts.
    pub fn contains(&self, start: NaiveTime) -> bool {
        let hour = start.hour();
        match self {
            TimeOfDay::Morning => (6..12).contains(&hour),
            TimeOfDay::Afternoon => (12..18).contains(&hour),
            TimeOfDay::Evening => hour >= 18,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening" => Ok(TimeOfDay::Evening),
            other => Err(format!("unknown time of day: {other}")),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EventRecord {
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub location: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub price_min: f64,
    pub price_max: f64,
    pub capacity: i64,
    pub available_spots: i64,
}

impl EventRecord {
    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from_hour(self.start_time.hour())
    }

    pub fn is_free(&self) -> bool {
        self.price_min == 0.0 && self.price_max == 0.0
    }
}

/// Per-request filter. Every field that is set must match.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryCriteria {
    pub date: NaiveDate,
    pub category: Option<Category>,
    pub time_of_day: Option<TimeOfDay>,
    pub max_price: Option<f64>,
}

impl QueryCriteria {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date,
            category: None,
            time_of_day: None,
            max_price: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_time_of_day(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = Some(time_of_day);
        self
    }

    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition: String,
    pub humidity_percent: Option<i64>,
    pub wind_kph: Option<f64>,
}

/// Events keyed by bucket. Always holds all three keys.
pub type GroupedEvents = BTreeMap<TimeOfDay, Vec<EventRecord>>;

/// Everything the formatter needs for one request; built fresh and dropped
/// once the text is rendered.
#[derive(Clone, Debug)]
pub struct RecommendationContext {
    pub weather: Option<WeatherSnapshot>,
    pub clothing: Vec<String>,
    pub transport: String,
    pub grouped_events: GroupedEvents,
    pub location: String,
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    #[test]
    fn buckets_by_start_hour() {
        for hour in 0..24 {
            let expected = if (6..12).contains(&hour) {
                TimeOfDay::Morning
            } else if (12..18).contains(&hour) {
                TimeOfDay::Afternoon
            } else {
                TimeOfDay::Evening
            };
            assert_eq!(TimeOfDay::from_hour(hour), expected, "hour {hour}");
        }
    }

    #[test]
    fn evening_filter_excludes_small_hours() {
        assert!(TimeOfDay::Evening.contains(at(18, 0)));
        assert!(TimeOfDay::Evening.contains(at(23, 59)));
        assert!(!TimeOfDay::Evening.contains(at(2, 30)));
        assert_eq!(TimeOfDay::from_hour(2), TimeOfDay::Evening);
    }

    #[test]
    fn morning_and_afternoon_are_half_open() {
        assert!(TimeOfDay::Morning.contains(at(6, 0)));
        assert!(TimeOfDay::Morning.contains(at(11, 59)));
        assert!(!TimeOfDay::Morning.contains(at(12, 0)));
        assert!(TimeOfDay::Afternoon.contains(at(12, 0)));
        assert!(!TimeOfDay::Afternoon.contains(at(18, 0)));
    }

    #[test]
    fn parses_filter_vocabulary() {
        assert_eq!("Indoor".parse::<Category>(), Ok(Category::Indoor));
        assert_eq!(" outdoor ".parse::<Category>(), Ok(Category::Outdoor));
        assert!("garden".parse::<Category>().is_err());
        assert_eq!("EVENING".parse::<TimeOfDay>(), Ok(TimeOfDay::Evening));
        assert!("night".parse::<TimeOfDay>().is_err());
    }
}
