use chrono::NaiveDate;

use event_advisor_lib::{
    catalog::EventCatalog,
    coordinator::Coordinator,
    db::{self, Store},
    llm::{ComposeError, RecommendationGenerator},
    query,
    weather::{WeatherError, WeatherProvider},
    Category, QueryCriteria, RecommendationRequest, TimeOfDay, WeatherSnapshot, NO_EVENTS_MESSAGE,
};

struct RainyDay;

impl WeatherProvider for RainyDay {
    fn fetch(&self, _location: &str, _date: NaiveDate) -> Result<Option<WeatherSnapshot>, WeatherError> {
        Ok(Some(WeatherSnapshot {
            temperature_c: 13.0,
            feels_like_c: 11.0,
            condition: "Moderate rain".to_string(),
            humidity_percent: Some(88),
            wind_kph: Some(20.5),
        }))
    }
}

/// Echoes back the event lines it was given, one bullet each.
struct EchoGenerator;

impl RecommendationGenerator for EchoGenerator {
    fn generate(&self, context: &str, _instructions: &str) -> Result<String, ComposeError> {
        let bullets: Vec<String> = context
            .lines()
            .filter(|line| line.contains("🏠") || line.contains("🌳"))
            .map(|line| format!("• {}", line.trim()))
            .collect();
        Ok(bullets.join("\n"))
    }
}

fn seeded_store() -> Store {
    let mut store = Store::open_in_memory().expect("open catalog");
    store.rebuild(&db::sample_events()).expect("seed catalog");
    store
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

fn coordinator() -> Coordinator {
    Coordinator::new(
        Box::new(RainyDay),
        Box::new(seeded_store()),
        Box::new(EchoGenerator),
    )
}

#[test]
fn recommends_evening_events_on_a_rainy_day() {
    let request = RecommendationRequest {
        location: "Singapore".to_string(),
        criteria: QueryCriteria::on(date("2026-02-16")).with_time_of_day(TimeOfDay::Evening),
    };
    let text = coordinator().respond(&request);

    assert!(text.contains("🌧️  WEATHER CONDITIONS  🌧️"));
    assert!(text.contains("• umbrella or raincoat"));
    assert!(text.contains("Use covered transport"));
    assert!(text.contains("• 🏠 Theater Show (INDOOR)"));
    assert!(text.contains("• 🌳 Night Market (OUTDOOR)"));
    assert!(!text.contains("Cooking Workshop"));
    assert!(!text.contains("Food Festival"));
}

#[test]
fn budget_filter_uses_cheapest_tier() {
    let store = seeded_store();
    let criteria = QueryCriteria::on(date("2026-02-15")).with_max_price(20.0);
    let events = query::query_events(&store, &criteria).expect("query");
    let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Art Exhibition", "Morning Yoga", "Museum Tour"]);
}

#[test]
fn grouping_sample_day_fills_each_bucket() {
    let store = seeded_store();
    let events = store
        .query(&QueryCriteria::on(date("2026-02-15")))
        .expect("query");
    let grouped = query::group_by_time_of_day(events);
    let names = |bucket: TimeOfDay| -> Vec<String> {
        grouped[&bucket].iter().map(|e| e.name.clone()).collect()
    };

    assert_eq!(names(TimeOfDay::Morning), vec!["Art Exhibition", "Morning Yoga", "Museum Tour"]);
    assert!(names(TimeOfDay::Afternoon).is_empty());
    assert_eq!(names(TimeOfDay::Evening), vec!["Summer Concert"]);
}

#[test]
fn indoor_evening_search_finds_nothing() {
    let request = RecommendationRequest {
        location: "Singapore".to_string(),
        criteria: QueryCriteria::on(date("2026-02-15"))
            .with_category(Category::Indoor)
            .with_time_of_day(TimeOfDay::Evening)
            .with_max_price(50.0),
    };
    assert_eq!(coordinator().respond(&request), NO_EVENTS_MESSAGE);
}

#[test]
fn alternative_dates_come_from_the_catalog() {
    let mut events = db::sample_events();
    let mut encore = events[0].clone();
    encore.date = date("2026-03-01");
    events.push(encore);

    let mut store = Store::open_in_memory().expect("open catalog");
    store.rebuild(&events).expect("seed catalog");

    assert_eq!(
        query::alternative_dates(&store, "Summer Concert", date("2026-02-15")),
        vec![date("2026-03-01")]
    );
    assert!(query::alternative_dates(&store, "Museum Tour", date("2026-02-15")).is_empty());
}
