use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::catalog::{CatalogError, EventCatalog};
use crate::models::{EventRecord, GroupedEvents, QueryCriteria, TimeOfDay};

type Predicate = Box<dyn Fn(&EventRecord) -> bool>;

/// Conjunction of record predicates built from a `QueryCriteria`.
pub struct EventFilter {
    predicates: Vec<Predicate>,
}

impl EventFilter {
    pub fn from_criteria(criteria: &QueryCriteria) -> Self {
        let date = criteria.date;
        let mut predicates: Vec<Predicate> = vec![Box::new(move |event| event.date == date)];

        if let Some(category) = criteria.category {
            predicates.push(Box::new(move |event| event.category == category));
        }
        // Only the cheapest tier has to fit the budget.
        if let Some(max_price) = criteria.max_price {
            predicates.push(Box::new(move |event| event.price_min <= max_price));
        }
        if let Some(time_of_day) = criteria.time_of_day {
            predicates.push(Box::new(move |event| time_of_day.contains(event.start_time)));
        }

        Self { predicates }
    }

    pub fn matches(&self, event: &EventRecord) -> bool {
        self.predicates.iter().all(|predicate| predicate(event))
    }

    pub fn apply(&self, events: Vec<EventRecord>) -> Vec<EventRecord> {
        events.into_iter().filter(|event| self.matches(event)).collect()
    }
}

pub fn query_events(
    catalog: &dyn EventCatalog,
    criteria: &QueryCriteria,
) -> Result<Vec<EventRecord>, CatalogError> {
    let events = catalog.query(criteria)?;
    debug!(
        date = %criteria.date,
        category = ?criteria.category,
        time_of_day = ?criteria.time_of_day,
        max_price = ?criteria.max_price,
        matched = events.len(),
        "event query finished"
    );
    Ok(events)
}

pub fn group_by_time_of_day(events: Vec<EventRecord>) -> GroupedEvents {
    let mut grouped: GroupedEvents = TimeOfDay::ALL
        .iter()
        .map(|bucket| (*bucket, Vec::new()))
        .collect();

    for event in events {
        grouped.entry(event.time_of_day()).or_default().push(event);
    }

    grouped
}

/// Other dates on which an event with the same name runs.
pub fn alternative_dates(
    catalog: &dyn EventCatalog,
    event_name: &str,
    original_date: NaiveDate,
) -> Vec<NaiveDate> {
    match catalog.load() {
        Ok(events) => events
            .into_iter()
            .filter(|event| event.name == event_name && event.date != original_date)
            .map(|event| event.date)
            .collect(),
        Err(err) => {
            warn!("alternative date lookup failed for {event_name}: {err}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::models::Category;
    use chrono::NaiveTime;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
    }

    fn event(id: i64, day: &str, start: &str, category: Category, price: (f64, f64)) -> EventRecord {
        EventRecord {
            id,
            name: format!("Event {id}"),
            category,
            description: "desc".to_string(),
            location: "Somewhere".to_string(),
            date: date(day),
            start_time: NaiveTime::parse_from_str(start, "%H:%M").expect("valid time"),
            end_time: NaiveTime::from_hms_opt(23, 0, 0).expect("valid time"),
            price_min: price.0,
            price_max: price.1,
            capacity: 100,
            available_spots: 50,
        }
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            event(1, "2026-02-15", "18:00", Category::Outdoor, (25.0, 50.0)),
            event(2, "2026-02-15", "10:00", Category::Indoor, (0.0, 15.0)),
            event(3, "2026-02-15", "06:00", Category::Outdoor, (10.0, 10.0)),
            event(4, "2026-02-16", "12:00", Category::Outdoor, (0.0, 0.0)),
            event(5, "2026-02-15", "11:00", Category::Indoor, (12.0, 12.0)),
            event(6, "2026-02-15", "02:00", Category::Indoor, (5.0, 5.0)),
        ])
    }

    fn ids(events: &[EventRecord]) -> Vec<i64> {
        events.iter().map(|e| e.id).collect()
    }

    #[test]
    fn no_filters_returns_date_matches_in_storage_order() {
        let events = query_events(&catalog(), &QueryCriteria::on(date("2026-02-15")))
            .expect("query succeeds");
        assert_eq!(ids(&events), vec![1, 2, 3, 5, 6]);
    }

    #[test]
    fn filters_combine_conjunctively() {
        let criteria = QueryCriteria::on(date("2026-02-15"))
            .with_category(Category::Indoor)
            .with_time_of_day(TimeOfDay::Morning)
            .with_max_price(10.0);
        let events = query_events(&catalog(), &criteria).expect("query succeeds");
        assert_eq!(ids(&events), vec![2]);
    }

    #[test]
    fn budget_checks_minimum_price_only() {
        let criteria = QueryCriteria::on(date("2026-02-15")).with_max_price(25.0);
        let events = query_events(&catalog(), &criteria).expect("query succeeds");
        assert_eq!(ids(&events), vec![1, 2, 3, 5, 6]);

        let criteria = QueryCriteria::on(date("2026-02-15")).with_max_price(9.99);
        let events = query_events(&catalog(), &criteria).expect("query succeeds");
        assert_eq!(ids(&events), vec![2, 6]);
    }

    #[test]
    fn evening_filter_skips_small_hours() {
        let criteria = QueryCriteria::on(date("2026-02-15")).with_time_of_day(TimeOfDay::Evening);
        let events = query_events(&catalog(), &criteria).expect("query succeeds");
        assert_eq!(ids(&events), vec![1]);
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let events = query_events(&catalog(), &QueryCriteria::on(date("2027-01-01")))
            .expect("query succeeds");
        assert!(events.is_empty());
    }

    #[test]
    fn grouping_materializes_every_bucket() {
        let grouped = group_by_time_of_day(Vec::new());
        assert_eq!(grouped.len(), 3);
        assert!(grouped.values().all(Vec::is_empty));
    }

    #[test]
    fn grouping_keeps_relative_order_and_puts_small_hours_in_evening() {
        let events = catalog().load().expect("load");
        let grouped = group_by_time_of_day(events);
        assert_eq!(ids(&grouped[&TimeOfDay::Morning]), vec![2, 3, 5]);
        assert_eq!(ids(&grouped[&TimeOfDay::Afternoon]), vec![4]);
        assert_eq!(ids(&grouped[&TimeOfDay::Evening]), vec![1, 6]);
        let total: usize = grouped.values().map(Vec::len).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn finds_alternative_dates_by_name() {
        let mut events = catalog().load().expect("load");
        let mut repeat = events[0].clone();
        repeat.id = 7;
        repeat.date = date("2026-02-20");
        events.push(repeat);
        let catalog = InMemoryCatalog::new(events);

        let dates = alternative_dates(&catalog, "Event 1", date("2026-02-15"));
        assert_eq!(dates, vec![date("2026-02-20")]);
        assert!(alternative_dates(&catalog, "Event 2", date("2026-02-15")).is_empty());
    }

    struct BrokenCatalog;

    impl EventCatalog for BrokenCatalog {
        fn load(&self) -> Result<Vec<EventRecord>, CatalogError> {
            Err(CatalogError::Unavailable("disk gone".to_string()))
        }
    }

    #[test]
    fn catalog_failures_surface_from_queries_but_not_alternatives() {
        let err = query_events(&BrokenCatalog, &QueryCriteria::on(date("2026-02-15")))
            .expect_err("query fails");
        assert_eq!(err.to_string(), "catalog unavailable: disk gone");
        assert!(alternative_dates(&BrokenCatalog, "Event 1", date("2026-02-15")).is_empty());
    }
}
