use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Connection, Row};
use tracing::{debug, info};

use crate::catalog::{CatalogError, EventCatalog};
use crate::models::{Category, EventRecord, QueryCriteria};
use crate::query::EventFilter;
use crate::utils;

const TIME_FORMAT: &str = "%H:%M";
const CREATE_EVENTS: &str = "CREATE TABLE IF NOT EXISTS events(
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    type TEXT NOT NULL,
    description TEXT NOT NULL,
    location TEXT NOT NULL,
    date TEXT NOT NULL,
    start_time TEXT NOT NULL,
    end_time TEXT NOT NULL,
    price_min REAL NOT NULL,
    price_max REAL NOT NULL,
    capacity INTEGER NOT NULL,
    available_spots INTEGER NOT NULL
);";
const EVENT_COLUMNS: &str = "id, name, type, description, location, date, start_time, end_time, \
                             price_min, price_max, capacity, available_spots";

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open_default() -> Result<Self, CatalogError> {
        let path = utils::database_path();
        Self::open(&path)
    }

    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        utils::ensure_parent(path);
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, CatalogError> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> rusqlite::Result<()> {
        self.conn.execute_batch(CREATE_EVENTS)
    }

    /// Drops the catalog and reloads it with `events`. Ids are assigned in
    /// insertion order, ignoring the ids on the input records.
    pub fn rebuild(&mut self, events: &[EventRecord]) -> Result<usize, CatalogError> {
        let tx = self.conn.transaction()?;
        tx.execute_batch("DROP TABLE IF EXISTS events;")?;
        tx.execute_batch(CREATE_EVENTS)?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO events (name, type, description, location, date, start_time, end_time,
                                     price_min, price_max, capacity, available_spots)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for event in events {
                stmt.execute(params![
                    event.name,
                    event.category.as_str(),
                    event.description,
                    event.location,
                    event.date,
                    event.start_time.format(TIME_FORMAT).to_string(),
                    event.end_time.format(TIME_FORMAT).to_string(),
                    event.price_min,
                    event.price_max,
                    event.capacity,
                    // never store more spots than the venue holds
                    event.available_spots.clamp(0, event.capacity.max(0)),
                ])?;
            }
        }
        tx.commit()?;
        info!(count = events.len(), "event catalog rebuilt");
        Ok(events.len())
    }

    fn select(&self, sql: &str, date: Option<NaiveDate>) -> Result<Vec<EventRecord>, CatalogError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = match date {
            Some(date) => stmt.query_map(params![date], read_row)?,
            None => stmt.query_map([], read_row)?,
        };

        let mut out = Vec::new();
        for row in rows {
            out.push(row??);
        }
        Ok(out)
    }
}

impl EventCatalog for Store {
    fn load(&self) -> Result<Vec<EventRecord>, CatalogError> {
        self.select(
            &format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY id"),
            None,
        )
    }

    fn query(&self, criteria: &QueryCriteria) -> Result<Vec<EventRecord>, CatalogError> {
        let on_date = self.select(
            &format!("SELECT {EVENT_COLUMNS} FROM events WHERE date = ?1 ORDER BY id"),
            Some(criteria.date),
        )?;
        debug!(date = %criteria.date, rows = on_date.len(), "loaded events for date");
        Ok(EventFilter::from_criteria(criteria).apply(on_date))
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<Result<EventRecord, CatalogError>> {
    let id: i64 = row.get(0)?;
    let category: String = row.get(2)?;
    let start: String = row.get(6)?;
    let end: String = row.get(7)?;

    let category = match category.parse::<Category>() {
        Ok(category) => category,
        Err(reason) => return Ok(Err(CatalogError::Corrupt { id, reason })),
    };
    let (start_time, end_time) = match (parse_time(&start), parse_time(&end)) {
        (Ok(start), Ok(end)) => (start, end),
        (Err(reason), _) | (_, Err(reason)) => return Ok(Err(CatalogError::Corrupt { id, reason })),
    };

    Ok(Ok(EventRecord {
        id,
        name: row.get(1)?,
        category,
        description: row.get(3)?,
        location: row.get(4)?,
        date: row.get(5)?,
        start_time,
        end_time,
        price_min: row.get(8)?,
        price_max: row.get(9)?,
        capacity: row.get(10)?,
        available_spots: row.get(11)?,
    }))
}

fn parse_time(text: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(text.trim(), TIME_FORMAT)
        .map_err(|err| format!("bad time {text:?}: {err}"))
}

/// The demo catalog loaded by `setup`.
pub fn sample_events() -> Vec<EventRecord> {
    vec![
        sample_event("Summer Concert", Category::Outdoor, "Live music in the park", "Central Park", "2026-02-15", ("18:00", "22:00"), (25.0, 50.0), (500, 120)),
        sample_event("Art Exhibition", Category::Indoor, "Modern art showcase", "City Gallery", "2026-02-15", ("10:00", "18:00"), (0.0, 15.0), (200, 200)),
        sample_event("Morning Yoga", Category::Outdoor, "Sunrise yoga session", "Beach Park", "2026-02-15", ("06:00", "07:30"), (10.0, 10.0), (30, 8)),
        sample_event("Food Festival", Category::Outdoor, "International cuisine", "Waterfront", "2026-02-16", ("12:00", "20:00"), (0.0, 0.0), (1000, 850)),
        sample_event("Theater Show", Category::Indoor, "Classical drama", "Grand Theater", "2026-02-16", ("19:30", "21:30"), (40.0, 80.0), (300, 45)),
        sample_event("Cooking Workshop", Category::Indoor, "Learn Italian cuisine", "Culinary Studio", "2026-02-16", ("14:00", "17:00"), (60.0, 60.0), (15, 3)),
        sample_event("Night Market", Category::Outdoor, "Street food and crafts", "Downtown Square", "2026-02-16", ("18:00", "23:00"), (0.0, 0.0), (2000, 2000)),
        sample_event("Museum Tour", Category::Indoor, "Guided historical tour", "National Museum", "2026-02-15", ("11:00", "13:00"), (12.0, 12.0), (50, 22)),
    ]
}

#[allow(clippy::too_many_arguments)]
fn sample_event(
    name: &str,
    category: Category,
    description: &str,
    location: &str,
    date: &str,
    times: (&str, &str),
    price: (f64, f64),
    spots: (i64, i64),
) -> EventRecord {
    EventRecord {
        id: 0,
        name: name.to_string(),
        category,
        description: description.to_string(),
        location: location.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("sample date"),
        start_time: NaiveTime::parse_from_str(times.0, TIME_FORMAT).expect("sample start"),
        end_time: NaiveTime::parse_from_str(times.1, TIME_FORMAT).expect("sample end"),
        price_min: price.0,
        price_max: price.1,
        capacity: spots.0,
        available_spots: spots.1,
    }
}
