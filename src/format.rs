use std::fmt::Write as _;

use crate::models::{Category, EventRecord, GroupedEvents, RecommendationContext, TimeOfDay, WeatherSnapshot};

const BOX_WIDTH: usize = 66;
const RULE_WIDTH: usize = 70;

/// Appended to the context document so the generator answers in short bullets.
pub const RECOMMENDATION_INSTRUCTIONS: &str = "IMPORTANT: Provide CONCISE and BULLETED recommendations:

TOP RECOMMENDATIONS:
- List each recommended event with brief reasoning
- Keep each bullet point to 1-2 sentences maximum
- Mention booking urgency if relevant (limited spots)
- Include why it's good based on weather/time/price
- Use exact event names and times

Format: Simple bullet points, no long paragraphs or elaborate sections.";

pub const WEATHER_UNAVAILABLE: &str = "Weather data unavailable\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Good,
    Limited,
    AlmostFull,
    SoldOut,
}

impl Availability {
    pub fn label(&self) -> &'static str {
        match self {
            Availability::Good => "Good availability",
            Availability::Limited => "Limited spots",
            Availability::AlmostFull => "Almost full - BOOK NOW!",
            Availability::SoldOut => "SOLD OUT",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Availability::Good => "✅",
            Availability::Limited => "⚠️",
            Availability::AlmostFull => "🔴",
            Availability::SoldOut => "❌",
        }
    }
}

pub fn availability_status(available: i64, capacity: i64) -> Availability {
    let pct = if capacity > 0 {
        available as f64 / capacity as f64 * 100.0
    } else {
        0.0
    };

    if pct > 50.0 {
        Availability::Good
    } else if pct > 20.0 {
        Availability::Limited
    } else if pct > 0.0 {
        Availability::AlmostFull
    } else {
        Availability::SoldOut
    }
}

pub fn price_label(price_min: f64, price_max: f64) -> String {
    if price_min == 0.0 && price_max == 0.0 {
        "FREE".to_string()
    } else if price_min == price_max {
        format!("${price_min:.0}")
    } else {
        format!("${price_min:.0}-${price_max:.0}")
    }
}

/// First match wins, so "partly cloudy" has to be tested before "cloudy".
pub fn weather_icon(condition: &str) -> &'static str {
    let condition = condition.to_lowercase();
    let has = |word: &str| condition.contains(word);

    if has("sun") || has("clear") {
        "☀️"
    } else if has("partly cloud") {
        "⛅"
    } else if has("cloudy") || has("overcast") {
        "☁️"
    } else if has("rain") || has("drizzle") {
        "🌧️"
    } else if has("storm") || has("thunder") {
        "⛈️"
    } else if has("snow") {
        "❄️"
    } else if has("fog") || has("mist") {
        "🌫️"
    } else {
        "🌤️"
    }
}

pub fn temperature_icon(temperature_c: f64) -> &'static str {
    match temperature_c {
        t if t < 10.0 => "🥶",
        t if t < 15.0 => "❄️",
        t if t < 20.0 => "😊",
        t if t < 25.0 => "☺️",
        t if t < 30.0 => "😎",
        _ => "🥵",
    }
}

pub fn temperature_label(temperature_c: f64) -> &'static str {
    match temperature_c {
        t if t < 10.0 => "Very Cold",
        t if t < 15.0 => "Cold",
        t if t < 20.0 => "Cool",
        t if t < 25.0 => "Pleasant",
        t if t < 30.0 => "Warm",
        t if t < 35.0 => "Hot",
        _ => "Very Hot",
    }
}

pub fn category_icon(category: Category) -> &'static str {
    match category {
        Category::Indoor => "🏠",
        Category::Outdoor => "🌳",
    }
}

pub fn time_of_day_icon(time_of_day: TimeOfDay) -> &'static str {
    match time_of_day {
        TimeOfDay::Morning => "🌅",
        TimeOfDay::Afternoon => "☀️",
        TimeOfDay::Evening => "🌙",
    }
}

pub fn render_weather_box(
    weather: Option<&WeatherSnapshot>,
    location: &str,
    date: &str,
    clothing: &[String],
    transport: &str,
) -> String {
    let Some(weather) = weather else {
        return WEATHER_UNAVAILABLE.to_string();
    };

    let icon = weather_icon(&weather.condition);
    let humidity = weather
        .humidity_percent
        .map(|h| h.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let wind = weather
        .wind_kph
        .map(|w| format!("{w:.1}"))
        .unwrap_or_else(|| "N/A".to_string());
    let border = "═".repeat(BOX_WIDTH);

    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "╔{border}╗");
    let _ = writeln!(out, "║  {icon}  WEATHER CONDITIONS  {icon}");
    let _ = writeln!(out, "╠{border}╣");
    let _ = writeln!(out, "║  📍 Location: {location}");
    let _ = writeln!(out, "║  📅 Date: {date}");
    let _ = writeln!(
        out,
        "║  🌡️  Temperature: {:.1}°C {} ({})",
        weather.temperature_c,
        temperature_icon(weather.temperature_c),
        temperature_label(weather.temperature_c)
    );
    let _ = writeln!(out, "║  🌡️  Feels Like: {:.1}°C", weather.feels_like_c);
    let _ = writeln!(out, "║  🌤️  Condition: {}", weather.condition);
    let _ = writeln!(out, "║  💧 Humidity: {humidity}%");
    let _ = writeln!(out, "║  💨 Wind Speed: {wind} km/h");
    let _ = writeln!(out, "╠{border}╣");
    let _ = writeln!(out, "║  👔 WHAT TO WEAR:");
    for item in clothing {
        let _ = writeln!(out, "║     • {item}");
    }
    let _ = writeln!(out, "╠{border}╣");
    let _ = writeln!(out, "║  🚗 TRANSPORT ADVICE:");
    let _ = writeln!(out, "║     {transport}");
    let _ = writeln!(out, "╚{border}╝");
    out
}

fn render_event(out: &mut String, event: &EventRecord) {
    let price = if event.is_free() {
        format!("{} 🎉", price_label(event.price_min, event.price_max))
    } else {
        price_label(event.price_min, event.price_max)
    };
    let status = availability_status(event.available_spots, event.capacity);

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {} {} ({})",
        category_icon(event.category),
        event.name,
        event.category.as_str().to_uppercase()
    );
    let _ = writeln!(out, "     {}", event.description);
    let _ = writeln!(out, "     📍 {}", event.location);
    let _ = writeln!(
        out,
        "     ⏰ {} - {}",
        event.start_time.format("%H:%M"),
        event.end_time.format("%H:%M")
    );
    let _ = writeln!(out, "     💰 {price}");
    let _ = writeln!(
        out,
        "     👥 {} {} ({}/{} spots available)",
        status.icon(),
        status.label(),
        event.available_spots,
        event.capacity
    );
}

/// Event listing by bucket, morning first. Empty buckets are left out.
pub fn render_event_groups(grouped: &GroupedEvents) -> String {
    let border = "═".repeat(BOX_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "╔{border}╗");
    let _ = writeln!(out, "║  📅 EVENTS GROUPED BY TIME OF DAY");
    let _ = writeln!(out, "╚{border}╝");

    for bucket in TimeOfDay::ALL {
        let events = match grouped.get(&bucket) {
            Some(events) if !events.is_empty() => events,
            _ => continue,
        };
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} {}",
            time_of_day_icon(bucket),
            bucket.as_str().to_uppercase()
        );
        let _ = writeln!(out, "{}", "─".repeat(RULE_WIDTH));
        for event in events {
            render_event(&mut out, event);
        }
    }

    out
}

pub fn render_weather(context: &RecommendationContext) -> String {
    render_weather_box(
        context.weather.as_ref(),
        &context.location,
        &context.date.format("%Y-%m-%d").to_string(),
        &context.clothing,
        &context.transport,
    )
}

/// Weather block followed by the grouped event listing. Same context, same
/// bytes.
pub fn render_context(context: &RecommendationContext) -> String {
    format!(
        "{}\n{}",
        render_weather(context),
        render_event_groups(&context.grouped_events)
    )
}
