//! Clothing and transport advice derived from temperature and condition text.

const WET_WORDS: [&str; 3] = ["rain", "drizzle", "shower"];
const ROUGH_WORDS: [&str; 3] = ["rain", "storm", "heavy"];
const HOT_WORDS: [&str; 2] = ["hot", "sun"];

pub const COVERED_TRANSPORT: &str =
    "Use covered transport (taxi, car, or covered walkways). Avoid motorcycles and long walks.";
pub const AIR_CONDITIONED_TRANSPORT: &str =
    "Use air-conditioned transport when possible. Stay hydrated if walking.";
pub const WARM_TRANSPORT: &str =
    "Dress warmly if walking or using public transport. Consider warmer transport options.";
pub const PLEASANT_TRANSPORT: &str = "Weather is pleasant for walking or any form of transport.";

/// Used in place of transport advice when no weather snapshot is available.
pub const TRANSPORT_UNAVAILABLE: &str = "Weather data unavailable";

fn mentions_any(condition: &str, words: &[&str]) -> bool {
    words.iter().any(|word| condition.contains(word))
}

pub fn clothing_suggestions(temperature_c: f64, condition: &str) -> Vec<String> {
    let mut suggestions: Vec<&str> = if temperature_c < 10.0 {
        vec!["heavy jacket or coat", "warm layers", "scarf and gloves"]
    } else if temperature_c < 15.0 {
        vec!["light jacket or sweater", "long sleeves"]
    } else if temperature_c < 25.0 {
        vec!["light clothing", "comfortable shirt or t-shirt"]
    } else {
        vec!["light, breathable clothing", "sunscreen and hat"]
    };

    let condition = condition.to_lowercase();
    if mentions_any(&condition, &WET_WORDS) {
        suggestions.extend(["umbrella or raincoat", "waterproof shoes"]);
    } else if mentions_any(&condition, &["sun", "clear"]) {
        suggestions.push("sunglasses");
    }

    suggestions.into_iter().map(str::to_string).collect()
}

pub fn transport_suggestion(temperature_c: f64, condition: &str) -> &'static str {
    let condition = condition.to_lowercase();
    if mentions_any(&condition, &ROUGH_WORDS) {
        COVERED_TRANSPORT
    } else if mentions_any(&condition, &HOT_WORDS) && temperature_c > 30.0 {
        AIR_CONDITIONED_TRANSPORT
    } else if temperature_c < 15.0 {
        WARM_TRANSPORT
    } else {
        PLEASANT_TRANSPORT
    }
}
