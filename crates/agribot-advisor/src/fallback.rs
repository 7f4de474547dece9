//! Canned answers used whenever the generative-AI or weather provider is
//! unavailable.

use agribot_types::ForecastDay;

/// Keywords checked against the lowercased question, in priority order.
const KEYWORD_ANSWERS: [(&str, &str); 5] = [
    (
        "fertilizer",
        "For {crop}, consider applying balanced NPK fertilizer based on your soil test results. Current levels suggest moderate fertilization.",
    ),
    (
        "irrigation",
        "Based on current humidity and temperature, {crop} needs moderate irrigation. Water early morning or evening to reduce evaporation.",
    ),
    (
        "pest",
        "Monitor {crop} for common pests during this season. Use integrated pest management practices and organic solutions when possible.",
    ),
    (
        "harvest",
        "For {crop}, harvest timing depends on visual cues and moisture content. Check with local agricultural extension for specific guidance.",
    ),
    (
        "weather",
        "Current weather conditions are suitable for {crop}. Monitor temperature and humidity levels for optimal growth.",
    ),
];

const WEATHER_ADVICE: [&str; 6] = [
    "Monitor soil moisture levels closely",
    "Adjust irrigation schedule based on expected rainfall",
    "Prepare for temperature fluctuations",
    "Watch for pest activity during humid conditions",
    "Ensure proper drainage to prevent waterlogging",
    "Consider protective measures if extreme weather is expected",
];

/// Answer a question from the keyword table.
///
/// The first keyword contained in the lowercased question wins; questions
/// matching none get a generic answer that echoes the question.
pub fn canned_answer(question: &str, crop: &str) -> String {
    let lowered = question.to_lowercase();
    KEYWORD_ANSWERS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map_or_else(
            || {
                format!(
                    "Based on your current conditions, {crop} appears to be in good growing conditions. \
                     For specific advice about '{question}', I recommend consulting with local \
                     agricultural experts or extension services."
                )
            },
            |(_, answer)| answer.replace("{crop}", crop),
        )
}

/// Generic forecast advice for a crop.
pub fn canned_weather_advice(crop: &str) -> String {
    let mut advice = format!("Based on the weather forecast for {crop}:\n");
    for line in WEATHER_ADVICE {
        advice.push_str("\n• ");
        advice.push_str(line);
    }
    advice
}

/// The fixed five-day forecast served when live weather is unavailable.
pub fn mock_forecast() -> Vec<ForecastDay> {
    const DAYS: [(&str, &str, f64, u32, &str); 5] = [
        ("Monday", "2024-01-15", 28.5, 65, "Sunny"),
        ("Tuesday", "2024-01-16", 26.2, 70, "Partly Cloudy"),
        ("Wednesday", "2024-01-17", 24.8, 75, "Light Rain"),
        ("Thursday", "2024-01-18", 29.1, 80, "Sunny"),
        ("Friday", "2024-01-19", 31.0, 85, "Hot"),
    ];

    DAYS.iter()
        .map(|&(day, date, temp, humidity, description)| ForecastDay {
            day: day.to_owned(),
            date: date.to_owned(),
            temp,
            humidity,
            description: description.to_owned(),
            icon: "01d".to_owned(),
        })
        .collect()
}
