use chrono::{DateTime, Datelike, Local, Utc};

/// Message time in local time, shortened by age:
/// - Same day: "14:05"
/// - Same year: "Jan 15 14:05"
/// - Older: "Dec 3, 2024"
pub fn format_message_time(timestamp: &DateTime<Utc>) -> String {
    format_relative_to(&timestamp.with_timezone(&Local), &Local::now())
}

fn format_relative_to<Tz: chrono::TimeZone>(timestamp: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if timestamp.date_naive() == now.date_naive() {
        timestamp.format("%H:%M").to_string()
    } else if timestamp.year() == now.year() {
        timestamp.format("%b %-d %H:%M").to_string()
    } else {
        timestamp.format("%b %-d, %Y").to_string()
    }
}
