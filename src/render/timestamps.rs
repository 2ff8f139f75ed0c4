use chrono::{NaiveDate, NaiveDateTime};

/// Day separator label: "8 March 2021"
pub fn format_day(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Meta header timestamp: "08 Mar 2021, 14:05"
pub fn format_meta_time(datetime: &NaiveDateTime) -> String {
    datetime.format("%d %b %Y, %H:%M").to_string()
}

/// Clock time only, for compact layouts: "14:05"
pub fn format_clock(datetime: &NaiveDateTime) -> String {
    datetime.format("%H:%M").to_string()
}
