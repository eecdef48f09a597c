use crate::utils::closest::closest;

/// Abbreviated month names as they appear in the schedule headers, January first.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "янв", "фев", "мар", "апр", "май", "июн", "июл", "авг", "сен", "окт", "ноя", "дек",
];

/// Day and month parsed from a header cell such as `15.янв` or `03.10`.
///
/// Headers that cannot be read yield [`HeaderDate::UNPARSED`] (`-1`, `-1`)
/// instead of an error. Consumers must not use such a date for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderDate {
    pub day: i64,
    pub month: i64,
}

impl HeaderDate {
    /// Sentinel for a header that is not a `day.month` date.
    pub const UNPARSED: HeaderDate = HeaderDate { day: -1, month: -1 };

    pub fn is_parsed(&self) -> bool {
        *self != Self::UNPARSED
    }
}

/// Parses a `D.Mon` header. The month part is read from its first three
/// characters, either as a number or by fuzzy lookup in [`MONTH_ABBREVIATIONS`].
pub fn parse_header_date(text: &str) -> HeaderDate {
    let mut parts = text.split('.');

    let day = match parts.next().map(str::trim).map(str::parse::<i64>) {
        Some(Ok(day)) => day,
        _ => return HeaderDate::UNPARSED,
    };

    let Some(month_part) = parts.next() else {
        return HeaderDate::UNPARSED;
    };

    let month_text: String = month_part.chars().take(3).collect();
    let month = if !month_text.is_empty() && month_text.chars().all(|c| c.is_ascii_digit()) {
        match month_text.parse::<i64>() {
            Ok(month) => month,
            Err(_) => return HeaderDate::UNPARSED,
        }
    } else {
        month_from_name(&month_text)
    };

    HeaderDate { day, month }
}

/// Resolves a (possibly misspelled) month abbreviation to 1..=12.
pub fn month_from_name(name: &str) -> i64 {
    closest(MONTH_ABBREVIATIONS, name)
        .and_then(|abbr| MONTH_ABBREVIATIONS.iter().position(|m| *m == abbr))
        .map_or(1, |index| index as i64 + 1)
}
