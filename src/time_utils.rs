/// Axis label for an Alpha Vantage timestamp (`YYYY-MM-DD HH:MM:SS`).
///
/// - same day as `previous` -> `HH:MM`
/// - first label or new day -> `MM-DD HH:MM`
/// - anything without a date part is shortened to its first five characters
pub fn format_time_label(timestamp: &str, previous: Option<&str>) -> String {
    let Some((date, time)) = timestamp.split_once(' ') else {
        return timestamp.chars().take(5).collect();
    };
    let hhmm: String = time.chars().take(5).collect();
    let same_day = previous.and_then(|p| p.split_once(' ')).is_some_and(|(d, _)| d == date);
    if same_day {
        hhmm
    } else {
        let month_day = date.get(5..).unwrap_or(date);
        format!("{} {}", month_day, hhmm)
    }
}

/// Labels for the given sample indices, each compared with the previous label shown.
pub fn format_time_labels(timestamps: &[&str], indices: &[usize]) -> Vec<String> {
    let mut previous: Option<&str> = None;
    indices
        .iter()
        .filter_map(|&i| timestamps.get(i).copied())
        .map(|ts| {
            let label = format_time_label(ts, previous);
            previous = Some(ts);
            label
        })
        .collect()
}
