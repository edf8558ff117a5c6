// Natural-language phrasing for time differences, used in the embed footer
// when the quoted message was edited after posting.

use chrono::Duration;

/// Express a duration in words, e.g. `"2 days, 3 hours and 10 minutes"`.
///
/// Components that are zero are skipped; `and` joins the final pair. Years
/// are counted as 365 days. Sub-second durations come out as
/// `"less than a second"`.
pub fn humanize_delta(delta: Duration) -> String {
    let mut seconds = delta.num_seconds().max(0);

    let years = seconds / (365 * 86_400);
    seconds -= years * 365 * 86_400;
    let days = seconds / 86_400;
    seconds -= days * 86_400;
    let hours = seconds / 3_600;
    seconds -= hours * 3_600;
    let minutes = seconds / 60;
    seconds -= minutes * 60;

    let mut parts = Vec::new();
    for (amount, unit) in [
        (years, "year"),
        (days, "day"),
        (hours, "hour"),
        (minutes, "minute"),
        (seconds, "second"),
    ] {
        if amount > 0 {
            let plural = if amount == 1 { "" } else { "s" };
            parts.push(format!("{} {}{}", amount, unit, plural));
        }
    }

    match parts.len() {
        0 => "less than a second".to_string(),
        1 => parts.remove(0),
        _ => {
            let last = parts.pop().unwrap_or_default();
            format!("{} and {}", parts.join(", "), last)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_unit() {
        assert_eq!(humanize_delta(Duration::seconds(5)), "5 seconds");
        assert_eq!(humanize_delta(Duration::minutes(1)), "1 minute");
        assert_eq!(humanize_delta(Duration::hours(3)), "3 hours");
    }

    #[test]
    fn two_units_joined_with_and() {
        assert_eq!(
            humanize_delta(Duration::seconds(65)),
            "1 minute and 5 seconds"
        );
    }

    #[test]
    fn many_units_use_commas_then_and() {
        let delta = Duration::days(2) + Duration::hours(3) + Duration::minutes(10);
        assert_eq!(humanize_delta(delta), "2 days, 3 hours and 10 minutes");
    }

    #[test]
    fn zero_components_are_skipped() {
        let delta = Duration::days(1) + Duration::seconds(30);
        assert_eq!(humanize_delta(delta), "1 day and 30 seconds");
    }

    #[test]
    fn years_count_as_365_days() {
        let delta = Duration::days(365 + 2);
        assert_eq!(humanize_delta(delta), "1 year and 2 days");
    }

    #[test]
    fn sub_second_durations() {
        assert_eq!(
            humanize_delta(Duration::milliseconds(300)),
            "less than a second"
        );
        assert_eq!(humanize_delta(Duration::seconds(-5)), "less than a second");
    }
}
