use std::collections::VecDeque;

use chrono::{Datelike as _, NaiveDate};

/// Balance a list of tag pills for display: sort by length, then interleave
/// from both ends starting with the longest, alternating the pick order each
/// round. The input is left untouched.
pub fn zig_zag_sort(pills: &[String]) -> Vec<String> {
    let mut sorted = pills.to_vec();
    sorted.sort_by_key(String::len);

    let mut remaining: VecDeque<String> = sorted.into();
    let mut result = Vec::with_capacity(pills.len());
    let mut flip = true;

    while !remaining.is_empty() {
        if flip {
            if let Some(pill) = remaining.pop_back() {
                result.push(pill);
            }
            if let Some(pill) = remaining.pop_front() {
                result.push(pill);
            }
        } else {
            if let Some(pill) = remaining.pop_front() {
                result.push(pill);
            }
            if let Some(pill) = remaining.pop_back() {
                result.push(pill);
            }
        }
        flip = !flip;
    }

    result
}

/// Whole years elapsed since April 1, 2019, clamped at zero for earlier
/// dates.
pub fn years_of_experience(reference: NaiveDate) -> i32 {
    let year_diff = reference.year() - 2019;
    let reached_anniversary = (reference.month(), reference.day()) >= (4, 1);

    let years = if reached_anniversary {
        year_diff
    } else {
        year_diff - 1
    };
    years.max(0)
}

pub fn years_of_experience_from_ymd(year: i32, month: u32, day: u32) -> anyhow::Result<i32> {
    let reference = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow::anyhow!("Invalid date provided"))?;
    Ok(years_of_experience(reference))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pills(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    #[test]
    fn zig_zag_alternates_longest_and_shortest() {
        let input = pills(&["short", "a", "medium", "verylongstring", "mid"]);
        assert_eq!(
            zig_zag_sort(&input),
            pills(&["verylongstring", "a", "mid", "medium", "short"])
        );
    }

    #[test]
    fn zig_zag_handles_empty_and_single_inputs() {
        assert_eq!(zig_zag_sort(&[]), Vec::<String>::new());
        assert_eq!(zig_zag_sort(&pills(&["solo"])), pills(&["solo"]));
    }

    #[test]
    fn zig_zag_handles_even_counts() {
        let input = pills(&["1", "22", "333", "4444"]);
        assert_eq!(zig_zag_sort(&input), pills(&["4444", "1", "22", "333"]));
    }

    #[test]
    fn zig_zag_output_is_a_permutation_of_the_input() {
        let input = pills(&["JavaScript", "AI", "MongoDB", "Data Modeling", "AWS"]);
        let output = zig_zag_sort(&input);

        let mut sorted_input = input.clone();
        sorted_input.sort();
        let mut sorted_output = output.clone();
        sorted_output.sort();
        assert_eq!(sorted_input, sorted_output);

        assert_eq!(
            output,
            pills(&["Data Modeling", "AI", "AWS", "JavaScript", "MongoDB"])
        );
    }

    #[test]
    fn zig_zag_does_not_mutate_its_input() {
        let input = pills(&["c", "bb", "aaa"]);
        let before = input.clone();
        let _ = zig_zag_sort(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn experience_is_anchored_at_april_2019() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).expect("valid date");
        assert_eq!(years_of_experience(date(2019, 3, 31)), 0);
        assert_eq!(years_of_experience(date(2019, 4, 1)), 0);
        assert_eq!(years_of_experience(date(2020, 3, 31)), 0);
        assert_eq!(years_of_experience(date(2020, 4, 1)), 1);
        assert_eq!(years_of_experience(date(2025, 4, 1)), 6);
    }

    #[test]
    fn invalid_dates_are_rejected() {
        let err = years_of_experience_from_ymd(2024, 2, 30).unwrap_err();
        assert_eq!(err.to_string(), "Invalid date provided");
    }
}
