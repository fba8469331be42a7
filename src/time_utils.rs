// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for visit-year formatting.

/// Separator between the first and last year of a range (U+FF5E).
pub const YEAR_RANGE_SEPARATOR: char = '～';

/// Minimum and maximum of a set of years.
pub fn year_bounds(years: impl IntoIterator<Item = i32>) -> Option<(i32, i32)> {
    years.into_iter().fold(None, |bounds, year| match bounds {
        None => Some((year, year)),
        Some((min, max)) => Some((min.min(year), max.max(year))),
    })
}

/// "2019" for a single year, "2019～2023" for a span.
pub fn format_year_range(min: i32, max: i32) -> String {
    if min == max {
        min.to_string()
    } else {
        format!("{min}{YEAR_RANGE_SEPARATOR}{max}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_bounds() {
        assert_eq!(year_bounds([2021, 2019, 2023]), Some((2019, 2023)));
        assert_eq!(year_bounds([2020]), Some((2020, 2020)));
        assert_eq!(year_bounds(std::iter::empty()), None);
    }

    #[test]
    fn test_format_year_range() {
        assert_eq!(format_year_range(2019, 2019), "2019");
        assert_eq!(format_year_range(2019, 2023), "2019～2023");
    }
}
