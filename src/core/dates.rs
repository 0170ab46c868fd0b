use chrono::NaiveDate;

/// Length of a closed date range in days, zero for empty or inverted ranges
#[inline]
pub fn range_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().max(0)
}

/// Number of days shared by two date ranges, zero when they are disjoint
#[inline]
pub fn overlap_days(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> i64 {
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    range_days(start, end)
}

/// Fraction of the shorter of the two ranges covered by their intersection
///
/// A candidate fully inside the query window, or fully covering it, yields
/// `1.0`. A zero-length query window always yields `0.0`.
///
/// # Returns
/// Overlap ratio in `0.0..=1.0`
pub fn overlap_percent(
    query_start: NaiveDate,
    query_end: NaiveDate,
    candidate_start: NaiveDate,
    candidate_end: NaiveDate,
) -> f64 {
    let query_days = range_days(query_start, query_end);
    if query_days == 0 {
        return 0.0;
    }

    let base = query_days.min(range_days(candidate_start, candidate_end));
    if base == 0 {
        return 0.0;
    }

    let overlap = overlap_days(query_start, query_end, candidate_start, candidate_end);
    (overlap as f64 / base as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    #[test]
    fn test_disjoint_ranges() {
        assert_eq!(overlap_days(d(6, 1), d(6, 10), d(7, 1), d(7, 5)), 0);
        assert_eq!(overlap_percent(d(6, 1), d(6, 10), d(7, 1), d(7, 5)), 0.0);
    }

    #[test]
    fn test_contained_candidate_is_full_overlap() {
        assert_eq!(overlap_percent(d(6, 1), d(6, 10), d(6, 3), d(6, 8)), 1.0);
    }

    #[test]
    fn test_covering_candidate_is_full_overlap() {
        assert_eq!(overlap_percent(d(6, 3), d(6, 8), d(6, 1), d(6, 30)), 1.0);
    }

    #[test]
    fn test_partial_overlap() {
        // 10-day window, candidate shares 5 of its 10 days
        let percent = overlap_percent(d(6, 1), d(6, 11), d(6, 6), d(6, 16));
        assert!((percent - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_length_query() {
        assert_eq!(overlap_percent(d(6, 5), d(6, 5), d(6, 1), d(6, 10)), 0.0);
    }

    #[test]
    fn test_inverted_range_counts_as_empty() {
        assert_eq!(range_days(d(6, 10), d(6, 1)), 0);
        assert_eq!(overlap_percent(d(6, 1), d(6, 10), d(6, 8), d(6, 2)), 0.0);
    }
}
