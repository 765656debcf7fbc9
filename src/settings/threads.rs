/// Number of logical processors, queried once.
///
/// `num_cpus` reports 1 when the platform cannot tell.
pub fn hardware_concurrency() -> usize {
    num_cpus::get().max(1)
}

/// Turn a requested thread count into one the machine can run.
///
/// A non-positive request is subtracted from the available processors
/// (`0` = all, `-2` = all but two). The result is clamped to `[1, hardware]`.
pub fn thread_count(requested: i32, hardware_concurrency: usize) -> usize {
    let max = i64::try_from(hardware_concurrency.max(1)).unwrap_or(i64::MAX);
    let mut n = i64::from(requested);
    if n <= 0 {
        n += max;
    }
    // within [1, max], so the cast back is lossless
    n.clamp(1, max) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_means_all_cores() {
        assert_eq!(thread_count(0, 8), 8);
    }

    #[test]
    fn negative_subtracts_from_all_cores() {
        assert_eq!(thread_count(-2, 8), 6);
        assert_eq!(thread_count(-7, 8), 1);
        assert_eq!(thread_count(-8, 8), 1);
        assert_eq!(thread_count(-20, 8), 1);
    }

    #[test]
    fn positive_is_capped_by_hardware() {
        assert_eq!(thread_count(100, 4), 4);
        assert_eq!(thread_count(2, 4), 2);
        assert_eq!(thread_count(4, 4), 4);
    }

    #[test]
    fn extreme_requests_still_clamp() {
        assert_eq!(thread_count(i32::MIN, 8), 1);
        assert_eq!(thread_count(i32::MAX, 8), 8);
        assert_eq!(thread_count(i32::MIN, i32::MAX as usize), 1);
        assert_eq!(
            thread_count(i32::MIN, usize::MAX),
            (i64::MAX + i64::from(i32::MIN)) as usize
        );
        assert_eq!(thread_count(0, 0), 1);
    }

    #[test]
    fn matches_closed_form_over_a_grid() {
        for m in 1..=16usize {
            for n in -40..=40i32 {
                let m_i = m as i64;
                let n_i = i64::from(n);
                let expected = if n <= 0 {
                    (m_i + n_i).min(m_i).max(1)
                } else {
                    n_i.min(m_i).max(1)
                };
                assert_eq!(thread_count(n, m) as i64, expected, "m={m} n={n}");
            }
        }
    }

    #[test]
    fn detection_reports_at_least_one() {
        assert!(hardware_concurrency() >= 1);
    }
}
