//! Property-based tests for float truncation and change classification.
//!
//! Uses proptest to verify that:
//! - Truncation never rounds away from zero and is idempotent
//! - The sign of a percent change follows the direction of the change
//! - Classification is symmetric around the unchanged band
//! - Merging a dataset with itself replaces nothing

use proptest::prelude::*;
use tracing::info;

use perfbase::merge::merge_datasets;
use perfbase::model::{ChangeType, Dataset, MetricSet, percent_change};
use perfbase::util::truncate_f64;

/// Initialize test logging for proptest
fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        ..Default::default()
    })]

    /// Property: truncation never increases magnitude
    #[test]
    fn truncation_never_rounds_up(value in -1.0e6f64..1.0e6f64, decimals in 0u32..=10u32) {
        init_test_logging();
        let truncated = truncate_f64(value, decimals);
        prop_assert!(truncated.abs() <= value.abs(), "{value} -> {truncated}");
        prop_assert!(truncated == 0.0 || truncated.signum() == value.signum());
    }

    /// Property: truncating twice is the same as once
    #[test]
    fn truncation_is_idempotent(value in -1.0e6f64..1.0e6f64, decimals in 0u32..=10u32) {
        let once = truncate_f64(value, decimals);
        prop_assert_eq!(truncate_f64(once, decimals), once);
    }

    /// Property: truncation error is below one unit of the last kept digit
    #[test]
    fn truncation_error_is_bounded(value in -1.0e4f64..1.0e4f64, decimals in 1u32..=8u32) {
        let truncated = truncate_f64(value, decimals);
        let unit = 10f64.powi(-i32::try_from(decimals).unwrap());
        prop_assert!((value - truncated).abs() < unit + 1e-9);
    }

    /// Property: the sign of the percent change follows the direction
    #[test]
    fn percent_change_sign_follows_direction(base in 0.001f64..1.0e5, new in 0.0f64..1.0e5) {
        let pc = percent_change(base, new);
        if new < base {
            prop_assert!(pc < 0.0);
        } else if new > base {
            prop_assert!(pc > 0.0);
        } else {
            prop_assert!(pc == 0.0);
        }
    }

    /// Property: classification depends only on magnitude and sign
    #[test]
    fn classification_is_symmetric(pc in 0.001f64..100.0, threshold in 0.0f64..5.0) {
        let up = ChangeType::classify(pc, threshold);
        let down = ChangeType::classify(-pc, threshold);
        if pc < threshold {
            prop_assert_eq!(up, ChangeType::Unchanged);
            prop_assert_eq!(down, ChangeType::Unchanged);
        } else {
            prop_assert_eq!(up, ChangeType::Regressed);
            prop_assert_eq!(down, ChangeType::Improved);
        }
    }

    /// Property: merging a dataset with itself replaces nothing
    #[test]
    fn self_merge_is_identity(mids in prop::collection::vec(0.0f64..1.0e4, 0..20)) {
        let dataset: Dataset = mids
            .iter()
            .enumerate()
            .map(|(i, mid)| (format!("test_{i}"), MetricSet::with_mid(*mid)))
            .collect();
        let outcome = merge_datasets(&dataset, &dataset);
        prop_assert!(outcome.replaced.is_empty());
        prop_assert!(outcome.enriched.is_empty());
        prop_assert_eq!(outcome.dataset, dataset);
        info!(items = mids.len(), "self merge checked");
    }
}

#[test]
fn classification_boundary_counts_as_changed() {
    assert_eq!(ChangeType::classify(0.1, 0.1), ChangeType::Regressed);
    assert_eq!(ChangeType::classify(-0.1, 0.1), ChangeType::Improved);
    assert_eq!(ChangeType::classify(0.099_999, 0.1), ChangeType::Unchanged);
}
