//! Validation helpers for benchmark data.
//!
//! These routines enforce metric value constraints and return structured
//! validation errors without touching the filesystem.

use crate::error::ValidationError;
use crate::model::{Dataset, MetricSet};

/// Validates metric values for a single test item.
pub struct MetricSetValidator;

impl MetricSetValidator {
    /// Validate one item's metrics; field names are prefixed with `item`.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any value is negative or not finite.
    pub fn validate(item: &str, metrics: &MetricSet) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (name, value) in metrics.float_fields() {
            let Some(value) = value else { continue };
            if !value.is_finite() {
                errors.push(ValidationError::new(
                    format!("{item}.{name}"),
                    "must be finite",
                ));
            } else if value < 0.0 {
                errors.push(ValidationError::new(
                    format!("{item}.{name}"),
                    "must be non-negative",
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Validates every item of a dataset.
pub struct DatasetValidator;

impl DatasetValidator {
    /// Validate a dataset and return all validation errors found.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any item violates a rule.
    pub fn validate(dataset: &Dataset) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (item, metrics) in dataset {
            if item.trim().is_empty() {
                errors.push(ValidationError::new("<item>", "name cannot be empty"));
            }
            if let Err(mut item_errors) = MetricSetValidator::validate(item, metrics) {
                errors.append(&mut item_errors);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(entries: &[(&str, MetricSet)]) -> Dataset {
        entries
            .iter()
            .map(|(name, metrics)| ((*name).to_string(), metrics.clone()))
            .collect()
    }

    #[test]
    fn accepts_well_formed_dataset() {
        let data = dataset(&[
            ("parse", MetricSet::with_mid(1.25)),
            (
                "render",
                MetricSet {
                    mid_ms: Some(0.0),
                    std_dev: Some(0.1),
                    iterations: Some(100),
                    ..MetricSet::default()
                },
            ),
        ]);
        assert!(DatasetValidator::validate(&data).is_ok());
    }

    #[test]
    fn empty_dataset_is_valid() {
        assert!(DatasetValidator::validate(&Dataset::new()).is_ok());
    }

    #[test]
    fn rejects_negative_values() {
        let data = dataset(&[(
            "io",
            MetricSet {
                mid_ms: Some(-1.0),
                max_ms: Some(-0.5),
                ..MetricSet::default()
            },
        )]);
        let errors = DatasetValidator::validate(&data).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["io.mid_ms", "io.max_ms"]);
        assert!(errors.iter().all(|e| e.message == "must be non-negative"));
    }

    #[test]
    fn rejects_non_finite_values() {
        let metrics = MetricSet {
            cv: Some(f64::NAN),
            ..MetricSet::default()
        };
        let errors = MetricSetValidator::validate("t", &metrics).unwrap_err();
        assert_eq!(errors, vec![ValidationError::new("t.cv", "must be finite")]);
    }

    #[test]
    fn rejects_blank_item_name() {
        let data = dataset(&[("  ", MetricSet::with_mid(1.0))]);
        assert!(DatasetValidator::validate(&data).is_err());
    }
}
