//! Schema command: JSON Schema of the benchmark file format.

use crate::error::Result;
use crate::model::Dataset;
use schemars::schema::RootSchema;
use schemars::schema_for;

/// JSON Schema for a benchmark file (test name -> metric set).
#[must_use]
pub fn dataset_schema() -> RootSchema {
    schema_for!(Dataset)
}

/// Execute the schema command. The schema is printed in every output mode.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn execute() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&dataset_schema())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_describes_metric_fields() {
        let json = serde_json::to_value(dataset_schema()).unwrap();
        let text = json.to_string();
        assert!(text.contains("mid_ms"));
        assert!(text.contains("avg_ms"));
        assert!(text.contains("iterations"));
        assert_eq!(json["type"], "object");
    }
}
