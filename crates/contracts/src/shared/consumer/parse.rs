use super::record::ConsumerRecord;
use crate::shared::analytics::error::DataLoadError;

/// Result of reading the dataset body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRecords {
    pub records: Vec<ConsumerRecord>,
    /// Array items that were not JSON objects
    pub skipped: usize,
}

/// Parse the dataset file.
///
/// The only shape check is "the document is an array". Items that are not
/// objects are skipped and counted; field level problems are absorbed by
/// [`ConsumerRecord`] itself.
pub fn parse_records(body: &str) -> Result<ParsedRecords, DataLoadError> {
    let document: serde_json::Value =
        serde_json::from_str(body).map_err(|e| DataLoadError::Parse(e.to_string()))?;

    let serde_json::Value::Array(items) = document else {
        return Err(DataLoadError::NotAnArray);
    };

    let mut parsed = ParsedRecords {
        records: Vec::with_capacity(items.len()),
        skipped: 0,
    };

    for item in items {
        if !item.is_object() {
            parsed.skipped += 1;
            continue;
        }
        match serde_json::from_value::<ConsumerRecord>(item) {
            Ok(record) => parsed.records.push(record),
            Err(_) => parsed.skipped += 1,
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array() {
        let body = r#"[
            {"region": "North", "average_spend_inr": 100},
            {"region": "South", "average_spend_inr": 200}
        ]"#;
        let parsed = parse_records(body).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.records[1].region.as_deref(), Some("South"));
    }

    #[test]
    fn test_non_objects_are_skipped() {
        let body = r#"[{"region": "North"}, 42, "x", null, {}]"#;
        let parsed = parse_records(body).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.skipped, 3);
    }

    #[test]
    fn test_not_an_array() {
        assert_eq!(
            parse_records(r#"{"records": []}"#),
            Err(DataLoadError::NotAnArray)
        );
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_records("[{"),
            Err(DataLoadError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_array() {
        let parsed = parse_records("[]").unwrap();
        assert!(parsed.records.is_empty());
    }
}
