//! Clipboard export formats.

use crate::model::Snapshot;

use super::TableError;

pub const CSV_HEADER: [&str; 2] = ["Parameter", "Value"];

/// Double-quotes a CSV field, doubling internal quotes.
pub fn csv_field(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Two-column CSV of `(key, displayed value)` pairs, header first,
/// `\n`-separated without a trailing newline.
pub fn to_csv<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let mut lines = vec![CSV_HEADER.join(",")];
    for (key, value) in rows {
        lines.push(format!("{},{}", csv_field(key), csv_field(&value)));
    }
    lines.join("\n")
}

/// Pretty-printed JSON of the raw snapshot.
pub fn to_json(snapshot: &Snapshot) -> Result<String, TableError> {
    serde_json::to_string_pretty(snapshot).map_err(|e| TableError::Serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    #[test]
    fn csv_quotes_every_field() {
        let csv = to_csv([("RPM", "5000".to_string()), ("Note", "a\"b".to_string())]);
        assert_eq!(csv, "Parameter,Value\n\"RPM\",\"5000\"\n\"Note\",\"a\"\"b\"");
    }

    #[test]
    fn csv_with_no_rows_is_header_only() {
        assert_eq!(to_csv(Vec::<(&str, String)>::new()), "Parameter,Value");
    }

    #[test]
    fn json_is_pretty_printed_raw_snapshot() {
        let snap: Snapshot = [("Batt_V", Value::Number(13.56789)), ("RPM", Value::Number(5000.0))]
            .into_iter()
            .collect();
        let json = to_json(&snap).unwrap();
        assert_eq!(json, "{\n  \"Batt_V\": 13.56789,\n  \"RPM\": 5000\n}");
    }
}
