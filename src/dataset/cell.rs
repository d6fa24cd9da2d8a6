use parquet::record::Field;
use std::fmt;

/// A dataset value, detached from the Parquet record API
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Text(String),
    Bytes(Vec<u8>),
    List(Vec<Cell>),
    /// Named fields of a struct or map value, in schema order
    Record(Vec<(String, Cell)>),
    /// Any other primitive, kept in its display form
    Scalar(String),
}

impl Cell {
    /// Short name of the value's shape, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Cell::Null => "null",
            Cell::Text(_) => "text",
            Cell::Bytes(_) => "bytes",
            Cell::List(_) => "list",
            Cell::Record(_) => "record",
            Cell::Scalar(_) => "scalar",
        }
    }

    /// Look up a named field of a record
    pub fn get(&self, key: &str) -> Option<&Cell> {
        match self {
            Cell::Record(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Field names of a record, empty for anything else
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Cell::Record(fields) => fields.iter().map(|(k, _)| k.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => write!(f, "None"),
            Cell::Text(s) | Cell::Scalar(s) => write!(f, "{}", s),
            Cell::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Cell::List(items) => write!(f, "[{} items]", items.len()),
            Cell::Record(_) => write!(f, "{{{}}}", self.keys().join(", ")),
        }
    }
}

impl From<&Field> for Cell {
    fn from(field: &Field) -> Self {
        match field {
            Field::Null => Cell::Null,
            Field::Str(s) => Cell::Text(s.clone()),
            Field::Bytes(b) => Cell::Bytes(b.data().to_vec()),
            Field::ListInternal(list) => Cell::List(list.elements().iter().map(Cell::from).collect()),
            Field::Group(row) => Cell::Record(
                row.get_column_iter()
                    .map(|(name, value)| (name.clone(), Cell::from(value)))
                    .collect(),
            ),
            Field::MapInternal(map) => Cell::Record(
                map.entries()
                    .iter()
                    .map(|(key, value)| (key_name(key), Cell::from(value)))
                    .collect(),
            ),
            other => Cell::Scalar(other.to_string()),
        }
    }
}

fn key_name(key: &Field) -> String {
    match key {
        Field::Str(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parquet::data_type::ByteArray;

    #[test]
    fn test_from_parquet_fields() {
        assert_eq!(Cell::from(&Field::Null), Cell::Null);
        assert_eq!(
            Cell::from(&Field::Str("triangle".to_string())),
            Cell::Text("triangle".to_string())
        );
        assert_eq!(
            Cell::from(&Field::Bytes(ByteArray::from(vec![0xFF, 0xD8]))),
            Cell::Bytes(vec![0xFF, 0xD8])
        );
        assert_eq!(Cell::from(&Field::Int(42)), Cell::Scalar("42".to_string()));
    }

    #[test]
    fn test_record_lookup() {
        let record = Cell::Record(vec![
            ("bytes".to_string(), Cell::Bytes(vec![1, 2, 3])),
            ("path".to_string(), Cell::Text("img/0.jpg".to_string())),
        ]);

        assert_eq!(record.keys(), vec!["bytes", "path"]);
        assert_eq!(record.get("path"), Some(&Cell::Text("img/0.jpg".to_string())));
        assert_eq!(record.get("missing"), None);
        assert_eq!(Cell::Text("x".to_string()).get("path"), None);
        assert_eq!(record.to_string(), "{bytes, path}");
        assert_eq!(record.kind(), "record");
    }
}
