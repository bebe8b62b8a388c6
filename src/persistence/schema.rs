//! Wire schema for persisted experiment records
//!
//! The data file is a bare concatenation of Avro-binary records written
//! against [`EXPERIMENT_SCHEMA_JSON`]. [`FIELDS`] is the same schema in the
//! form the codec walks: the encoder writes and the decoder reads fields in
//! exactly this order, with exactly these types.

/// Avro schema (`.avsc` form) for one persisted experiment record.
pub const EXPERIMENT_SCHEMA_JSON: &str = r#"{
  "type": "record",
  "name": "Experiment",
  "fields": [
    {"name": "experiment_id", "type": "long"},
    {"name": "experiment_name", "type": "string"},
    {"name": "date", "type": "string"},
    {"name": "researcher", "type": "string"},
    {"name": "data_points", "type": {"type": "array", "items": "int"}}
  ]
}"#;

/// Earliest year a `date` field may carry (`YYYY` is exactly four digits).
pub const MIN_DATE_YEAR: i32 = 1;

/// Latest year a `date` field may carry.
pub const MAX_DATE_YEAR: i32 = 9999;

/// Avro type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// 64-bit zig-zag varint
    Long,
    /// Length-prefixed UTF-8
    String,
    /// Blocked array of 32-bit zig-zag varints
    IntArray,
}

impl FieldType {
    /// Avro type name as it appears in the schema JSON.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::String => "string",
            Self::IntArray => "array<int>",
        }
    }
}

/// Which `ExperimentRecord` value a wire field carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Record id
    Id,
    /// Experiment name
    Name,
    /// Date as `YYYY-MM-DD`
    Date,
    /// Researcher
    Researcher,
    /// Measurements
    Measurements,
}

/// One schema field: wire name, wire type and the record value it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Wire field name
    pub name: &'static str,
    /// Wire type
    pub field_type: FieldType,
    /// Record value
    pub column: Column,
}

/// Fields in encoding order.
pub const FIELDS: [Field; 5] = [
    Field {
        name: "experiment_id",
        field_type: FieldType::Long,
        column: Column::Id,
    },
    Field {
        name: "experiment_name",
        field_type: FieldType::String,
        column: Column::Name,
    },
    Field {
        name: "date",
        field_type: FieldType::String,
        column: Column::Date,
    },
    Field {
        name: "researcher",
        field_type: FieldType::String,
        column: Column::Researcher,
    },
    Field {
        name: "data_points",
        field_type: FieldType::IntArray,
        column: Column::Measurements,
    },
];
