//! Avro binary encoding for experiment records
//!
//! Implements just the subset of the Avro binary format the experiment
//! schema needs:
//!
//! - `long` / `int`: zig-zag encoded, then 7 bits per byte, low group first,
//!   high bit set on every byte except the last
//! - `string`: `long` byte length followed by UTF-8 bytes
//! - `array<int>`: blocks of `long` count + items, closed by a zero count.
//!   A negative count is followed by a `long` block byte size (read, never
//!   written).
//!
//! Field order and types come from [`FIELDS`]. Records carry no framing,
//! so [`decode_records`] reads until the buffer is exhausted.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use super::schema::{Column, FieldType, FIELDS, MAX_DATE_YEAR, MIN_DATE_YEAR};
use crate::experiment::{ExperimentRecord, DATE_FORMAT};
use crate::{Error, Result};

/// Longest valid varint for a 64-bit value.
const MAX_VARINT_BYTES: usize = 10;

/// Append-only Avro binary writer.
#[derive(Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    /// Create an empty encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a `long`.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn write_long(&mut self, value: i64) {
        let mut n = ((value << 1) ^ (value >> 63)) as u64;
        while n >= 0x80 {
            self.buf.push((n as u8 & 0x7f) | 0x80);
            n >>= 7;
        }
        self.buf.push(n as u8);
    }

    /// Write an `int`.
    pub fn write_int(&mut self, value: i32) {
        self.write_long(i64::from(value));
    }

    /// Write a `string`.
    #[allow(clippy::cast_possible_wrap)]
    pub fn write_string(&mut self, value: &str) {
        self.write_long(value.len() as i64);
        self.buf.extend_from_slice(value.as_bytes());
    }

    /// Write an `array<int>` as a single block plus terminator.
    #[allow(clippy::cast_possible_wrap)]
    pub fn write_int_array(&mut self, values: &[i32]) {
        if !values.is_empty() {
            self.write_long(values.len() as i64);
            for &value in values {
                self.write_int(value);
            }
        }
        self.write_long(0);
    }

    /// Bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the encoder and return its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor-based Avro binary reader over a borrowed buffer.
#[derive(Debug)]
pub struct Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    /// Start reading at the beginning of `bytes`.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// True once every byte has been consumed.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Current byte offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Read a `long`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Decode` on truncation or a varint longer than 10 bytes
    #[allow(clippy::cast_possible_wrap)]
    pub fn read_long(&mut self) -> Result<i64> {
        let start = self.pos;
        let mut n: u64 = 0;
        for i in 0..MAX_VARINT_BYTES {
            let byte = *self.bytes.get(self.pos).ok_or_else(|| {
                Error::Decode(format!("truncated varint at byte offset {start}"))
            })?;
            self.pos += 1;
            n |= u64::from(byte & 0x7f) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(((n >> 1) as i64) ^ -((n & 1) as i64));
            }
        }
        Err(Error::Decode(format!("varint overflow at byte offset {start}")))
    }

    /// Read an `int`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Decode` on truncation or a value outside `i32`
    pub fn read_int(&mut self) -> Result<i32> {
        let start = self.pos;
        let value = self.read_long()?;
        i32::try_from(value)
            .map_err(|_| Error::Decode(format!("int out of range ({value}) at byte offset {start}")))
    }

    /// Read a `string`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Decode` on a negative or overlong length, or invalid UTF-8
    pub fn read_string(&mut self) -> Result<String> {
        let start = self.pos;
        let len = self.read_len()?;
        let bytes = self.take(len, start)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::Decode(format!("invalid UTF-8 string at byte offset {start}: {e}")))
    }

    /// Read an `array<int>`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Decode` on truncation or a malformed block header
    pub fn read_int_array(&mut self) -> Result<Vec<i32>> {
        let mut values = Vec::new();
        loop {
            let start = self.pos;
            let count = self.read_long()?;
            if count == 0 {
                return Ok(values);
            }
            if count < 0 {
                // Block byte size; items are still decoded one by one.
                let size = self.read_long()?;
                if size < 0 {
                    return Err(Error::Decode(format!(
                        "negative array block size at byte offset {start}"
                    )));
                }
            }
            let count = count.unsigned_abs();
            // Every int takes at least one byte.
            if count > (self.bytes.len() - self.pos) as u64 {
                return Err(Error::Decode(format!(
                    "array block of {count} items exceeds remaining input at byte offset {start}"
                )));
            }
            for _ in 0..count {
                values.push(self.read_int()?);
            }
        }
    }

    fn read_len(&mut self) -> Result<usize> {
        let start = self.pos;
        let len = self.read_long()?;
        usize::try_from(len)
            .map_err(|_| Error::Decode(format!("negative length ({len}) at byte offset {start}")))
    }

    fn take(&mut self, len: usize, start: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| {
                Error::Decode(format!(
                    "length {len} exceeds remaining input at byte offset {start}"
                ))
            })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }
}

/// Wire form of a record date, `YYYY-MM-DD` with a four-digit year.
///
/// # Errors
///
/// Returns `Error::Encode` for years outside `MIN_DATE_YEAR..=MAX_DATE_YEAR`
pub fn format_wire_date(date: NaiveDate) -> Result<String> {
    if !(MIN_DATE_YEAR..=MAX_DATE_YEAR).contains(&date.year()) {
        return Err(Error::Encode(format!(
            "date {date} is outside years {MIN_DATE_YEAR:04}-{MAX_DATE_YEAR}"
        )));
    }
    Ok(date.format(DATE_FORMAT).to_string())
}

/// Parse a wire `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `Error::Decode` unless the text is exactly ten characters and a
/// valid date in the four-digit year range
pub fn parse_wire_date(text: &str) -> Result<NaiveDate> {
    let date = if text.len() == 10 {
        NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
    } else {
        None
    };
    date.filter(|d| d.year() >= MIN_DATE_YEAR)
        .ok_or_else(|| Error::Decode(format!("invalid date {text:?}, expected YYYY-MM-DD")))
}

/// Encode one record, walking [`FIELDS`] in order.
///
/// # Errors
///
/// Returns `Error::Encode` if the id does not fit a positive Avro `long`,
/// the date year is not four digits, or a field's wire type does not fit
/// its column
pub fn encode_record(encoder: &mut Encoder, record: &ExperimentRecord) -> Result<()> {
    for field in &FIELDS {
        match (field.column, field.field_type) {
            (Column::Id, FieldType::Long) => {
                let id = i64::try_from(record.id())
                    .ok()
                    .filter(|&id| id > 0)
                    .ok_or_else(|| {
                        Error::Encode(format!(
                            "{} {} does not fit a positive Avro long",
                            field.name,
                            record.id()
                        ))
                    })?;
                encoder.write_long(id);
            }
            (Column::Name, FieldType::String) => encoder.write_string(record.name()),
            (Column::Date, FieldType::String) => {
                encoder.write_string(&format_wire_date(record.date())?);
            }
            (Column::Researcher, FieldType::String) => encoder.write_string(record.researcher()),
            (Column::Measurements, FieldType::IntArray) => {
                encoder.write_int_array(record.measurements());
            }
            (column, field_type) => {
                return Err(Error::Encode(format!(
                    "field {} cannot carry {column:?} as {}",
                    field.name,
                    field_type.as_str()
                )))
            }
        }
    }
    Ok(())
}

/// Encode records back to back, in slice order.
///
/// # Errors
///
/// Returns `Error::Encode` for the first record that cannot be encoded
pub fn encode_records(records: &[ExperimentRecord]) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new();
    for record in records {
        encode_record(&mut encoder, record)?;
    }
    Ok(encoder.into_bytes())
}

/// Record values collected while walking [`FIELDS`].
#[derive(Default)]
struct PartialRecord {
    id: Option<u64>,
    name: Option<String>,
    date: Option<NaiveDate>,
    researcher: Option<String>,
    measurements: Option<Vec<i32>>,
}

impl PartialRecord {
    fn finish(self, start: usize) -> Result<ExperimentRecord> {
        match (self.id, self.name, self.date, self.researcher, self.measurements) {
            (Some(id), Some(name), Some(date), Some(researcher), Some(measurements)) => {
                Ok(ExperimentRecord::new(id, name, date, researcher, measurements))
            }
            _ => Err(Error::Decode(format!(
                "record at byte offset {start} is missing schema fields"
            ))),
        }
    }
}

/// Decode one record starting at the decoder's position, walking
/// [`FIELDS`] in order.
///
/// # Errors
///
/// Returns `Error::Decode` if any field is malformed, the id is not
/// positive, or the date is not `YYYY-MM-DD`
pub fn decode_record(decoder: &mut Decoder<'_>) -> Result<ExperimentRecord> {
    let start = decoder.position();
    let mut partial = PartialRecord::default();

    for field in &FIELDS {
        let offset = decoder.position();
        match (field.column, field.field_type) {
            (Column::Id, FieldType::Long) => {
                let raw = decoder.read_long()?;
                let id = u64::try_from(raw).ok().filter(|&id| id > 0).ok_or_else(|| {
                    Error::Decode(format!(
                        "{} must be positive, got {raw} at byte offset {offset}",
                        field.name
                    ))
                })?;
                partial.id = Some(id);
            }
            (Column::Name, FieldType::String) => partial.name = Some(decoder.read_string()?),
            (Column::Date, FieldType::String) => {
                let text = decoder.read_string()?;
                partial.date = Some(parse_wire_date(&text)?);
            }
            (Column::Researcher, FieldType::String) => {
                partial.researcher = Some(decoder.read_string()?);
            }
            (Column::Measurements, FieldType::IntArray) => {
                partial.measurements = Some(decoder.read_int_array()?);
            }
            (column, field_type) => {
                return Err(Error::Decode(format!(
                    "field {} cannot carry {column:?} as {}",
                    field.name,
                    field_type.as_str()
                )))
            }
        }
    }

    partial.finish(start)
}

/// Decode records until `bytes` is exhausted.
///
/// # Errors
///
/// Returns `Error::Decode` on malformed or truncated input, or when two
/// records share an id
pub fn decode_records(bytes: &[u8]) -> Result<Vec<ExperimentRecord>> {
    let mut decoder = Decoder::new(bytes);
    let mut records = Vec::new();
    let mut seen = HashSet::new();

    while !decoder.is_exhausted() {
        let record = decode_record(&mut decoder)?;
        if !seen.insert(record.id()) {
            return Err(Error::Decode(format!("duplicate experiment_id {}", record.id())));
        }
        records.push(record);
    }

    Ok(records)
}
