//! Export serializer
//!
//! Writes a header line and one fully quoted line per flat record,
//! notifying listeners after each record is written.

use crate::domain::Result;
use crate::records::{DateStyle, FlatRecord, LineCodec, DEFAULT_DELIMITER};
use std::io::Write;

type WriteListener<F> = Box<dyn FnMut(&F) + Send>;

/// Writes flat records of one type as delimited text
pub struct ExportSerializer<F: FlatRecord> {
    codec: LineCodec,
    listeners: Vec<WriteListener<F>>,
}

impl<F: FlatRecord> ExportSerializer<F> {
    /// Creates a serializer using the record type's own date style
    pub fn new(delimiter: u8) -> Self {
        Self::with_codec(LineCodec::for_record::<F>(delimiter))
    }

    pub fn with_codec(codec: LineCodec) -> Self {
        Self {
            codec,
            listeners: Vec::new(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.codec = LineCodec::new(delimiter, self.codec.style());
        self
    }

    /// Overrides the date style for every line this serializer writes
    pub fn with_date_style(mut self, style: DateStyle) -> Self {
        self.codec = LineCodec::new(self.codec.delimiter(), style);
        self
    }

    /// Registers a listener called with each record after its line is
    /// written
    pub fn on_record_written<L>(&mut self, listener: L)
    where
        L: FnMut(&F) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn codec(&self) -> LineCodec {
        self.codec
    }

    /// Writes the header and every record, returning the number of
    /// records written
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the destination cannot be written.
    pub fn write<W: Write>(&mut self, records: &[F], destination: W) -> Result<usize> {
        let mut writer = self.codec.writer(destination);
        writer.write_record(F::COLUMNS)?;

        for record in records {
            writer.write_record(self.codec.fields(record))?;
            for listener in &mut self.listeners {
                listener(record);
            }
        }

        writer.flush()?;
        Ok(records.len())
    }
}

impl<F: FlatRecord> Default for ExportSerializer<F> {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}
