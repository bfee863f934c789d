//! RDB writer
//!
//! Wraps a raw output stream, writes the fixed header block once and counts
//! data rows. It knows nothing about storage or the network.

use crate::domain::{RdbError, Result};
use std::io::Write;

/// Fixed header block written at the top of every RDB file
pub const RDB_HEADER: [&str; 4] = [
    "# //UNITED STATES GEOLOGICAL SURVEY       https://waterdata.usgs.gov/",
    "# //NATIONAL WATER INFORMATION SYSTEM     https://waterdata.usgs.gov/nwis",
    "# //DATA ARE PROVISIONAL AND SUBJECT TO REVISION UNTIL APPROVED",
    "# //FILE TYPE=\"NWIS-I GW-LEVELS\" EDITABLE=NO",
];

/// Receives data rows from the groundwater source
///
/// A row is one pre-formatted line without its trailing newline. Sinks count
/// rows; they never interpret row content.
pub trait RowSink: Send {
    fn write_row(&mut self, row: &str) -> Result<()>;
}

/// Formatter contract used by the export orchestrator
pub trait RdbFormatter: RowSink {
    /// Writes the header block; later calls are no-ops
    fn write_header(&mut self) -> Result<()>;

    /// Number of data rows written so far
    fn data_row_count(&self) -> u64;

    /// Number of header lines written (0 before [`RdbFormatter::write_header`])
    fn header_row_count(&self) -> u64;

    /// Views this formatter as the sink handed to the data source
    fn as_row_sink(&mut self) -> &mut dyn RowSink;
}

/// Creates the formatter wrapped around an artifact's writer
///
/// Injected into the orchestrator so tests can substitute their own formatter.
pub trait FormatterFactory: Send + Sync {
    fn create<'a>(&self, destination: &'a mut (dyn Write + Send)) -> Box<dyn RdbFormatter + 'a>;
}

/// Default factory producing [`RdbWriter`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct RdbWriterFactory;

impl FormatterFactory for RdbWriterFactory {
    fn create<'a>(&self, destination: &'a mut (dyn Write + Send)) -> Box<dyn RdbFormatter + 'a> {
        Box::new(RdbWriter::new(destination))
    }
}

/// RDB writer over any [`Write`] destination
pub struct RdbWriter<W: Write> {
    destination: W,
    header_rows: u64,
    data_rows: u64,
}

impl<W: Write> RdbWriter<W> {
    /// Wraps a destination stream
    pub fn new(destination: W) -> Self {
        Self {
            destination,
            header_rows: 0,
            data_rows: 0,
        }
    }

    /// Flushes the destination
    pub fn flush(&mut self) -> Result<()> {
        self.destination
            .flush()
            .map_err(|e| RdbError::Format(format!("Failed to flush RDB output: {e}")))
    }

    /// Returns the wrapped destination
    pub fn into_inner(self) -> W {
        self.destination
    }

    fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        self.destination.write_all(line.as_bytes())?;
        self.destination.write_all(b"\n")
    }
}

impl<W: Write + Send> RowSink for RdbWriter<W> {
    fn write_row(&mut self, row: &str) -> Result<()> {
        self.write_line(row)
            .map_err(|e| RdbError::Format(format!("Failed to write RDB row: {e}")))?;
        self.data_rows += 1;
        Ok(())
    }
}

impl<W: Write + Send> RdbFormatter for RdbWriter<W> {
    fn write_header(&mut self) -> Result<()> {
        if self.header_rows > 0 {
            return Ok(());
        }

        for line in RDB_HEADER {
            self.write_line(line)
                .map_err(|e| RdbError::Format(format!("Failed to write RDB header: {e}")))?;
        }
        self.header_rows = RDB_HEADER.len() as u64;
        Ok(())
    }

    fn data_row_count(&self) -> u64 {
        self.data_rows
    }

    fn header_row_count(&self) -> u64 {
        self.header_rows
    }

    fn as_row_sink(&mut self) -> &mut dyn RowSink {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_counts_start_at_zero() {
        let writer = RdbWriter::new(Vec::new());
        assert_eq!(writer.header_row_count(), 0);
        assert_eq!(writer.data_row_count(), 0);
    }

    #[test]
    fn test_header_written_once() {
        let mut writer = RdbWriter::new(Vec::new());
        writer.write_header().unwrap();
        writer.write_header().unwrap();

        assert_eq!(writer.header_row_count(), 4);
        assert_eq!(writer.data_row_count(), 0);

        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().all(|line| line.starts_with('#')));
    }

    #[test]
    fn test_rows_counted_after_header() {
        let mut writer = RdbWriter::new(Vec::new());
        writer.write_header().unwrap();
        writer.write_row("USGS\t433000089000001\t2020-07-15\t12.3").unwrap();
        writer.write_row("USGS\t433000089000002\t2020-07-15\t4.56").unwrap();

        assert_eq!(writer.data_row_count(), 2);
        assert_eq!(writer.header_row_count(), 4);

        let text = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[4], "USGS\t433000089000001\t2020-07-15\t12.3");
    }

    #[test]
    fn test_header_failure_is_format_error() {
        let mut writer = RdbWriter::new(BrokenPipe);
        let err = writer.write_header().unwrap_err();

        assert!(matches!(err, RdbError::Format(_)));
        assert_eq!(writer.header_row_count(), 0);
    }

    #[test]
    fn test_failed_row_not_counted() {
        let mut writer = RdbWriter::new(BrokenPipe);
        assert!(writer.write_row("row").is_err());
        assert_eq!(writer.data_row_count(), 0);
    }

    #[test]
    fn test_factory_wraps_destination() {
        let mut buffer: Vec<u8> = Vec::new();
        {
            let mut formatter = RdbWriterFactory.create(&mut buffer);
            formatter.write_header().unwrap();
            formatter.as_row_sink().write_row("a\tb").unwrap();
            assert_eq!(formatter.data_row_count(), 1);
        }
        assert!(String::from_utf8(buffer).unwrap().ends_with("a\tb\n"));
    }
}
