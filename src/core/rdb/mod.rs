//! RDB file formatting
//!
//! Only the framing of an RDB file lives here: the header block and data-row
//! bookkeeping. Individual rows arrive pre-formatted from the data source.

pub mod writer;

pub use writer::{FormatterFactory, RdbFormatter, RdbWriter, RdbWriterFactory, RowSink, RDB_HEADER};
