use std::fs::{File, OpenOptions};
use std::io::{self, Stdout, Write};
use std::path::Path;

use crate::models::{header_row, DiagnosticRecord};

/// Destination for the header line and one line per record.
pub trait RecordSink {
    fn write_header(&mut self, fields: &[String]) -> io::Result<()>;
    fn write_record(&mut self, record: &DiagnosticRecord, fields: &[String]) -> io::Result<()>;
}

/// Line-oriented sink over any writer. Every line is flushed as it is written
/// so a `tail -f` on the log sees rows immediately.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()
    }
}

impl WriterSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl WriterSink<File> {
    /// Open `path` for appending, creating it if needed.
    pub fn append(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> RecordSink for WriterSink<W> {
    fn write_header(&mut self, fields: &[String]) -> io::Result<()> {
        self.write_line(&header_row(fields))
    }

    fn write_record(&mut self, record: &DiagnosticRecord, fields: &[String]) -> io::Result<()> {
        self.write_line(&record.to_row(fields))
    }
}

/// Append to `path` when given, otherwise write to stdout.
pub fn open_sink(path: Option<&Path>) -> io::Result<Box<dyn RecordSink + Send>> {
    Ok(match path {
        Some(path) => Box::new(WriterSink::append(path)?),
        None => Box::new(WriterSink::stdout()),
    })
}
