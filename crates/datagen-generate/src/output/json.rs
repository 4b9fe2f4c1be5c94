use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{Map, Value};
use tracing::info;

use crate::errors::GenerationError;
use crate::model::GenerationOutput;

/// Group records by entity name, in first-seen order.
///
/// Directives that generate the same entity append to one array.
pub fn outputs_to_json(outputs: &[GenerationOutput]) -> Value {
    let mut document = Map::new();
    for output in outputs {
        let entry = document
            .entry(output.entity.clone())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(records) = entry {
            records.extend(output.records.iter().map(|record| record.to_json()));
        }
    }
    Value::Object(document)
}

/// Write all outputs as one JSON document; returns the bytes written.
pub fn write_json(
    path: &Path,
    outputs: &[GenerationOutput],
    pretty: bool,
) -> Result<u64, GenerationError> {
    let document = outputs_to_json(outputs);
    let mut writer = CountingWriter::new(BufWriter::new(File::create(path)?));

    if pretty {
        serde_json::to_writer_pretty(&mut writer, &document)?;
    } else {
        serde_json::to_writer(&mut writer, &document)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;

    let records: usize = outputs.iter().map(|output| output.records.len()).sum();
    info!(
        path = %path.display(),
        records,
        bytes = writer.bytes_written(),
        "wrote generated entities"
    );
    Ok(writer.bytes_written())
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
