//! Output sinks for resolved versions
//!
//! - [`StepOutputSink`]: CI step output, one `key=value` line per field;
//!   batches use indexed keys (`version_0`, `uri_0`, ...) plus `count`
//! - [`JsonSink`]: a JSON object, or an array of objects in batch mode

use std::io::Write;

use crate::version::output::ResolvedOutput;

/// Error type for sink operations
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Step output values must stay on a single line
    #[error("Value for {key:?} contains a line break")]
    MultilineValue { key: String },
}

/// Trait for serializing resolved outputs
pub trait OutputSink {
    fn emit(&mut self, output: &ResolvedOutput) -> Result<(), SinkError>;

    /// Emit several outputs (ascending versions) from one batch resolution
    fn emit_all(&mut self, outputs: &[ResolvedOutput]) -> Result<(), SinkError> {
        for output in outputs {
            self.emit(output)?;
        }
        Ok(())
    }
}

pub struct StepOutputSink<W: Write> {
    writer: W,
}

impl<W: Write> StepOutputSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> StepOutputSink<W> {
    /// Write pre-rendered lines in one call, after every value was checked
    fn write_lines(&mut self, lines: &str) -> Result<(), SinkError> {
        self.writer.write_all(lines.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Render `key{suffix}=value` lines, rejecting values with line breaks
fn render_pairs(
    output: &ResolvedOutput,
    suffix: &str,
    lines: &mut String,
) -> Result<(), SinkError> {
    for (key, value) in output.pairs() {
        if value.contains(['\n', '\r']) {
            return Err(SinkError::MultilineValue {
                key: key.to_string(),
            });
        }
        lines.push_str(&format!("{}{}={}\n", key, suffix, value));
    }
    Ok(())
}

impl<W: Write> OutputSink for StepOutputSink<W> {
    fn emit(&mut self, output: &ResolvedOutput) -> Result<(), SinkError> {
        let mut lines = String::new();
        render_pairs(output, "", &mut lines)?;
        self.write_lines(&lines)
    }

    /// Step outputs keep only the last value of a repeated key, so each
    /// output gets its own index.
    fn emit_all(&mut self, outputs: &[ResolvedOutput]) -> Result<(), SinkError> {
        let mut lines = format!("count={}\n", outputs.len());
        for (index, output) in outputs.iter().enumerate() {
            render_pairs(output, &format!("_{}", index), &mut lines)?;
        }
        self.write_lines(&lines)
    }
}

pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for JsonSink<W> {
    fn emit(&mut self, output: &ResolvedOutput) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, output)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    fn emit_all(&mut self, outputs: &[ResolvedOutput]) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, outputs)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
