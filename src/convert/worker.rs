//! Background conversion with progress events.
//!
//! A conversion runs on its own thread and reports progress over a
//! channel, so an interactive front-end can stay responsive without
//! sharing any state with the conversion.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::error::{Error, Result};

use super::{ConversionStage, ConvertOptions, ConvertResult, ConverterRegistry};

/// Progress of a background conversion.
#[derive(Debug)]
pub enum ConversionEvent {
    /// The worker picked up the input file
    Started {
        /// Input path
        input: PathBuf,
    },
    /// A new stage began
    Stage(ConversionStage),
    /// The PDF was written
    Finished(ConvertResult),
    /// The conversion failed; nothing was written
    Failed(Error),
}

impl ConversionEvent {
    /// Check if this is the last event of a conversion.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConversionEvent::Finished(_) | ConversionEvent::Failed(_))
    }
}

/// Handle to a conversion running on a worker thread.
///
/// Dropping the handle abandons the result; the worker still runs to
/// completion and its events are discarded.
pub struct ConversionHandle {
    events: Receiver<ConversionEvent>,
    thread: JoinHandle<()>,
}

impl ConversionHandle {
    /// Receiver of progress events.
    pub fn events(&self) -> &Receiver<ConversionEvent> {
        &self.events
    }

    /// Check if the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Block until the conversion completes, discarding progress events.
    pub fn wait(self) -> Result<ConvertResult> {
        let outcome = self
            .events
            .iter()
            .find(ConversionEvent::is_terminal)
            .map(|event| match event {
                ConversionEvent::Finished(result) => Ok(result),
                ConversionEvent::Failed(error) => Err(error),
                _ => Err(Error::Other("unexpected conversion event".into())),
            })
            .unwrap_or_else(|| Err(Error::Other("conversion worker exited without a result".into())));

        self.thread
            .join()
            .map_err(|_| Error::Other("conversion worker panicked".into()))?;

        outcome
    }
}

/// Start converting `input` into `output` on a worker thread.
///
/// The converter is chosen from `registry` by the input's extension.
/// Failures, including an unsupported input, arrive as
/// [`ConversionEvent::Failed`].
pub fn spawn_conversion(
    registry: Arc<ConverterRegistry>,
    input: impl Into<PathBuf>,
    output: impl Into<PathBuf>,
    options: ConvertOptions,
) -> Result<ConversionHandle> {
    let input = input.into();
    let output = output.into();
    let (tx, rx) = unbounded();

    let thread = thread::Builder::new()
        .name("wordpdf-convert".into())
        .spawn(move || run(&registry, input, output, &options, &tx))?;

    Ok(ConversionHandle { events: rx, thread })
}

fn run(
    registry: &ConverterRegistry,
    input: PathBuf,
    output: PathBuf,
    options: &ConvertOptions,
    tx: &Sender<ConversionEvent>,
) {
    // Send errors only mean the handle was dropped.
    let _ = tx.send(ConversionEvent::Started { input: input.clone() });

    let result = registry.converter_for(&input).and_then(|converter| {
        converter.convert_with_progress(&input, &output, options, &mut |stage| {
            let _ = tx.send(ConversionEvent::Stage(stage));
        })
    });

    let event = match result {
        Ok(result) => ConversionEvent::Finished(result),
        Err(error) => {
            log::debug!("Conversion of {} failed: {}", input.display(), error);
            ConversionEvent::Failed(error)
        }
    };
    let _ = tx.send(event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn write_docx(path: &std::path::Path, body: &str) {
        let file = std::fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        write!(
            zip,
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        )
        .unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn test_worker_reports_events() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.docx");
        let output = dir.path().join("out.pdf");
        write_docx(&input, "<w:p><w:r><w:t>Hello</w:t></w:r></w:p>");

        let registry = Arc::new(ConverterRegistry::with_defaults());
        let handle = spawn_conversion(registry, &input, &output, ConvertOptions::default()).unwrap();
        let events: Vec<ConversionEvent> = handle.events().iter().collect();

        assert!(matches!(events.first(), Some(ConversionEvent::Started { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, ConversionEvent::Stage(ConversionStage::Writing))));
        assert!(matches!(events.last(), Some(ConversionEvent::Finished(_))));
        assert!(output.exists());
    }

    #[test]
    fn test_wait_returns_result() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.docx");
        let output = dir.path().join("out.pdf");
        write_docx(&input, "<w:p><w:r><w:t>Hi</w:t></w:r></w:p>");

        let registry = Arc::new(ConverterRegistry::with_defaults());
        let result = spawn_conversion(registry, &input, &output, ConvertOptions::default())
            .unwrap()
            .wait()
            .unwrap();

        assert_eq!(result.output, output);
        assert_eq!(result.stats.line_count, 1);
    }

    #[test]
    fn test_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.docx");
        let output = dir.path().join("out.pdf");

        let registry = Arc::new(ConverterRegistry::with_defaults());
        let result = spawn_conversion(registry, &input, &output, ConvertOptions::default())
            .unwrap()
            .wait();

        assert!(result.is_err());
        assert!(!output.exists());
    }
}
