//! Human-in-the-loop label sources
//!
//! The training loop asks a [`HumanLabelProvider`] for ground truth when its
//! own prediction is not confident enough. Providers are interchangeable:
//!
//! - [`SimulatedLabelProvider`] reads the `<label>_` file-name prefix.
//! - [`ConsoleLabelProvider`] prompts on a reader/writer pair, re-asking
//!   until a valid concrete label is entered.
//! - [`MapLabelProvider`] answers from a fixed table.

use crate::corpus::Document;
use crate::errors::{ClassifierError, Result};
use crate::types::Label;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Synchronous source of ground-truth labels
pub trait HumanLabelProvider {
    /// Return the concrete label for `document`
    fn request_label(&mut self, document: &Document) -> Result<Label>;
}

impl<P: HumanLabelProvider + ?Sized> HumanLabelProvider for &mut P {
    fn request_label(&mut self, document: &Document) -> Result<Label> {
        (**self).request_label(document)
    }
}

impl<P: HumanLabelProvider + ?Sized> HumanLabelProvider for Box<P> {
    fn request_label(&mut self, document: &Document) -> Result<Label> {
        (**self).request_label(document)
    }
}

/// Answers with the category encoded in the document's file name
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedLabelProvider;

impl HumanLabelProvider for SimulatedLabelProvider {
    fn request_label(&mut self, document: &Document) -> Result<Label> {
        let label = Label::from_file_name(&document.name)?;
        tracing::debug!(document = %document.name, %label, "simulated human label");
        Ok(label)
    }
}

/// Answers from a fixed document-name -> label table
#[derive(Debug, Clone, Default)]
pub struct MapLabelProvider {
    labels: BTreeMap<String, Label>,
    requests: usize,
}

impl MapLabelProvider {
    /// Create a provider from `(document name, label)` pairs
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = (S, Label)>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            requests: 0,
        }
    }

    /// Number of times a label was requested
    pub fn requests(&self) -> usize {
        self.requests
    }
}

impl HumanLabelProvider for MapLabelProvider {
    fn request_label(&mut self, document: &Document) -> Result<Label> {
        self.requests += 1;
        self.labels
            .get(&document.name)
            .copied()
            .ok_or_else(|| ClassifierError::unknown_document_category(&document.name))
    }
}

/// Parse one line of labeller input: a numeric code or a label name.
///
/// `NoLabel` and anything unrecognised is an
/// [`InvalidHumanLabel`](ClassifierError::InvalidHumanLabel) error.
pub fn parse_label_input(input: &str) -> Result<Label> {
    let trimmed = input.trim();
    let label = match trimmed.parse::<i32>() {
        Ok(code) => Label::from_code(code),
        Err(_) => trimmed.parse::<Label>().ok(),
    };
    match label {
        Some(label) if label.is_concrete() => Ok(label),
        _ => Err(ClassifierError::invalid_human_label(trimmed)),
    }
}

/// Interactive labeller over any line reader and writer
#[derive(Debug)]
pub struct ConsoleLabelProvider<R, W> {
    reader: R,
    writer: W,
}

impl ConsoleLabelProvider<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Prompt on standard input/output
    ///
    /// ```no_run
    /// use news_keyrank::{ConsoleLabelProvider, Corpus, HeuristicTagger, SelfTrainingLoop};
    ///
    /// let corpus = Corpus::load("data")?;
    /// let mut training = SelfTrainingLoop::new(HeuristicTagger::new(), ConsoleLabelProvider::stdio());
    /// let report = training.run(&corpus)?;
    /// let asked: usize = report.iterations.iter().map(|pass| pass.provider_requests).sum();
    /// println!("asked for {asked} labels, accuracy {:.2}%", report.evaluation.accuracy);
    /// # Ok::<(), news_keyrank::ClassifierError>(())
    /// ```
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleLabelProvider<R, W> {
    /// Create a provider over `reader` and `writer`
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Give back the reader and writer
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    fn write_menu(&mut self, document: &Document) -> std::io::Result<()> {
        writeln!(self.writer, "************************")?;
        for label in Label::CONCRETE {
            writeln!(
                self.writer,
                "-> For {}, Enter {}",
                label.as_str().to_uppercase(),
                label.code()
            )?;
        }
        writeln!(self.writer, "************************")?;
        write!(self.writer, "Enter label for {} : ", document.id)?;
        self.writer.flush()
    }
}

impl<R: BufRead, W: Write> HumanLabelProvider for ConsoleLabelProvider<R, W> {
    fn request_label(&mut self, document: &Document) -> Result<Label> {
        loop {
            self.write_menu(document)
                .map_err(|e| ClassifierError::io("console", &e))?;

            let mut line = String::new();
            let read = self
                .reader
                .read_line(&mut line)
                .map_err(|e| ClassifierError::io("console", &e))?;
            if read == 0 {
                return Err(ClassifierError::InputClosed);
            }

            match parse_label_input(&line) {
                Ok(label) => {
                    writeln!(self.writer, "Added {} as a {} document", document.id, label)
                        .map_err(|e| ClassifierError::io("console", &e))?;
                    return Ok(label);
                }
                Err(err) if err.is_invalid_human_label() => {
                    tracing::warn!(document = %document.id, input = line.trim(), "invalid label entered");
                    writeln!(self.writer, "Invalid Label entered : {}", line.trim())
                        .map_err(|e| ClassifierError::io("console", &e))?;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
