//! Documents and on-disk corpus layout
//!
//! The corpus is expected to be partitioned already:
//!
//! ```text
//! <root>/train/labelled/<label>/*.txt   labelled training documents
//! <root>/train/unlabelled/<label>_*.txt unlabelled training documents
//! <root>/test/<label>_*.txt             test documents
//! ```
//!
//! Files are listed in name order so every run visits documents in the same
//! sequence. Text is read as UTF-8, falling back to Windows-1252.

use crate::errors::{ClassifierError, Result};
use crate::types::Label;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A single news article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Stable identifier (the path the document was read from)
    pub id: String,
    /// File name, carrying the `<label>_` prefix where one exists
    pub name: String,
    /// Full article text
    pub text: String,
}

impl Document {
    /// Create a document
    pub fn new(id: impl Into<String>, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            text: text.into(),
        }
    }

    /// Read a document from disk, trimming surrounding whitespace
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| ClassifierError::io(path.display().to_string(), &e))?;
        let text = decode_text(&bytes).map_err(|byte| {
            let err = std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("byte 0x{byte:02X} is undefined in Windows-1252"),
            );
            ClassifierError::io(path.display().to_string(), &err)
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(
            path.display().to_string(),
            name,
            text.trim(),
        ))
    }

    /// Ground-truth label from the file-name prefix
    pub fn true_label(&self) -> Result<Label> {
        Label::from_file_name(&self.name)
    }
}

/// Decode UTF-8, or Windows-1252 when the bytes are not valid UTF-8.
///
/// The five bytes Windows-1252 leaves undefined (0x81, 0x8D, 0x8F, 0x90,
/// 0x9D) make the text undecodable; the first one found is returned.
pub fn decode_text(bytes: &[u8]) -> std::result::Result<String, u8> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => bytes
            .iter()
            .map(|&b| windows_1252_char(b).ok_or(b))
            .collect(),
    }
}

fn windows_1252_char(byte: u8) -> Option<char> {
    const HIGH: [Option<char>; 32] = [
        Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
        Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
        Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
        Some('\u{0152}'), None, Some('\u{017D}'), None,
        None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
        Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
        Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
        Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
    ];
    match byte {
        0x80..=0x9F => HIGH[(byte - 0x80) as usize],
        _ => Some(byte as char),
    }
}

/// Relative directory names of a partitioned corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusLayout {
    /// Parent of one sub-directory per label
    #[serde(default = "default_labelled_dir")]
    pub labelled_dir: PathBuf,
    #[serde(default = "default_unlabelled_dir")]
    pub unlabelled_dir: PathBuf,
    #[serde(default = "default_test_dir")]
    pub test_dir: PathBuf,
}

fn default_labelled_dir() -> PathBuf {
    PathBuf::from("train/labelled")
}

fn default_unlabelled_dir() -> PathBuf {
    PathBuf::from("train/unlabelled")
}

fn default_test_dir() -> PathBuf {
    PathBuf::from("test")
}

impl Default for CorpusLayout {
    fn default() -> Self {
        Self {
            labelled_dir: default_labelled_dir(),
            unlabelled_dir: default_unlabelled_dir(),
            test_dir: default_test_dir(),
        }
    }
}

/// All documents of one run, held in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    /// Labelled documents per concrete label, in [`Label::CONCRETE`] order
    pub labelled: Vec<(Label, Vec<Document>)>,
    /// Unlabelled training documents
    pub unlabelled: Vec<Document>,
    /// Test documents
    pub test: Vec<Document>,
}

impl Corpus {
    /// Create an empty corpus
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a corpus rooted at `root` with the default layout
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_layout(root, &CorpusLayout::default())
    }

    /// Load a corpus rooted at `root`.
    ///
    /// A missing labelled directory for some label means no labelled
    /// documents for it; any other missing directory or unreadable file is
    /// an error.
    pub fn load_with_layout(root: impl AsRef<Path>, layout: &CorpusLayout) -> Result<Self> {
        let root = root.as_ref();

        let mut labelled = Vec::with_capacity(Label::CONCRETE.len());
        for label in Label::CONCRETE {
            let dir = root.join(&layout.labelled_dir).join(label.as_str());
            let documents = if dir.is_dir() {
                read_dir_sorted(&dir)?
            } else {
                tracing::warn!(dir = %dir.display(), %label, "no labelled directory");
                Vec::new()
            };
            labelled.push((label, documents));
        }

        let corpus = Self {
            labelled,
            unlabelled: read_dir_sorted(&root.join(&layout.unlabelled_dir))?,
            test: read_dir_sorted(&root.join(&layout.test_dir))?,
        };

        tracing::info!(
            root = %root.display(),
            labelled = corpus.labelled_count(),
            unlabelled = corpus.unlabelled.len(),
            test = corpus.test.len(),
            "loaded corpus"
        );
        Ok(corpus)
    }

    /// Builder method: add labelled documents
    pub fn with_labelled(mut self, label: Label, documents: Vec<Document>) -> Self {
        match self.labelled.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => existing.extend(documents),
            None => {
                self.labelled.push((label, documents));
                self.labelled.sort_by_key(|(l, _)| *l);
            }
        }
        self
    }

    /// Builder method: add unlabelled documents
    pub fn with_unlabelled(mut self, documents: Vec<Document>) -> Self {
        self.unlabelled.extend(documents);
        self
    }

    /// Builder method: add test documents
    pub fn with_test(mut self, documents: Vec<Document>) -> Self {
        self.test.extend(documents);
        self
    }

    /// Total number of labelled documents
    pub fn labelled_count(&self) -> usize {
        self.labelled.iter().map(|(_, docs)| docs.len()).sum()
    }
}

/// Read every regular file in `dir`, ordered by file name
fn read_dir_sorted(dir: &Path) -> Result<Vec<Document>> {
    let entries = fs::read_dir(dir).map_err(|e| ClassifierError::io(dir.display().to_string(), &e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| ClassifierError::io(dir.display().to_string(), &e))?
            .path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    paths.iter().map(|path| Document::read(path)).collect()
}
