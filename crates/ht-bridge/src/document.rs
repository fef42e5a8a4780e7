//! Text document in, JSON command file out.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use ht_core::{Pipeline, export_json, export_raw_json, split_sentences, unmapped_labels};

use crate::backend::{ClassifierBackend, fallback_count};
use crate::error::{BridgeError, Result};

/// Which record the output file holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputKind {
    /// Normalized scores and positioned haptic commands.
    Haptic,
    /// Blended scores before normalization.
    Raw,
}

impl OutputKind {
    pub fn suffix(self) -> &'static str {
        match self {
            OutputKind::Haptic => "_haptic_output.json",
            OutputKind::Raw => "_raw_scores.json",
        }
    }

    /// Output path for `input` inside `out_dir`.
    pub fn output_path(self, input: &Path, out_dir: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed");
        out_dir.join(format!("{stem}{}", self.suffix()))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DocumentReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub sentences: usize,
    /// Sentences scored without classifier output.
    pub fallbacks: usize,
}

/// Read, segment, classify, compile and write one document.
pub async fn process_document(
    pipeline: &Pipeline<'_>,
    backend: &ClassifierBackend,
    input: &Path,
    out_dir: &Path,
    kind: OutputKind,
) -> Result<DocumentReport> {
    let text = std::fs::read_to_string(input)?;
    let sentences = split_sentences(&text);
    tracing::debug!(input = %input.display(), sentences = sentences.len(), "compiling document");
    let classified = backend.classify_all(&sentences).await;
    for (i, output) in classified.iter().enumerate() {
        if let Ok(output) = output {
            let unknown = unmapped_labels(pipeline.tables(), output);
            if !unknown.is_empty() {
                tracing::debug!(sentence = i + 1, ?unknown, "ignoring unmapped classifier labels");
            }
        }
    }

    let json = match kind {
        OutputKind::Haptic => export_json(&pipeline.compile_sentences(&sentences, &classified))?,
        OutputKind::Raw => export_raw_json(&pipeline.raw_sentences(&sentences, &classified))?,
    };

    std::fs::create_dir_all(out_dir)?;
    let output = kind.output_path(input, out_dir);
    std::fs::write(&output, json)?;

    let report = DocumentReport {
        input: input.to_path_buf(),
        output,
        sentences: sentences.len(),
        fallbacks: match backend {
            ClassifierBackend::RulesOnly => 0,
            _ => fallback_count(&classified),
        },
    };
    tracing::info!(
        input = %report.input.display(),
        output = %report.output.display(),
        sentences = report.sentences,
        fallbacks = report.fallbacks,
        "compiled document"
    );
    Ok(report)
}

/// Explicit files followed by the `.txt` files of `dir`, sorted by name.
/// A file named twice is kept once, at its first position.
pub fn collect_inputs(files: &[PathBuf], dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    let mut paths = files.to_vec();
    if let Some(dir) = dir {
        let mut found = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("txt") {
                found.push(path);
            }
        }
        found.sort();
        paths.extend(found);
    }

    let mut seen = HashSet::new();
    paths.retain(|p| seen.insert(std::fs::canonicalize(p).unwrap_or_else(|_| p.clone())));
    Ok(paths)
}

/// Output files written during one run, keyed to the input that wrote them.
#[derive(Debug, Default)]
pub struct OutputClaims {
    written: HashMap<PathBuf, PathBuf>,
}

impl OutputClaims {
    /// Fails if another input of this run already wrote `output`.
    pub fn check(&self, input: &Path, output: &Path) -> Result<()> {
        match self.written.get(output) {
            Some(owner) => Err(BridgeError::OutputConflict(format!(
                "{} would overwrite {} written for {}",
                input.display(),
                output.display(),
                owner.display()
            ))),
            None => Ok(()),
        }
    }

    pub fn record(&mut self, report: &DocumentReport) {
        self.written
            .insert(report.output.clone(), report.input.clone());
    }
}
