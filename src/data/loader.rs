// ============================================================
// Layer 4 — Parallel Corpus Loader
// ============================================================
// Reads two UTF-8 text files, one sentence per line, into a
// ParallelCorpus. Line i of the source file is the translation
// partner of line i of the target file.
//
//   data/small_vocab_en   ← source language
//   data/small_vocab_fr   ← target language
//
// Both "\n" and "\r\n" line endings are accepted; a final
// newline at the end of a file does not add an empty sentence.
// Blank lines in the middle are kept so the alignment of the
// lines after them is unaffected.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::corpus::ParallelCorpus;
use crate::domain::traits::CorpusSource;

/// Loads a source/target file pair from disk.
pub struct ParallelFileLoader {
    source_path: PathBuf,
    target_path: PathBuf,
}

impl ParallelFileLoader {
    pub fn new(source_path: impl Into<PathBuf>, target_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            target_path: target_path.into(),
        }
    }
}

impl CorpusSource for ParallelFileLoader {
    fn load(&self) -> Result<ParallelCorpus> {
        let source = read_sentences(&self.source_path)?;
        let target = read_sentences(&self.target_path)?;

        tracing::debug!(
            "Read {} source lines from '{}', {} target lines from '{}'",
            source.len(),
            self.source_path.display(),
            target.len(),
            self.target_path.display(),
        );

        let corpus = ParallelCorpus::new(source, target).with_context(|| {
            format!(
                "Cannot pair '{}' with '{}'",
                self.source_path.display(),
                self.target_path.display()
            )
        })?;

        tracing::info!("Loaded {} sentence pairs", corpus.len());
        Ok(corpus)
    }
}

/// Read a file and return its lines without line terminators.
pub fn read_sentences(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read corpus file '{}'", path.display()))?;
    Ok(text.lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::PipelineError;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_loads_aligned_files() {
        let dir = tempfile::tempdir().unwrap();
        let en = write(dir.path(), "en", "he saw a truck .\nshe likes grapes .\n");
        let fr = write(dir.path(), "fr", "il a vu un camion .\nelle aime les raisins .\n");

        let corpus = ParallelFileLoader::new(en, fr).load().unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.source_sentences()[1], "she likes grapes .");
        assert_eq!(corpus.target_sentences()[0], "il a vu un camion .");
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let dir = tempfile::tempdir().unwrap();
        let en = write(dir.path(), "en", "a b\r\nc d");
        let fr = write(dir.path(), "fr", "x y\r\nz w\r\n");

        let corpus = ParallelFileLoader::new(en, fr).load().unwrap();
        assert_eq!(corpus.source_sentences(), &["a b".to_string(), "c d".to_string()]);
        assert_eq!(corpus.target_sentences(), &["x y".to_string(), "z w".to_string()]);
    }

    #[test]
    fn test_line_count_mismatch_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let en = write(dir.path(), "en", "one\ntwo\nthree\n");
        let fr = write(dir.path(), "fr", "un\ndeux\n");

        let err = ParallelFileLoader::new(en, fr).load().unwrap_err();
        let pipeline = err.downcast_ref::<PipelineError>().unwrap();
        assert!(matches!(
            pipeline,
            PipelineError::MisalignedCorpus { source_lines: 3, target_lines: 2 }
        ));
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let fr = write(dir.path(), "fr", "un\n");
        let missing = dir.path().join("does_not_exist");

        let err = ParallelFileLoader::new(&missing, fr).load().unwrap_err();
        assert!(err.to_string().contains("does_not_exist"));
    }
}
