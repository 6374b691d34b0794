// ============================================================
// Layer 2 — Stats Use Case
// ============================================================
// Loads a parallel corpus and summarises each side: sentence
// count, token counts, longest sentence, most common words.

use anyhow::Result;

use crate::data::{loader::ParallelFileLoader, stats::CorpusStats};
use crate::domain::traits::CorpusSource;

/// Statistics for both sides of a corpus.
#[derive(Debug, Clone)]
pub struct CorpusReport {
    pub source: CorpusStats,
    pub target: CorpusStats,
}

pub struct StatsUseCase {
    source_path: String,
    target_path: String,
    top:         usize,
}

impl StatsUseCase {
    pub fn new(source_path: String, target_path: String, top: usize) -> Self {
        Self { source_path, target_path, top }
    }

    pub fn execute(&self) -> Result<CorpusReport> {
        let loader = ParallelFileLoader::new(&self.source_path, &self.target_path);
        summarise(&loader, self.top)
    }
}

pub fn summarise(source: &dyn CorpusSource, top: usize) -> Result<CorpusReport> {
    let corpus = source.load()?;
    let report = CorpusReport {
        source: CorpusStats::from_sentences(corpus.source_sentences(), top),
        target: CorpusStats::from_sentences(corpus.target_sentences(), top),
    };
    tracing::debug!(
        "Summarised {} pairs: {} source tokens, {} target tokens",
        corpus.len(),
        report.source.total_tokens,
        report.target.total_tokens
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::InMemoryCorpus;

    #[test]
    fn test_each_side_is_counted_separately() {
        let corpus = InMemoryCorpus::new([
            ("he saw a car .",    "il a vu une voiture ."),
            ("she saw a truck .", "elle a vu un camion ."),
        ]);
        let report = summarise(&corpus, 2).unwrap();

        assert_eq!(report.source.sentences, 2);
        assert_eq!(report.source.total_tokens, 10);
        assert_eq!(report.target.total_tokens, 12);
        assert_eq!(report.source.max_length, 5);
        assert_eq!(report.target.max_length, 6);
        assert_eq!(report.source.most_common.len(), 2);
        assert_eq!(report.source.most_common[0], ("saw".to_string(), 2));
    }

    #[test]
    fn test_files_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("en.txt");
        let tgt = dir.path().join("fr.txt");
        std::fs::write(&src, "hello world\nhello again\n").unwrap();
        std::fs::write(&tgt, "bonjour monde\nbonjour encore\n").unwrap();

        let report = StatsUseCase::new(
            src.to_string_lossy().into_owned(),
            tgt.to_string_lossy().into_owned(),
            1,
        )
        .execute()
        .unwrap();

        assert_eq!(report.source.unique_tokens, 3);
        assert_eq!(report.target.most_common, vec![("bonjour".to_string(), 2)]);
    }
}
