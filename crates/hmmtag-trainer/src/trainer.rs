//! Training, persistence and evaluation of HMM models.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use hmmtag_core::model::HmmModel;
use hmmtag_core::tagger::{DecoderConfig, Tagger};
use hmmtag_core::types::CorpusRecord;
use tracing::info;

use crate::data::{gold_lines, load_corpus};

/// Owns a trained model until it is saved or turned into a [`Tagger`].
pub struct Trainer {
    model: HmmModel,
}

impl Trainer {
    /// Train on records already in memory.
    pub fn from_records(records: &[CorpusRecord]) -> Result<Self> {
        let model = HmmModel::train(records).context("training failed")?;
        Ok(Self { model })
    }

    /// Load every corpus file in order and train on their concatenation.
    pub fn train_on_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let records = load_corpus(paths)?;
        info!(files = paths.len(), records = records.len(), "loaded training corpus");

        let trainer = Self::from_records(&records)?;
        info!(
            tags = trainer.model.tags().len(),
            words = trainer.model.vocabulary_size(),
            "training complete"
        );
        Ok(trainer)
    }

    /// Read a model written by [`save_model`](Self::save_model).
    pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("failed to open model {}", path.display()))?;
        let model = HmmModel::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse model {}", path.display()))?;
        info!(path = %path.display(), tags = model.tags().len(), "model loaded");
        Ok(Self { model })
    }

    pub fn save_model<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        self.model
            .to_writer(&mut writer)
            .with_context(|| format!("failed to write model {}", path.display()))?;
        writer.flush()?;

        info!(path = %path.display(), "model saved");
        Ok(())
    }

    pub fn model(&self) -> &HmmModel {
        &self.model
    }

    pub fn into_tagger(self, config: DecoderConfig) -> Tagger {
        Tagger::new(self.model, config)
    }
}

/// Token-level accuracy of a tagger against gold tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accuracy {
    pub correct: usize,
    pub total: usize,
    /// Correct tags among tokens missing from the training vocabulary.
    pub unknown_correct: usize,
    pub unknown_total: usize,
}

impl Accuracy {
    pub fn accuracy(&self) -> f64 {
        ratio(self.correct, self.total)
    }

    pub fn unknown_accuracy(&self) -> f64 {
        ratio(self.unknown_correct, self.unknown_total)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({:.2}%), unknown words {}/{} ({:.2}%)",
            self.correct,
            self.total,
            self.accuracy() * 100.0,
            self.unknown_correct,
            self.unknown_total,
            self.unknown_accuracy() * 100.0
        )
    }
}

/// Tag the words of `gold` and compare against its tags.
///
/// Sentence boundaries in `gold` are passed to the tagger as blank lines,
/// so the configured sentence mode applies.
pub fn evaluate(tagger: &Tagger, gold: &[CorpusRecord]) -> Result<Accuracy> {
    let (lines, expected) = gold_lines(gold);
    let predicted = tagger.tag_lines(&lines).context("decoding failed")?;

    let model = tagger.model();
    let mut acc = Accuracy::default();
    let words = lines.iter().filter(|line| !line.trim().is_empty());

    for ((word, gold_tag), tag) in words.zip(&expected).zip(&predicted) {
        let hit = gold_tag == tag;
        acc.total += 1;
        acc.correct += usize::from(hit);
        if !model.is_known(word) {
            acc.unknown_total += 1;
            acc.unknown_correct += usize::from(hit);
        }
    }

    info!(
        correct = acc.correct,
        total = acc.total,
        unknown = acc.unknown_total,
        "evaluation complete"
    );
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmmtag_core::types::parse_corpus;
    use std::path::PathBuf;

    const TRAIN: &str = "The\tDT\ndog\tNN\nruns\tVBZ\n.\t.\n\n\
                         A\tDT\ncat\tNN\nsleeps\tVBZ\n.\t.\n\n";

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hmmtag-trainer-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    fn trainer() -> Trainer {
        Trainer::from_records(&parse_corpus(TRAIN).unwrap()).unwrap()
    }

    #[test]
    fn test_train_on_files() {
        let path = scratch("train.pos");
        std::fs::write(&path, TRAIN).unwrap();

        let trainer = Trainer::train_on_files(&[&path]).unwrap();
        assert_eq!(trainer.model().tags().len(), 4);
        assert!(trainer.model().is_known("the"));
    }

    #[test]
    fn test_save_and_load_model() {
        let path = scratch("models/model.json");
        let saved = trainer();
        saved.save_model(&path).unwrap();

        let loaded = Trainer::load_model(&path).unwrap();
        assert_eq!(loaded.model().tags(), saved.model().tags());
        assert_eq!(loaded.model().vocabulary_size(), saved.model().vocabulary_size());
        let a = loaded.model().transitions().get("DT", "NN").unwrap();
        let b = saved.model().transitions().get("DT", "NN").unwrap();
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_load_model_rejects_garbage() {
        let path = scratch("garbage.json");
        std::fs::write(&path, "not a model").unwrap();
        assert!(Trainer::load_model(&path).is_err());
    }

    #[test]
    fn test_evaluate_on_training_data() {
        let tagger = trainer().into_tagger(DecoderConfig::default());
        let gold = parse_corpus(TRAIN).unwrap();

        let acc = evaluate(&tagger, &gold).unwrap();
        assert_eq!(acc.total, 8);
        assert_eq!(acc.correct, 8);
        assert_eq!(acc.unknown_total, 0);
        assert_eq!(acc.accuracy(), 1.0);
    }

    #[test]
    fn test_evaluate_counts_unknown_words() {
        let tagger = trainer().into_tagger(DecoderConfig::default());
        // "zzqx" is guessed NN and right; the NNP guess for "Rover" is not in
        // the tag set, every tag ties on the floor and the tie goes to DT
        let gold = parse_corpus("the\tDT\nzzqx\tNN\nruns\tVBZ\n.\t.\n\nRover\tNN\n\n").unwrap();

        let acc = evaluate(&tagger, &gold).unwrap();
        assert_eq!(acc.total, 5);
        assert_eq!(acc.unknown_total, 2);
        assert_eq!(acc.unknown_correct, 1);
        assert_eq!(acc.correct, 4);
    }

    #[test]
    fn test_accuracy_display() {
        let acc = Accuracy {
            correct: 3,
            total: 4,
            unknown_correct: 0,
            unknown_total: 0,
        };
        assert_eq!(acc.to_string(), "3/4 (75.00%), unknown words 0/0 (0.00%)");
    }
}
