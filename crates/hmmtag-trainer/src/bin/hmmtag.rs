//! hmmtag command-line tool
//!
//! Trains a tagger from `word<TAB>tag` corpora, tags token files and scores
//! a model against gold-tagged text.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use hmmtag_core::tagger::{DecoderConfig, OovPolicy, SentenceMode};
use hmmtag_trainer::{evaluate, load_corpus, load_tokens, write_tagged, Trainer};
use tracing::info;

/// CLI arguments
#[derive(Parser)]
#[command(name = "hmmtag")]
#[command(about = "Train and run an HMM part-of-speech tagger")]
#[command(version)]
struct Cli {
    /// Model file to write when training or to read otherwise
    #[arg(
        short,
        long,
        global = true,
        env = "HMMTAG_MODEL",
        default_value = "hmmtag-model.json"
    )]
    model: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model and save it
    Train {
        /// Tagged corpus files, concatenated in order
        #[arg(required = true)]
        corpus: Vec<PathBuf>,
    },
    /// Tag a file with one token per line
    Tag {
        input: PathBuf,

        /// Where to write `word<TAB>tag` lines
        #[arg(short, long, default_value = "submission.pos")]
        output: PathBuf,

        #[command(flatten)]
        source: ModelSource,

        #[command(flatten)]
        decode: DecodeArgs,
    },
    /// Report tagging accuracy on a gold-tagged file
    Eval {
        gold: PathBuf,

        #[command(flatten)]
        source: ModelSource,

        #[command(flatten)]
        decode: DecodeArgs,
    },
}

#[derive(Args)]
struct ModelSource {
    /// Train on these corpus files instead of loading the model file
    #[arg(short, long = "train-on")]
    train_on: Vec<PathBuf>,
}

#[derive(Args)]
struct DecodeArgs {
    /// Scoring of words never seen in training
    #[arg(long, value_enum, default_value_t = OovArg::Prior)]
    oov: OovArg,

    /// Decode each blank-line delimited sentence on its own
    #[arg(long)]
    per_sentence: bool,

    /// Refuse sequences longer than this many tokens
    #[arg(long)]
    max_tokens: Option<usize>,

    /// Log-probability used for unseen events
    #[arg(long, allow_hyphen_values = true)]
    floor: Option<f64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OovArg {
    /// Favor the guessed tag, other tags score the floor
    Prior,
    /// Only the guessed tag is allowed
    Restrict,
}

impl DecodeArgs {
    fn config(&self) -> DecoderConfig {
        let policy = match self.oov {
            OovArg::Prior => OovPolicy::Prior,
            OovArg::Restrict => OovPolicy::Restrict,
        };
        let mode = if self.per_sentence {
            SentenceMode::PerSentence
        } else {
            SentenceMode::Continuous
        };

        let mut config = DecoderConfig::new()
            .with_oov_policy(policy)
            .with_sentence_mode(mode);
        if let Some(max) = self.max_tokens {
            config = config.with_max_tokens(max);
        }
        if let Some(floor) = self.floor {
            config = config.with_floor(floor);
        }
        config
    }
}

impl ModelSource {
    fn trainer(&self, model: &Path) -> Result<Trainer> {
        if self.train_on.is_empty() {
            Trainer::load_model(model)
        } else {
            Trainer::train_on_files(&self.train_on)
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train { corpus } => {
            info!(files = corpus.len(), "training model");
            let trainer = Trainer::train_on_files(&corpus)?;
            trainer.save_model(&cli.model)?;
            println!(
                "Trained {} tags over {} words, saved to {}",
                trainer.model().tags().len(),
                trainer.model().vocabulary_size(),
                cli.model.display()
            );
        }
        Commands::Tag {
            input,
            output,
            source,
            decode,
        } => {
            let tagger = source.trainer(&cli.model)?.into_tagger(decode.config());
            let lines = load_tokens(&input)?;
            info!(lines = lines.len(), "tagging {}", input.display());

            let tags = tagger.tag_lines(&lines)?;
            write_tagged(&output, &lines, &tags)?;
            println!("Wrote {} tags to {}", tags.len(), output.display());
        }
        Commands::Eval {
            gold,
            source,
            decode,
        } => {
            let tagger = source.trainer(&cli.model)?.into_tagger(decode.config());
            let records = load_corpus(&[&gold])?;

            let accuracy = evaluate(&tagger, &records)?;
            println!("Accuracy: {accuracy}");
        }
    }

    Ok(())
}
