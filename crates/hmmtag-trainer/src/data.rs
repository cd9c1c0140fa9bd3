//! Reading and writing the line-oriented corpus and token files.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use hmmtag_core::tagger::{align_tags, TaggedLine};
use hmmtag_core::types::{parse_line, CorpusRecord};
use tracing::debug;

/// Load one or more `word<TAB>tag` corpus files in order.
///
/// The end of each file closes any sentence still open, so a file without a
/// trailing blank line does not run into the next one.
pub fn load_corpus<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<CorpusRecord>> {
    let mut records = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("failed to open corpus {}", path.display()))?;
        let reader = BufReader::new(file);
        let before = records.len();

        for (idx, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("failed to read {}", path.display()))?;
            let record = parse_line(idx + 1, &line)
                .with_context(|| format!("invalid corpus file {}", path.display()))?;
            records.push(record);
        }

        if records.last().is_some_and(|r| !r.is_boundary()) {
            records.push(CorpusRecord::Boundary);
        }
        debug!(path = %path.display(), records = records.len() - before, "loaded corpus file");
    }

    Ok(records)
}

/// Load a token file: one token per line, blank lines kept as sentence
/// markers.
pub fn load_tokens<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("failed to open tokens {}", path.display()))?;

    BufReader::new(file)
        .lines()
        .map(|line| {
            line.map(|l| l.trim_end_matches('\r').to_string())
                .with_context(|| format!("failed to read {}", path.display()))
        })
        .collect()
}

/// Split gold records into the token lines a tagger sees and the expected
/// tag for every non-blank line.
pub fn gold_lines(records: &[CorpusRecord]) -> (Vec<String>, Vec<String>) {
    let mut lines = Vec::with_capacity(records.len());
    let mut tags = Vec::new();

    for record in records {
        match record {
            CorpusRecord::Token { word, tag } => {
                lines.push(word.clone());
                tags.push(tag.clone());
            }
            CorpusRecord::Boundary => lines.push(String::new()),
        }
    }

    (lines, tags)
}

/// Write `word<TAB>tag` for each non-blank line, blank lines unchanged.
pub fn write_tagged<P, S, T>(path: P, lines: &[S], tags: &[T]) -> Result<()>
where
    P: AsRef<Path>,
    S: AsRef<str>,
    T: AsRef<str>,
{
    let path = path.as_ref();
    let aligned = align_tags(lines, tags)?;

    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for line in aligned {
        match line {
            TaggedLine::Blank => writeln!(writer)?,
            TaggedLine::Token { word, tag } => writeln!(writer, "{word}\t{tag}")?,
        }
    }
    writer.flush()?;

    Ok(())
}
