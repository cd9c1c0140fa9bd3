use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hmmtag_core::{parse_corpus, DecoderConfig, HmmModel, Tagger};

const CORPUS: &str = "The\tDT\nquick\tJJ\nbrown\tJJ\nfox\tNN\njumps\tVBZ\nover\tIN\nthe\tDT\nlazy\tJJ\ndog\tNN\n.\t.\n\n\
                      A\tDT\ndog\tNN\nbarked\tVBD\nloudly\tRB\nat\tIN\nthe\tDT\nmailman\tNN\n.\t.\n\n\
                      Stocks\tNNS\nfell\tVBD\n3.5\tCD\n%\tNN\non\tIN\nMonday\tNNP\n.\t.\n\n";

fn bench_tagger(c: &mut Criterion) {
    let records = parse_corpus(CORPUS).unwrap();

    c.bench_function("train_small_corpus", |b| {
        b.iter(|| HmmModel::train(black_box(&records)).unwrap());
    });

    let tagger = Tagger::new(HmmModel::train(&records).unwrap(), DecoderConfig::default());
    let sentence = [
        "The", "lazy", "fox", "barked", "at", "the", "unfamiliar", "mailman", "on", "Tuesday", ".",
    ];

    c.bench_function("tag_sentence_11", |b| {
        b.iter(|| tagger.tag(black_box(&sentence)).unwrap());
    });

    let long: Vec<&str> = sentence.iter().copied().cycle().take(500).collect();
    c.bench_function("tag_sequence_500", |b| {
        b.iter(|| tagger.tag(black_box(&long)).unwrap());
    });
}

criterion_group!(benches, bench_tagger);
criterion_main!(benches);
