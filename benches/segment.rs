use akshara_rs::{LookupTableBuilder, Romanizer};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const WORDS: &[&str] = &[
    "ನಮಸ್ಕಾರ",
    "ಕನ್ನಡ",
    "ಜಗತ್ತು",
    "ಸಂಸ್ಕೃತಿ",
    "ತಂತ್ರಜ್ಞಾನ",
    "ವಿದ್ಯಾರ್ಥಿ",
    "ಪ್ರಾಧ್ಯಾಪಕ",
    "ನ್ಯಾಯಾಲಯ",
];

fn bench_romanize(c: &mut Criterion) {
    let romanizer = Romanizer::new();
    let sentence = WORDS.join(" ");

    c.bench_function("romanize_words", |b| {
        b.iter(|| {
            for word in WORDS {
                black_box(romanizer.romanize(black_box(word)));
            }
        })
    });

    c.bench_function("segments_of_sentence", |b| {
        b.iter(|| black_box(romanizer.segments_of(black_box(&sentence))))
    });
}

fn bench_table_build(c: &mut Criterion) {
    c.bench_function("build_default_table", |b| {
        b.iter(|| {
            let builder = LookupTableBuilder::with_defaults().unwrap();
            black_box(builder.build().unwrap())
        })
    });
}

criterion_group!(benches, bench_romanize, bench_table_build);
criterion_main!(benches);
