use criterion::{criterion_group, criterion_main, Criterion};
use minic::lexer;
use std::hint::black_box;

/// A statement block covering every token category, repeated into a large
/// input.
fn big_input() -> String {
    concat!(
        "int total = 0; // running total\n",
        "float ratio = 3.14;\n",
        "total = total + (ratio * 2) - 1 / 4;\n",
        "if (total == 100) {\n",
        "    total = 0;\n",
        "}\n",
    )
    .repeat(1_000)
}

fn criterion_benchmark(c: &mut Criterion) {
    let input = big_input();
    c.bench_function("lexer", |b| {
        b.iter(|| {
            let tokens = lexer::tokenize(black_box(&input)).unwrap();
            black_box(tokens);
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
