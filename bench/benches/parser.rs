use criterion::{criterion_group, criterion_main, Criterion};
use minic::{lexer, parser};
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
    let tokens = lexer::tokenize(&input).unwrap();

    c.bench_function("parser", |b| {
        b.iter(|| {
            let program = parser::parse(black_box(&tokens)).unwrap();
            black_box(program);
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
