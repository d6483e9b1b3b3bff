use ckv::Document;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn sample(sections: usize) -> String {
    let mut source = String::new();
    for s in 0..sections {
        source.push_str(&format!("section{s} =\n"));
        for k in 0..8 {
            source.push_str(&format!("\tkey{k} = value {s}-{k}\n"));
        }
        source.push_str("\tnested =\n\t\tdeep = \"quoted = value\"\n\n");
    }
    source
}

fn parse_benchmark(c: &mut Criterion) {
    let source = sample(200);

    c.bench_function("Document::parse", |b| {
        b.iter(|| Document::parse(black_box(&source)).unwrap())
    });

    let doc = Document::parse(&source).unwrap();
    c.bench_function("Document::to_map", |b| b.iter(|| black_box(&doc).to_map()));
}

fn edit_benchmark(c: &mut Criterion) {
    let source = sample(200);
    let doc = Document::parse(&source).unwrap();

    c.bench_function("Document::set_value", |b| {
        b.iter(|| {
            let mut doc = doc.clone();
            doc.set_value(black_box("section150.nested.deep"), "changed").unwrap();
        })
    });
}

criterion_group!(benches, parse_benchmark, edit_benchmark);
criterion_main!(benches);
