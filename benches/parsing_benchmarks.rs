use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use dc_address_parser::{AddressNormalizer, AddressParser};

const ADDRESSES: &[&str] = &[
    "1600 Pennsylvania ave n.w.",
    "REAR OF 123-125 M.L. King JR. Ave SE",
    "123 N. Capitol St NW APT 100; foo",
    "450 e st sw",
    "100, 101, and 102 main street, NW",
];

fn bench_normalize(c: &mut Criterion) {
    let normalizer = AddressNormalizer::new();

    c.bench_function("normalize_simple_address", |b| {
        b.iter(|| normalizer.normalize(black_box(ADDRESSES[0])))
    });

    c.bench_function("normalize_messy_address", |b| {
        b.iter(|| normalizer.normalize(black_box(ADDRESSES[1])))
    });
}

fn bench_parse(c: &mut Criterion) {
    let parser = AddressParser::new();

    c.bench_function("parse_simple_address", |b| {
        b.iter(|| parser.parse(black_box(ADDRESSES[0])))
    });

    c.bench_function("parse_complex_address", |b| {
        b.iter(|| parser.parse(black_box(ADDRESSES[2])))
    });

    c.bench_function("parse_batch", |b| {
        b.iter(|| parser.parse_batch(black_box(ADDRESSES)))
    });
}

criterion_group!(benches, bench_normalize, bench_parse);
criterion_main!(benches);
