//! Criterion benchmarks for parsing, rendering and deriving URIs.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

use swim_uri::pct::{self, PATH_SEGMENT};
use swim_uri::{Path, Query, Uri};

const CASES: [(&str, &str); 6] = [
    ("empty", ""),
    ("relative", "one/two/three"),
    ("authority", "//user:pass@swim.example:9001"),
    ("ipv6", "warp://[2001:db8::7]:443/node/lane"),
    (
        "encoded",
        "http://ex%41mple.com/caf%C3%A9/a%20b?q=%26%3D&flag#sec%201",
    ),
    (
        "full",
        "scheme://domain:80/path/to/resource?version=2.0&ttl=300#fragment",
    ),
];

/// Benchmark: Uri::parse with varying URI shapes
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for (name, uri) in CASES {
        group.throughput(Throughput::Bytes(uri.len() as u64));
        group.bench_with_input(BenchmarkId::new("uri", name), &uri, |b, uri| {
            b.iter(|| Uri::parse(black_box(uri)));
        });
    }

    group.finish();
}

/// Benchmark: first rendering of a freshly parsed URI, and the cached lookup after it
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for (name, input) in CASES {
        group.bench_with_input(BenchmarkId::new("first", name), &input, |b, input| {
            b.iter_batched(
                || Uri::parse(input).expect("valid test URI"),
                |uri| black_box(uri.as_str().len()),
                BatchSize::SmallInput,
            );
        });

        let uri = Uri::parse(input).expect("valid test URI");
        let _ = uri.as_str();
        group.bench_with_input(BenchmarkId::new("cached", name), &uri, |b, uri| {
            b.iter(|| black_box(uri).as_str().len());
        });
    }

    group.finish();
}

/// Benchmark: deriving URIs with `with_*` mutators
fn bench_mutators(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutators");

    let base = Uri::parse("scheme://domain:80/path?query#fragment").expect("valid test URI");
    let path = Path::from_tokens(["/", "a", "/", "b", "/", "c"]);
    let query = Query::from_pairs([(Some("k"), "v"), (None, "flag")]);

    group.bench_function("with_path", |b| {
        b.iter(|| black_box(&base).with_path(black_box(path.clone())));
    });

    group.bench_function("with_query", |b| {
        b.iter(|| black_box(&base).with_query(black_box(query.clone())));
    });

    group.bench_function("with_port_number", |b| {
        b.iter(|| black_box(&base).with_port_number(black_box(8080)));
    });

    group.bench_function("from_components", |b| {
        b.iter(|| {
            Uri::scheme_name(black_box("scheme"))
                .expect("valid scheme")
                .with_host_name(black_box("domain"))
                .with_port_number(80)
                .with_path(path.clone())
                .with_fragment_identifier("fragment")
        });
    });

    group.finish();
}

/// Benchmark: percent-encoding and decoding at varying lengths
fn bench_percent_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("percent_encoding");

    for len in [8, 64, 512] {
        let decoded: String = "a b/é?".chars().cycle().take(len).collect();
        let encoded = PATH_SEGMENT.encode(&decoded);

        group.throughput(Throughput::Bytes(decoded.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode", len), &decoded, |b, decoded| {
            b.iter(|| PATH_SEGMENT.encode(black_box(decoded)));
        });

        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::new("decode", len), &encoded, |b, encoded| {
            b.iter(|| pct::decode(black_box(encoded)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_render,
    bench_mutators,
    bench_percent_encoding,
);
criterion_main!(benches);
