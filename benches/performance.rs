//! Performance benchmarks for the latency probes
//!
//! The measurement loop itself must stay cheap compared with what it times,
//! so these cover the per-run and per-trial work done outside the network.

use clap::Parser;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use db_latency_probe::{
    cli::Cli,
    config::ConfigParser,
    models::BenchmarkConfig,
    output::{OutputFormatter, OutputFormatterFactory, PlainFormatter},
    probe::codec::{decode_ping_response, encode_ping_request},
    sql::{split_statements, HardParse},
    stats::StatSummary,
    types::ProbeKind,
};
use std::hint::black_box;

/// Deterministic latency samples in the 1..50 ms range
fn create_sample_durations(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 1.0 + ((i * 7919) % 4900) as f64 / 100.0)
        .collect()
}

fn create_ping_reply(body: &str) -> Vec<u8> {
    let mut raw = vec![0x00, 0x41, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    raw.extend_from_slice(body.as_bytes());
    raw
}

/// Benchmark statistics calculation performance
fn benchmark_statistics_calculation(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");

    for size in [10, 100, 1000, 10_000].iter() {
        let durations = create_sample_durations(*size);
        group.bench_with_input(BenchmarkId::new("compute", size), size, |b, _| {
            b.iter(|| {
                let summary = StatSummary::compute(black_box(&durations), black_box(3));
                black_box(summary);
            });
        });
    }

    let empty: Vec<f64> = Vec::new();
    group.bench_function("compute_empty", |b| {
        b.iter(|| black_box(StatSummary::compute(black_box(&empty), 10)));
    });

    group.finish();
}

/// Benchmark the listener ping codec
fn benchmark_ping_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("ping_codec");

    group.bench_function("encode_request", |b| {
        b.iter(|| black_box(encode_ping_request()));
    });

    let accepted = create_ping_reply("(DESCRIPTION=(TMP=)(VSNNUM=0)(ERR=0)(ALIAS=LISTENER))");
    group.bench_function("decode_accepted", |b| {
        b.iter(|| black_box(decode_ping_response(black_box(&accepted))));
    });

    let rejected = create_ping_reply("(DESCRIPTION=(TMP=)(VSNNUM=0)(ERR=1)(ALIAS=LISTENER))");
    group.bench_function("decode_rejected", |b| {
        b.iter(|| black_box(decode_ping_response(black_box(&rejected))));
    });

    group.finish();
}

/// Benchmark SQL text preparation
fn benchmark_sql_preparation(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_preparation");

    let script: String = (0..200)
        .map(|i| format!("SELECT * FROM orders WHERE id = {};\n", i))
        .collect();
    group.bench_function("split_statements", |b| {
        b.iter(|| black_box(split_statements(black_box(&script))));
    });

    let hard_parse = HardParse::new();
    group.bench_function("hard_parse_rewrite", |b| {
        b.iter(|| black_box(hard_parse.rewrite(black_box("SELECT * FROM orders"))));
    });

    group.finish();
}

/// Benchmark configuration parsing and report formatting
fn benchmark_config_and_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("config_and_output");

    group.bench_function("parse_cli_args", |b| {
        let args = ["dlp", "ping", "db.local", "-c", "20", "-t", "1", "-w", "0.1", "-i"];
        b.iter(|| black_box(Cli::try_parse_from(black_box(args)).unwrap()));
    });

    group.bench_function("apply_cli_overrides", |b| {
        let cli = Cli::try_parse_from(["dlp", "tcp", "example.com", "-c", "5"]).unwrap();
        let parser = ConfigParser::new(cli);
        b.iter(|| {
            let mut config = BenchmarkConfig::for_probe(ProbeKind::TcpConnect);
            parser.apply_cli_overrides(&mut config);
            black_box(config);
        });
    });

    let summary = StatSummary::compute(&create_sample_durations(100), 2);
    let plain = PlainFormatter::default();
    group.bench_function("format_summary_plain", |b| {
        b.iter(|| black_box(plain.format_summary(black_box(&summary)).unwrap()));
    });

    let colored = OutputFormatterFactory::create_formatter(true);
    group.bench_function("format_summary_colored", |b| {
        b.iter(|| black_box(colored.format_summary(black_box(&summary)).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_statistics_calculation,
    benchmark_ping_codec,
    benchmark_sql_preparation,
    benchmark_config_and_output
);

criterion_main!(benches);
