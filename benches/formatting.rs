use criterion::{Criterion, criterion_group, criterion_main};
use rotalog::fmt::{Caller, LineFormat, LineTemplate, LineValues};
use rotalog::level::Level;
use std::hint::black_box;
use std::panic::Location;

fn bench_template_render(c: &mut Criterion) {
    let template = LineTemplate::default();
    let values = LineValues {
        timestamp: "2025/01/15 14:30:00 ",
        tag: "INFO",
        name: "main: ",
        msg: "Application started successfully",
        ..LineValues::default()
    };

    c.bench_function("LineTemplate::render", |b| {
        b.iter(|| template.render(black_box(&values)));
    });
}

fn bench_line_format_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("LineFormat::render");
    let location = Location::caller();

    let plain = LineFormat::new().timestamp("");
    group.bench_function("no_timestamp", |b| {
        b.iter(|| plain.render(Level::Info, "main: ", location, black_box("request served")));
    });

    let full = LineFormat::new().caller(Caller::Short);
    group.bench_function("timestamp_and_caller", |b| {
        b.iter(|| full.render(Level::Warn, "main: ", location, black_box("request served")));
    });

    group.finish();
}

fn bench_level_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("Level::detect");

    let early = b"2025/01/15 14:30:00 WARN main: disk almost full\n";
    group.bench_function("tagged", |b| {
        b.iter(|| Level::detect(black_box(early)));
    });

    let untagged = b"a line without any level tag in it at all\n";
    group.bench_function("untagged", |b| {
        b.iter(|| Level::detect(black_box(untagged)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_template_render,
    bench_line_format_render,
    bench_level_detect,
);
criterion_main!(benches);
