use criterion::{black_box, criterion_group, criterion_main, Criterion};
use powerline_prompt::*;
use std::sync::Arc;
use std::time::Duration;

const SEGMENT_COUNT: usize = 20;

fn names() -> Vec<String> {
    (0..SEGMENT_COUNT).map(|i| format!("segment-{}", i)).collect()
}

fn colored_segments() -> SegmentMap {
    names()
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let mut segment = Segment::new();
            segment.set_text_color(SegmentColor::new(15, i as u8));
            segment.add_text(format!("{} $HOME", name));
            if i % 5 == 0 {
                segment.add_headline(format!("{} warning", name));
            }
            (name, segment)
        })
        .collect()
}

fn bench_render(c: &mut Criterion) {
    let requests = SegmentRequest::parse_all(names());
    let segments = colored_segments();

    c.bench_function("render_20_segments", |b| {
        b.iter(|| black_box(render(black_box(&requests), black_box(&segments))))
    });
}

fn bench_scheduler(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let mut registry = Registry::new();
    for name in names() {
        registry.register(name, |ctx| async move {
            let mut segment = Segment::new();
            segment.set_text_color(SegmentColor::new(0, 148));
            segment.add_text(ctx.name());
            segment
        });
    }

    let scheduler = Scheduler::new(
        Arc::new(registry),
        Arc::new(Environment::from_process()),
        Duration::from_secs(1),
    );
    let requests = SegmentRequest::parse_all(names());

    c.bench_function("schedule_20_instant_segments", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(scheduler.run(&requests).await.unwrap()) })
    });
}

fn bench_builtin_prompt(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let scheduler = Scheduler::new(
        Arc::new(Registry::builtin()),
        Arc::new(Environment::from_vars([
            ("PWD", "/usr/local/share"),
            ("HOME", "/home/bench"),
            ("SHLVL", "2"),
            ("USER", "bench"),
        ])),
        Duration::from_secs(1),
    );
    let requests = SegmentRequest::parse_all([
        "cwd-exists",
        "shell-level",
        "work-dir=3",
        "user-name=root",
        "current-time",
        "exit-code=0",
    ]);

    c.bench_function("builtin_env_only_prompt", |b| {
        b.to_async(&rt).iter(|| async {
            let segments = scheduler.run(&requests).await.unwrap();
            black_box(render(&requests, &segments))
        })
    });
}

criterion_group!(benches, bench_render, bench_scheduler, bench_builtin_prompt);
criterion_main!(benches);
