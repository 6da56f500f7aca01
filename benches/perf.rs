use std::borrow::Cow;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use tui_recordtree::{
    BranchPath, ExpansionSet, Identify, LevelDef, RecordTree, RecordTreeState, SelectionSet,
};

struct LogLine {
    level: String,
    source: String,
    message: String,
}

impl Identify for LogLine {
    fn message(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.message)
    }
}

fn by_level(record: &LogLine) -> Option<String> {
    Some(record.level.clone())
}

fn by_source(record: &LogLine) -> Option<String> {
    Some(record.source.clone())
}

const SEVERITY: &[&str] = &["ERROR", "WARNING", "INFO", "DEBUG"];

fn levels() -> [LevelDef<LogLine>; 2] {
    [
        LevelDef::new(by_level).fallback("UNKNOWN").ranked(SEVERITY),
        LevelDef::new(by_source).fallback("SYSTEM"),
    ]
}

fn feed(count: usize) -> Vec<LogLine> {
    (0..count)
        .map(|i| LogLine {
            level: SEVERITY[i % SEVERITY.len()].to_owned(),
            source: format!("worker-{}", i % 17),
            message: format!("event {i}"),
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let records = feed(10_000);
    c.bench_function("build_10k_two_levels", |b| {
        b.iter_batched(
            || records.iter().map(|r| LogLine {
                level: r.level.clone(),
                source: r.source.clone(),
                message: r.message.clone(),
            })
            .collect::<Vec<_>>(),
            |records| black_box(RecordTree::build(records, &levels())),
            criterion::BatchSize::LargeInput,
        );
    });
}

fn bench_visible_rows(c: &mut Criterion) {
    let tree = RecordTree::build(feed(10_000), &levels());
    c.bench_function("rebuild_rows_fully_expanded", |b| {
        let mut state = RecordTreeState::new();
        state.expansion_mut().expand_all(&tree);
        b.iter(|| {
            state.invalidate();
            state.ensure_rows(&tree);
            black_box(state.visible_len())
        });
    });
}

fn bench_toggle_cascade(c: &mut Criterion) {
    let tree = RecordTree::build(feed(10_000), &levels());
    c.bench_function("toggle_cascading_collapse", |b| {
        let mut expansion = ExpansionSet::new();
        expansion.expand_all(&tree);
        let error = BranchPath::from("ERROR");
        b.iter(|| {
            // Collapse then re-expand so each iteration does a cascade.
            expansion.toggle(&error);
            expansion.toggle(&error);
            black_box(expansion.len())
        });
    });
}

fn bench_materialize(c: &mut Criterion) {
    let tree = RecordTree::build(feed(10_000), &levels());
    let mut selection = SelectionSet::new();
    selection.select_all(tree.records());
    c.bench_function("materialize_full_selection", |b| {
        b.iter(|| black_box(selection.materialize(tree.records()).len()));
    });
}

criterion_group!(
    benches,
    bench_build,
    bench_visible_rows,
    bench_toggle_cascade,
    bench_materialize
);
criterion_main!(benches);
