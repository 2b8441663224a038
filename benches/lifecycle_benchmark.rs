/*!
 * Lifecycle Benchmarks
 *
 * Attach/detach hot path and full create-to-dispose cost
 */

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use tag_source::SourceLifecycle;

fn bench_attach_detach(c: &mut Criterion) {
    c.bench_function("attach_detach_pair", |b| {
        let mut source = SourceLifecycle::new("bench-pair", || {});
        let keep_alive = source.attach();

        b.iter(|| {
            let tagger = source.attach();
            source.detach(tagger);
        });

        source.detach(keep_alive);
    });
}

fn bench_full_lifecycle(c: &mut Criterion) {
    c.bench_function("create_attach_dispose", |b| {
        b.iter_batched(
            || SourceLifecycle::new("bench-full", || {}),
            |mut source| {
                let tagger = source.attach();
                source.detach(tagger);
                source
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_attach_detach, bench_full_lifecycle);
criterion_main!(benches);
