/// Contention benchmarks for the device error tracker
///
/// Measures mark/check cost on a single thread and with several threads
/// hammering the shared lock.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use device_cooldown::DeviceErrorTracker;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn bench_single_thread(c: &mut Criterion) {
    let tracker = DeviceErrorTracker::new(true, Duration::from_secs(30));
    tracker.mark_error("/dev/sda");

    c.bench_function("check_timeout_elapsed_hit", |b| {
        b.iter(|| black_box(tracker.check_timeout_elapsed(black_box("/dev/sda"))))
    });

    c.bench_function("check_timeout_elapsed_miss", |b| {
        b.iter(|| black_box(tracker.check_timeout_elapsed(black_box("/dev/sdz"))))
    });

    c.bench_function("mark_forget_cycle", |b| {
        b.iter(|| {
            tracker.mark_error(black_box("/dev/sdb"));
            tracker.forget(black_box("/dev/sdb"));
        })
    });
}

fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended_mark_check");

    for threads in [2usize, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &threads| {
            let tracker = Arc::new(DeviceErrorTracker::new(true, Duration::from_secs(30)));
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|t| {
                        let tracker = Arc::clone(&tracker);
                        thread::spawn(move || {
                            let device = format!("/dev/nvme{}n1", t);
                            for _ in 0..1_000 {
                                tracker.mark_error(&device);
                                black_box(tracker.check_timeout_elapsed(&device));
                            }
                            tracker.forget(&device);
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().unwrap();
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_thread, bench_contended);
criterion_main!(benches);
