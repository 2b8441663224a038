/*!
 * Lifecycle Integration Tests
 *
 * End-to-end attach/detach scenarios through the public API
 */

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tag_source::{Collector, EventFilter, Payload, Severity, SourceLifecycle};

/// Source whose disposal notifications are counted
fn observed_source(name: &'static str) -> (SourceLifecycle, Arc<AtomicUsize>) {
    let mut source = SourceLifecycle::new(name, || {});
    let fired = Arc::new(AtomicUsize::new(0));
    let count = fired.clone();
    source.on_disposed(move || {
        count.fetch_add(1, Ordering::SeqCst);
    });
    (source, fired)
}

#[test]
fn test_two_attaches_one_detach_stays_active() {
    let (mut source, fired) = observed_source("still-active");
    let first = source.attach();
    let second = source.attach();

    source.detach(first);

    assert_eq!(source.tagger_count(), 1);
    assert!(!source.is_disposed());
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    source.detach(second);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn test_notification_fires_once_on_last_detach() {
    let (mut source, fired) = observed_source("balanced");
    let first = source.attach();
    let second = source.attach();

    source.detach(first);
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    source.detach(second);
    assert!(source.is_disposed());
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
#[should_panic(expected = "no outstanding taggers")]
fn test_detach_past_zero_panics() {
    let (mut source, _fired) = observed_source("underflow");
    let tagger = source.attach();
    source.detach(tagger);
    source.detach(tagger);
}

#[test]
#[should_panic(expected = "attached after disposal")]
fn test_attach_after_disposal_panics() {
    let (mut source, _fired) = observed_source("terminal");
    let tagger = source.attach();
    source.detach(tagger);
    source.attach();
}

#[test]
fn test_force_dispose_is_immediate_and_final() {
    let (mut source, fired) = observed_source("forced");
    let first = source.attach();
    let second = source.attach();

    source.force_dispose();
    assert!(source.is_disposed());
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // Draining the outstanding taggers must not notify again.
    source.detach(first);
    source.detach(second);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
#[should_panic(expected = "attached after disposal")]
fn test_attach_after_force_dispose_panics() {
    let (mut source, _fired) = observed_source("forced-terminal");
    source.attach();
    source.force_dispose();
    source.attach();
}

#[test]
fn test_disconnect_runs_after_observers() {
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));

    let hook_order = order.clone();
    let mut source = SourceLifecycle::new("ordering", move || {
        hook_order.lock().unwrap().push("disconnect");
    });

    let observer_order = order.clone();
    source.on_disposed(move || observer_order.lock().unwrap().push("observer"));

    let tagger = source.attach();
    source.detach(tagger);

    assert_eq!(*order.lock().unwrap(), vec!["observer", "disconnect"]);
}

#[test]
fn test_collector_sees_disposal_at_info() {
    let collector = Arc::new(Collector::new());
    let mut source =
        SourceLifecycle::new("watched", || {}).with_collector(collector.clone());

    let tagger = source.attach();
    source.detach(tagger);

    let disposals = collector.matching(&EventFilter {
        min_severity: Some(Severity::Info),
        ..Default::default()
    });
    assert_eq!(disposals.len(), 1);
    assert!(matches!(
        disposals[0].payload,
        Payload::SourceDisposed { forced: false, .. }
    ));
    assert_eq!(disposals[0].source, Some(source.id()));
}

proptest! {
    /// For any attach/detach sequence that never underflows, the source
    /// disposes iff the outstanding count reaches zero, and the disposal
    /// notification fires exactly once no matter the sequence length.
    #[test]
    fn prop_disposes_iff_count_reaches_zero(ops in proptest::collection::vec(any::<bool>(), 1..64)) {
        let mut source = SourceLifecycle::new("prop", || {});
        let fired = Arc::new(AtomicUsize::new(0));
        let count = fired.clone();
        source.on_disposed(move || {
            count.fetch_add(1, Ordering::SeqCst);
        });

        let mut handles = Vec::new();
        let mut disposed = false;

        for &is_attach in &ops {
            if disposed {
                break;
            }
            if is_attach {
                handles.push(source.attach());
            } else if let Some(handle) = handles.pop() {
                source.detach(handle);
                disposed = handles.is_empty();
            }
        }

        prop_assert_eq!(source.is_disposed(), disposed);
        prop_assert_eq!(fired.load(Ordering::SeqCst), usize::from(disposed));

        // Drain the remainder; the notification total must end at one.
        while let Some(handle) = handles.pop() {
            source.detach(handle);
        }
        if !source.is_disposed() {
            source.force_dispose();
        }
        prop_assert_eq!(fired.load(Ordering::SeqCst), 1usize);
    }
}
