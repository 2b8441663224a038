/*!
 * Shared Source Lifecycle
 *
 * Reference-counted attach/detach with deterministic one-shot disposal
 */

use super::affinity::AffinityGuard;
use super::{sentinel, SourceMetadata};
use crate::core::errors::UsageViolation;
use crate::core::id::{self, SourceId, TaggerId};
use crate::monitoring::{Category, Collector, Event, Payload, Severity};
use std::sync::Arc;

/// Handle representing one tagger's claim on a source
///
/// Identity only: the handle pins down which source a detach call is aimed
/// at and carries no other state. Handles are `Copy`, so an unbalanced
/// detach remains expressible; the count check catches it at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaggerHandle {
    id: TaggerId,
    source: SourceId,
}

impl TaggerHandle {
    /// Tagger id
    #[inline]
    pub fn id(&self) -> TaggerId {
        self.id
    }

    /// Id of the source this handle belongs to
    #[inline]
    pub fn source(&self) -> SourceId {
        self.source
    }
}

/// Reference-counted lifecycle for one shared tag source
///
/// Created with a disconnect hook, kept alive by tagger attachments, torn
/// down exactly once when the last tagger detaches. Disposal runs
/// synchronously inside the detach that drops the count to zero.
///
/// All attach/detach calls must be serialized by one logical owner thread.
/// The count is a plain `u32` with no lock around it; debug builds verify
/// the threading discipline, release builds trust it.
pub struct SourceLifecycle {
    taggers: u32,
    disposed: bool,
    observers: Vec<Box<dyn FnOnce() + Send>>,
    disconnect: Option<Box<dyn FnOnce() + Send>>,
    affinity: AffinityGuard,
    metadata: SourceMetadata,
    collector: Option<Arc<Collector>>,
}

impl SourceLifecycle {
    /// Create a new source with a disconnect hook
    ///
    /// The hook runs exactly once, at disposal, after the disposal
    /// observers have fired.
    pub fn new<F>(name: &'static str, disconnect: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let metadata = SourceMetadata::new(name, id::next_source_id());
        sentinel::register(metadata.id, name);

        log::debug!("source {} ({}) created", metadata.id, name);

        Self {
            taggers: 0,
            disposed: false,
            observers: Vec::new(),
            disconnect: Some(Box::new(disconnect)),
            affinity: AffinityGuard::default(),
            metadata,
            collector: None,
        }
    }

    /// Attach a monitoring collector
    pub fn with_collector(mut self, collector: Arc<Collector>) -> Self {
        self.collector = Some(collector);
        self.emit(
            Severity::Debug,
            Payload::SourceCreated {
                name: self.metadata.name.to_string(),
            },
        );
        self
    }

    /// Source id
    #[inline]
    pub fn id(&self) -> SourceId {
        self.metadata.id
    }

    /// Source metadata
    #[inline]
    pub fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    /// Number of live tagger attachments
    #[inline]
    pub fn tagger_count(&self) -> u32 {
        self.taggers
    }

    /// Whether the source has been torn down
    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Register a disposal observer
    ///
    /// Observers fire exactly once, in registration order, inside the call
    /// that disposes the source. Registration after disposal is dropped:
    /// the notification has already fired.
    pub fn on_disposed<F>(&mut self, observer: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.disposed {
            log::debug!(
                "source {} observer registered after disposal, dropping",
                self.metadata.id
            );
            return;
        }
        self.observers.push(Box::new(observer));
    }

    /// Attach a new tagger, keeping the source alive
    ///
    /// The first attach records the calling thread as the owner thread in
    /// debug builds.
    ///
    /// # Panics
    ///
    /// Panics if the source is already disposed; attaching to a disposed
    /// source is a caller bug.
    pub fn attach(&mut self) -> TaggerHandle {
        if self.disposed {
            let violation = UsageViolation::UseAfterDispose(self.metadata.id);
            log::error!("{violation}");
            panic!("{violation}");
        }

        self.taggers += 1;
        if self.taggers == 1 {
            self.affinity.record();
        }

        let handle = TaggerHandle {
            id: id::next_tagger_id(),
            source: self.metadata.id,
        };

        log::debug!(
            "tagger {} attached to source {} ({} live)",
            handle.id,
            self.metadata.id,
            self.taggers
        );
        self.emit(
            Severity::Debug,
            Payload::TaggerAttached {
                taggers: self.taggers,
            },
        );

        handle
    }

    /// Detach a tagger, disposing the source when the count reaches zero
    ///
    /// # Panics
    ///
    /// Panics if no taggers are outstanding (an unmatched detach), or, in
    /// debug builds, if the handle belongs to another source or the call
    /// comes from a thread other than the recorded owner.
    pub fn detach(&mut self, tagger: TaggerHandle) {
        if cfg!(debug_assertions) && tagger.source != self.metadata.id {
            let violation = UsageViolation::ForeignTagger {
                tagger: tagger.id,
                expected: tagger.source,
                actual: self.metadata.id,
            };
            log::error!("{violation}");
            panic!("{violation}");
        }

        if self.taggers == 0 {
            let violation = UsageViolation::NegativeCount(self.metadata.id);
            log::error!("{violation}");
            panic!("{violation}");
        }

        self.affinity.verify(self.metadata.id);

        self.taggers -= 1;

        log::debug!(
            "tagger {} detached from source {} ({} live)",
            tagger.id,
            self.metadata.id,
            self.taggers
        );
        self.emit(
            Severity::Debug,
            Payload::TaggerDetached {
                taggers: self.taggers,
            },
        );

        // A forced disposal may have run while taggers were still attached;
        // the count draining to zero afterwards must not dispose again.
        if self.taggers == 0 && !self.disposed {
            self.dispose(false);
        }
    }

    /// Dispose immediately, bypassing the reference count
    ///
    /// Test-harness escape hatch for deterministic teardown without
    /// simulating every detach. Not part of the production contract. The
    /// count is left untouched; organic detaches that later drain it to
    /// zero will not dispose again.
    pub fn force_dispose(&mut self) {
        self.dispose(true);
    }

    fn dispose(&mut self, forced: bool) {
        if self.disposed {
            let violation = UsageViolation::DoubleDispose(self.metadata.id);
            if cfg!(debug_assertions) {
                log::error!("{violation}");
                panic!("{violation}");
            }
            log::warn!("{violation}, ignoring");
            self.emit(Severity::Warn, Payload::DoubleDisposeIgnored);
            return;
        }

        self.disposed = true;

        for observer in self.observers.drain(..) {
            observer();
        }

        if let Some(disconnect) = self.disconnect.take() {
            disconnect();
        }

        sentinel::deregister(self.metadata.id);

        let lifetime_us = self.metadata.lifetime_micros();
        log::debug!(
            "source {} ({}) disposed after {}us{}",
            self.metadata.id,
            self.metadata.name,
            lifetime_us,
            if forced { " (forced)" } else { "" }
        );
        self.emit(
            Severity::Info,
            Payload::SourceDisposed { lifetime_us, forced },
        );
    }

    #[inline]
    fn emit(&self, severity: Severity, payload: Payload) {
        if let Some(ref collector) = self.collector {
            collector.emit(
                Event::new(severity, Category::Lifecycle, payload).with_source(self.metadata.id),
            );
        }
    }
}

impl Drop for SourceLifecycle {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            if self.disposed || super::shutdown::shutdown_started() {
                return;
            }

            sentinel::deregister(self.metadata.id);
            if let Some(ref collector) = self.collector {
                collector.emit(
                    Event::new(
                        Severity::Error,
                        Category::Resource,
                        Payload::ResourceLeaked {
                            name: self.metadata.name.to_string(),
                        },
                    )
                    .with_source(self.metadata.id),
                );
            }

            let violation = UsageViolation::LeakOnDrop(self.metadata.id, self.metadata.name);
            log::error!("{violation}");

            // Never double-panic out of a Drop; that aborts the process.
            if !std::thread::panicking() {
                panic!("{violation}");
            }
        }
    }
}
