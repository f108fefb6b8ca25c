#![allow(missing_copy_implementations, missing_debug_implementations)]

#[cfg(feature = "profiler")]
use measureme::{EventId, Profiler as MeasuremeProfiler, TimingGuard};
#[cfg(feature = "profiler")]
use once_cell::sync::OnceCell;
use std::fmt::{self, Debug};
#[cfg(feature = "profiler")]
use std::{
    path::Path,
    thread::{current, ThreadId},
};

/// Profiler for the engine, based on `measureme`.
#[cfg(feature = "profiler")]
pub struct Profiler {
    profiler: MeasuremeProfiler,
}

/// This static instance must never be public, and its only access must be
/// done through the `global()` and `drop()` methods.
#[cfg(feature = "profiler")]
static INSTANCE: OnceCell<Profiler> = OnceCell::new();

#[cfg(feature = "profiler")]
impl Profiler {
    /// Start a new profiled event.
    pub fn start_event(&self, label: &str, category: &str) -> TimingGuard<'_> {
        let kind = self.profiler.alloc_string(category);
        let id = EventId::from_label(self.profiler.alloc_string(label));
        let thread_id = Self::thread_id_to_u32(current().id());
        self.profiler
            .start_recording_interval_event(kind, id, thread_id)
    }

    fn default() -> Self {
        let profiler =
            MeasuremeProfiler::new(Path::new("./shrike_trace")).expect("must be able to create file");
        Self { profiler }
    }

    /// Return the global instance of the profiler.
    pub fn global() -> &'static Self {
        INSTANCE.get_or_init(Self::default)
    }

    fn thread_id_to_u32(tid: ThreadId) -> u32 {
        // As u64 is not yet stable, use the Debug output which contains the id.
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        std::hash::Hash::hash(&tid, &mut hasher);
        std::hash::Hasher::finish(&hasher) as u32
    }
}

impl Debug for Profiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt("no debug implemented", f)
    }
}

/// A no-op profiler used when the `profiler` feature is disabled.
#[cfg(not(feature = "profiler"))]
pub struct Profiler;

#[allow(clippy::unused_unit, clippy::unused_self)]
#[cfg(not(feature = "profiler"))]
impl Profiler {
    /// Start a new profiled event.
    pub fn start_event(&self, _label: &str, _category: &str) -> () {}

    /// Return the global instance of the profiler.
    pub const fn global() -> Self {
        Self
    }
}
