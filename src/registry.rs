//! The registry of bars and its background redraw thread.
//!
//! [`ProgressRegistry`] is the central type of the crate: a mapping of
//! caller-assigned integer ids to progress records, protected by a single
//! coarse [`Mutex`](parking_lot::Mutex), plus one background thread that
//! periodically snapshots every record and repaints the terminal.
//!
//! # Synchronization Strategy
//!
//! One lock guards the whole map, and it is held for the full per-frame
//! snapshot-and-render pass. Callers mutating a bar contend with the renderer
//! on that lock and nothing else; no per-record locks exist, so every frame
//! observes a consistent set of records. Registration writes all record
//! fields under the same lock, so a concurrent frame can never see a
//! half-registered bar.
//!
//! # Lifecycle
//!
//! The redraw thread starts lazily on the first registration and runs until
//! [`stop`](ProgressRegistry::stop) is called (or the registry is dropped).
//! `stop` is cooperative: it raises a flag the render loop checks each
//! iteration, then joins the thread, so once it returns no further bytes
//! reach the output sink. A stopped registry is terminal — later mutations
//! are accepted but never rendered.

use std::{
    collections::BTreeMap,
    fmt,
    io::Write,
    mem,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use compact_str::CompactString;
use log::{debug, warn};
use parking_lot::Mutex;

use crate::{
    builder::RegistryBuilder,
    record::{ProgressRecord, RecordSnapshot},
    render,
};

/// Interval between redraw frames.
pub(crate) const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// State shared between the registry handle and the redraw thread.
struct Shared {
    /// All tracked records, keyed by caller-assigned id. `BTreeMap` iteration
    /// order is the frame's draw order, so rows never jump between frames.
    records: Mutex<BTreeMap<u32, ProgressRecord>>,
    /// Cooperative stop flag for the redraw loop.
    stop: AtomicBool,
}

/// Lifecycle of the redraw thread.
///
/// `Idle` parks the output sink until the first registration needs it;
/// `Stopped` is terminal.
enum Worker {
    Idle(Box<dyn Write + Send>),
    Running(JoinHandle<()>),
    Stopped,
}

/// A thread-safe registry of named progress bars with a background redraw
/// thread.
///
/// Caller threads mutate bars through [`register`](Self::register),
/// [`update`](Self::update), and [`mark_finished`](Self::mark_finished); a
/// single background thread owns all terminal output. None of the mutation
/// operations block beyond acquiring the shared lock. Unknown ids are
/// silently ignored — the display is a best-effort convenience, so there is
/// no error channel anywhere in this API.
///
/// # Examples
///
/// ```no_run
/// use multibar::ProgressRegistry;
///
/// let registry = ProgressRegistry::new();
/// registry.register(1, "config files", 200);
///
/// for n in 1..=200 {
///     registry.update(1, n);
/// }
///
/// registry.mark_finished(1);
/// registry.stop();
/// ```
pub struct ProgressRegistry {
    shared: Arc<Shared>,
    worker: Mutex<Worker>,
    interval: Duration,
    width: usize,
}

impl fmt::Debug for ProgressRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only metadata; avoids holding the records lock for long.
        f.debug_struct("ProgressRegistry")
            .field("bars", &self.len())
            .finish()
    }
}

impl Default for ProgressRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressRegistry {
    /// Creates a registry with the default configuration: stdout output, a
    /// 100 ms redraw interval, and a 50-cell gauge.
    #[must_use]
    pub fn new() -> Self {
        RegistryBuilder::new().build()
    }

    pub(crate) fn from_parts(
        writer: Box<dyn Write + Send>,
        interval: Duration,
        width: usize,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                records: Mutex::new(BTreeMap::new()),
                stop: AtomicBool::new(false),
            }),
            worker: Mutex::new(Worker::Idle(writer)),
            interval,
            width,
        }
    }

    /// Registers (or re-registers) the bar `id`.
    ///
    /// The record's name, total, and start timestamp are set under the map
    /// lock; a record that already existed keeps its processed count and
    /// finished flag. The redraw thread is started if the registry is still
    /// idle — rows begin appearing within one tick. Registering on a stopped
    /// registry updates the map but never resurrects the thread.
    pub fn register(&self, id: u32, name: impl Into<CompactString>, total: u64) {
        {
            let mut records = self.shared.records.lock();
            let record = records.entry(id).or_default();
            record.name = name.into();
            record.total = total;
            record.start = Instant::now();
        }
        self.ensure_started();
    }

    /// Sets the processed count for `id`; no-op for unknown ids.
    ///
    /// Last write before a frame's lock acquisition wins. The value is not
    /// validated against the bar's total.
    pub fn update(&self, id: u32, processed: u64) {
        if let Some(record) = self.shared.records.lock().get_mut(&id) {
            record.processed = processed;
        }
    }

    /// Marks `id` as finished; no-op for unknown ids.
    ///
    /// The flag currently has no effect on rendering. It is carried in
    /// snapshots for observers that care.
    pub fn mark_finished(&self, id: u32) {
        if let Some(record) = self.shared.records.lock().get_mut(&id) {
            record.finished = true;
        }
    }

    /// Returns a cheap, cloneable [`Bar`] handle bound to `id`.
    ///
    /// The handle shares this registry's state; it is valid to create one for
    /// an id that was never registered, in which case its mutations are
    /// no-ops like any other unknown-id operation.
    #[must_use]
    pub fn bar(&self, id: u32) -> Bar {
        Bar {
            shared: Arc::clone(&self.shared),
            id,
        }
    }

    /// Takes an owned snapshot of every bar, in ascending id order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<RecordSnapshot> {
        self.shared
            .records
            .lock()
            .iter()
            .map(|(id, record)| record.snapshot(*id))
            .collect()
    }

    /// Returns the number of registered bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.records.lock().len()
    }

    /// Returns `true` if no bar has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.records.lock().is_empty()
    }

    /// Stops the redraw thread and waits for it to exit.
    ///
    /// Idempotent: the first call signals the cooperative stop flag and joins
    /// the thread; later calls return immediately. Once `stop` returns, no
    /// further bytes are written to the output sink. Whatever was last drawn
    /// stays on screen — there is no cleanup frame. A never-started registry
    /// lands in the same terminal state, so `stop` is always safe to call
    /// from teardown paths.
    pub fn stop(&self) {
        let mut worker = self.worker.lock();
        if let Worker::Running(handle) = mem::replace(&mut *worker, Worker::Stopped) {
            self.shared.stop.store(true, Ordering::Release);
            if handle.join().is_err() {
                warn!("redraw thread panicked before join");
            }
            debug!("redraw thread stopped");
        }
    }

    /// Spawns the redraw thread if the registry is still idle.
    ///
    /// Idempotent; a stopped registry stays stopped.
    fn ensure_started(&self) {
        let mut worker = self.worker.lock();
        *worker = match mem::replace(&mut *worker, Worker::Stopped) {
            Worker::Idle(writer) => {
                let shared = Arc::clone(&self.shared);
                let interval = self.interval;
                let width = self.width;
                debug!("redraw thread started");
                Worker::Running(thread::spawn(move || run(&shared, writer, interval, width)))
            }
            other => other,
        };
    }
}

impl Drop for ProgressRegistry {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The redraw loop. Runs on the background thread until the stop flag is
/// raised.
///
/// Each iteration holds the map lock for the whole snapshot-and-render pass,
/// writes the frame, then sleeps the tick interval. Sink write failures are
/// deliberately discarded: the display has no error channel and no fallback
/// renderer.
fn run(shared: &Shared, mut writer: Box<dyn Write + Send>, interval: Duration, width: usize) {
    while !shared.stop.load(Ordering::Acquire) {
        {
            let records = shared.records.lock();
            let mut frame = String::new();
            for (row, (id, record)) in records.iter().enumerate() {
                frame.push_str(&render::render_row(row + 1, &record.snapshot(*id), width));
            }
            let _ = writer.write_all(frame.as_bytes());
            let _ = writer.flush();
        }
        thread::sleep(interval);
    }
    debug!("redraw thread exiting");
}

/// A cheap, cloneable handle to one bar within a [`ProgressRegistry`].
///
/// `Bar` carries the registry's shared state and a fixed id, so worker code
/// can report progress without threading the registry and id around
/// separately. All methods are silent no-ops if the id is not registered.
#[derive(Clone)]
pub struct Bar {
    shared: Arc<Shared>,
    id: u32,
}

impl fmt::Debug for Bar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bar").field("id", &self.id).finish()
    }
}

impl Bar {
    /// Returns the id this handle is bound to.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Sets the absolute processed count.
    pub fn update(&self, processed: u64) {
        if let Some(record) = self.shared.records.lock().get_mut(&self.id) {
            record.processed = processed;
        }
    }

    /// Increments the processed count.
    pub fn inc(&self, amount: u64) {
        if let Some(record) = self.shared.records.lock().get_mut(&self.id) {
            record.processed += amount;
        }
    }

    /// Marks the bar as finished.
    pub fn finish(&self) {
        if let Some(record) = self.shared.records.lock().get_mut(&self.id) {
            record.finished = true;
        }
    }
}
