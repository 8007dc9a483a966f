//! The progress engine: one live session at a time, redrawn on a cadence.

use std::io::Write;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use tokio::runtime::{Handle, Runtime};

use crate::cadence::Cadence;
use crate::config::ProgressConfig;
use crate::error::{ProgressError, Result};
use crate::redraw;
use crate::session::ProgressSession;

struct EngineState<W> {
    out: W,
    session: Option<ProgressSession>,
    cadence: Option<Cadence>,
    next_generation: u64,
    config: ProgressConfig,
}

struct EngineShared<W> {
    state: Mutex<EngineState<W>>,
    redraws: AtomicU64,
}

impl<W: Write> EngineShared<W> {
    fn lock(&self) -> MutexGuard<'_, EngineState<W>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Draw the active session. Must be called with the state locked.
    fn draw(&self, state: &mut EngineState<W>) {
        let Some(session) = &state.session else {
            return;
        };
        let frame = session.frame();
        if frame.operations.is_empty() {
            return;
        }

        match redraw::draw(&mut state.out, &frame, &state.config) {
            Ok(()) => {
                self.redraws.fetch_add(1, Ordering::Relaxed);
                log::trace!("redrew {} operations", frame.operations.len());
            }
            Err(err) => log::warn!("progress redraw failed: {err}"),
        }
    }

    /// Cadence callback. Returns `false` once the session it was started for
    /// is gone.
    fn tick(&self, generation: u64) -> bool {
        let mut state = self.lock();
        let current = state.session.as_ref().map(ProgressSession::generation);
        if current != Some(generation) {
            return false;
        }
        self.draw(&mut state);
        true
    }

    fn end(&self, generation: Option<u64>) {
        let mut state = self.lock();
        let Some(session) = &state.session else {
            return;
        };
        if generation.is_some_and(|generation| generation != session.generation()) {
            return;
        }

        // Stop the cadence before the final draw; both happen under the lock,
        // so no tick can interleave with it.
        if let Some(mut cadence) = state.cadence.take() {
            cadence.cancel();
        }
        self.draw(&mut state);

        if let Some(session) = state.session.take() {
            log::debug!("progress session {} ended", session.generation());
        }
        if state.config.hide_cursor {
            if let Err(err) = execute!(state.out, Show) {
                log::warn!("could not show the cursor: {err}");
            }
        }
    }
}

/// Live progress display written to `W`.
///
/// At most one [`ProgressSession`] is active at a time. While it is active the
/// display is redrawn every [`ProgressConfig::refresh_interval`] on the
/// ambient tokio runtime, or on a private one-worker runtime when the engine
/// is created outside any runtime.
///
/// # Examples
///
/// ```no_run
/// use stylable_progress::{ProgressConfig, ProgressLogger};
///
/// let logger = ProgressLogger::new(std::io::stdout(), ProgressConfig::default())?;
/// {
///     let progress = logger.get_progress_info("Building");
///     progress.set_total_operations(2);
///     let core = progress.create_task_operation("core");
///     let cli = progress.create_task_operation("cli");
///     core.completed()?;
///     cli.failed("cli: 2 errors")?;
/// } // final redraw here
/// # Ok::<(), stylable_progress::ProgressError>(())
/// ```
pub struct ProgressLogger<W: Write + Send + 'static> {
    shared: Arc<EngineShared<W>>,
    handle: Handle,
    runtime: Option<Runtime>,
}

impl<W: Write + Send + 'static> ProgressLogger<W> {
    pub fn new(out: W, config: ProgressConfig) -> Result<Self> {
        let (handle, runtime) = match Handle::try_current() {
            Ok(handle) => (handle, None),
            Err(_) => {
                let runtime = tokio::runtime::Builder::new_multi_thread()
                    .worker_threads(1)
                    .thread_name("stylable-progress")
                    .enable_time()
                    .build()
                    .map_err(ProgressError::RuntimeInit)?;
                log::debug!("no tokio runtime found; started a private one");
                (runtime.handle().clone(), Some(runtime))
            }
        };

        Ok(Self {
            shared: Arc::new(EngineShared {
                state: Mutex::new(EngineState {
                    out,
                    session: None,
                    cadence: None,
                    next_generation: 1,
                    config,
                }),
                redraws: AtomicU64::new(0),
            }),
            handle,
            runtime,
        })
    }

    /// Return the active session, starting one with `status_message` if none
    /// is active.
    ///
    /// Only the call that starts a session hides the cursor and starts the
    /// cadence. Later calls return the same session and ignore
    /// `status_message`; use [`ProgressSession::set_status_message`] to change it.
    pub fn get_progress_info(&self, status_message: impl Into<String>) -> ProgressScope<'_, W> {
        let mut state = self.shared.lock();
        if let Some(session) = &state.session {
            return ProgressScope {
                logger: self,
                session: session.clone(),
            };
        }

        let generation = state.next_generation;
        state.next_generation += 1;
        let session = ProgressSession::new(generation, status_message.into());
        state.session = Some(session.clone());

        if state.config.hide_cursor {
            if let Err(err) = execute!(state.out, Hide) {
                log::warn!("could not hide the cursor: {err}");
            }
        }
        state.cadence = Some(self.start_cadence(generation, state.config.refresh_interval));
        log::debug!("progress session {generation} started");

        ProgressScope {
            logger: self,
            session,
        }
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<ProgressSession> {
        self.shared.lock().session.clone()
    }

    pub fn is_active(&self) -> bool {
        self.shared.lock().session.is_some()
    }

    /// Draw the active session now. Does nothing without a session or before
    /// its first operation.
    pub fn redraw(&self) {
        let mut state = self.shared.lock();
        self.shared.draw(&mut state);
    }

    /// Number of frames drawn so far, automatic and forced.
    pub fn redraw_count(&self) -> u64 {
        self.shared.redraws.load(Ordering::Relaxed)
    }

    /// Stop the cadence, draw the final frame and release the session.
    pub fn end_progress(&self) {
        self.shared.end(None);
    }

    /// Change the redraw period, restarting the cadence of an active session.
    pub fn set_refresh_interval(&self, interval: Duration) {
        let mut state = self.shared.lock();
        state.config.refresh_interval = interval;
        if let Some(generation) = state.session.as_ref().map(ProgressSession::generation) {
            if let Some(mut cadence) = state.cadence.take() {
                cadence.cancel();
            }
            state.cadence = Some(self.start_cadence(generation, interval));
        }
    }

    pub fn config(&self) -> ProgressConfig {
        self.shared.lock().config.clone()
    }

    /// Run `f` with the writer. Used to inspect captured output.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.shared.lock().out)
    }

    fn start_cadence(&self, generation: u64, period: Duration) -> Cadence {
        let shared: Weak<EngineShared<W>> = Arc::downgrade(&self.shared);
        Cadence::start(&self.handle, period, move || match shared.upgrade() {
            Some(shared) => shared.tick(generation),
            None => false,
        })
    }
}

impl<W: Write + Send + 'static> Drop for ProgressLogger<W> {
    fn drop(&mut self) {
        self.shared.end(None);
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

/// Scope guard for the active session.
///
/// Dereferences to [`ProgressSession`]. Dropping the guard ends progress:
/// the cadence stops and one final frame is drawn. A guard whose session has
/// already ended does nothing when dropped.
#[must_use = "progress ends when the scope guard is dropped"]
pub struct ProgressScope<'a, W: Write + Send + 'static> {
    logger: &'a ProgressLogger<W>,
    session: ProgressSession,
}

impl<W: Write + Send + 'static> ProgressScope<'_, W> {
    pub fn session(&self) -> &ProgressSession {
        &self.session
    }

    /// End progress now instead of at the end of the scope.
    pub fn dispose(self) {
        drop(self);
    }
}

impl<W: Write + Send + 'static> Deref for ProgressScope<'_, W> {
    type Target = ProgressSession;

    fn deref(&self) -> &ProgressSession {
        &self.session
    }
}

impl<W: Write + Send + 'static> Drop for ProgressScope<'_, W> {
    fn drop(&mut self) {
        self.logger.shared.end(Some(self.session.generation()));
    }
}
