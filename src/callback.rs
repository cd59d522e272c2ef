//! Training callbacks that record hparams sessions
//!
//! A session is one training run: [`HParamsCallback`] writes a session start
//! record (hyperparameter values, group name, start time) when training
//! begins and a session end record (status, end time) when it ends.
//!
//! ```rust
//! use trueno_hparams::callback::{
//!     run_with_callbacks, HParamsCallback, TrainContext, TrainingCallback,
//! };
//! use trueno_hparams::hparams::{HParam, HParamKey, HParamValue, IntInterval};
//! use trueno_hparams::writer::MemoryWriter;
//!
//! let dense = HParam::new("dense_neurons").with_domain(IntInterval::new(4, 16)?);
//! let hparams: Vec<(HParamKey, HParamValue)> = vec![
//!     ("optimizer".into(), "adam".into()),
//!     (dense.into(), 8.into()),
//! ];
//! let mut callback = HParamsCallback::new(MemoryWriter::new(), hparams)?.with_group_name("psl27");
//!
//! let mut callbacks: [&mut dyn TrainingCallback; 1] = [&mut callback];
//! run_with_callbacks(&mut callbacks, &TrainContext::eager(), || {
//!     Ok::<_, trueno_hparams::Error>(())
//! })?;
//! assert_eq!(callback.writer().len(), 2);
//! # Ok::<(), trueno_hparams::Error>(())
//! ```

use std::collections::BTreeMap;
use std::fmt;

use tracing::{info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::WriterConfig;
use crate::hparams::{normalize_hparams, HParamKey, HParamValue};
use crate::proto::Status;
use crate::summary::{session_end_pb, session_start_pb};
use crate::writer::{EventFileWriter, SummaryWriter};
use crate::{Error, Result};

/// How the surrounding framework evaluates writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Writes happen immediately when issued
    Eager,
    /// Writes are deferred into a graph that runs later
    Graph,
}

/// Information the training loop passes to callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainContext {
    execution_mode: ExecutionMode,
}

impl TrainContext {
    /// Context with the given execution mode.
    #[must_use]
    pub const fn new(execution_mode: ExecutionMode) -> Self {
        Self { execution_mode }
    }

    /// Eager execution context.
    #[must_use]
    pub const fn eager() -> Self {
        Self::new(ExecutionMode::Eager)
    }

    /// Deferred graph execution context.
    #[must_use]
    pub const fn graph() -> Self {
        Self::new(ExecutionMode::Graph)
    }

    /// Get the execution mode.
    #[must_use]
    pub const fn execution_mode(&self) -> ExecutionMode {
        self.execution_mode
    }
}

/// How a training run finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Training returned normally
    Success,
    /// Training failed
    Failure,
}

impl RunOutcome {
    /// Session status recorded for this outcome.
    #[must_use]
    pub const fn status(self) -> Status {
        match self {
            Self::Success => Status::Success,
            Self::Failure => Status::Failure,
        }
    }
}

/// Hooks invoked by a training loop.
pub trait TrainingCallback {
    /// Called once before training starts.
    ///
    /// # Errors
    ///
    /// An error aborts the run before training starts.
    fn on_train_begin(&mut self, _ctx: &TrainContext) -> Result<()> {
        Ok(())
    }

    /// Called once after training finishes, successfully or not.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn on_train_end(&mut self, _ctx: &TrainContext, _outcome: RunOutcome) -> Result<()> {
        Ok(())
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Training has not begun
    NotStarted,
    /// Start record written
    Running,
    /// End record written
    Ended,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "not-started",
            Self::Running => "running",
            Self::Ended => "ended",
        };
        f.write_str(name)
    }
}

/// Records one hparams session around a training run.
pub struct HParamsCallback<W: SummaryWriter> {
    writer: W,
    hparams: BTreeMap<String, HParamValue>,
    group_name: String,
    clock: Box<dyn Clock>,
    state: SessionState,
}

impl<W: SummaryWriter> HParamsCallback<W> {
    /// Create a callback writing to `writer`.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateHParam` if two keys share a name.
    pub fn new<I, K, V>(writer: W, hparams: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<HParamKey>,
        V: Into<HParamValue>,
    {
        Ok(Self {
            writer,
            hparams: normalize_hparams(hparams)?,
            group_name: String::new(),
            clock: Box::new(SystemClock),
            state: SessionState::NotStarted,
        })
    }

    /// Set the group name sessions are grouped under.
    #[must_use]
    pub fn with_group_name(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = group_name.into();
        self
    }

    /// Replace the wall-clock source.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Normalized hyperparameter values.
    #[must_use]
    pub const fn hparams(&self) -> &BTreeMap<String, HParamValue> {
        &self.hparams
    }

    /// Group name, empty if unset.
    #[must_use]
    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    /// Current session state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// The underlying writer.
    #[must_use]
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Consume the callback, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn check(&self, ctx: &TrainContext, expected: SessionState) -> Result<()> {
        if ctx.execution_mode() != ExecutionMode::Eager {
            return Err(Error::EagerExecutionRequired);
        }
        if self.state != expected {
            warn!(expected = %expected, actual = %self.state, "hparams callback hook out of order");
            return Err(Error::InvalidSessionState {
                expected,
                actual: self.state,
            });
        }
        Ok(())
    }
}

impl HParamsCallback<EventFileWriter> {
    /// Create a callback writing a new event file under `config.logdir`.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateHParam` for duplicate names, or an error if
    /// the event file cannot be created.
    pub fn for_logdir<I, K, V>(config: &WriterConfig, hparams: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<HParamKey>,
        V: Into<HParamValue>,
    {
        let hparams = normalize_hparams(hparams)?;
        Self::new(EventFileWriter::create(config)?, hparams)
    }
}

impl<W: SummaryWriter> TrainingCallback for HParamsCallback<W> {
    fn on_train_begin(&mut self, ctx: &TrainContext) -> Result<()> {
        self.check(ctx, SessionState::NotStarted)?;
        let summary = session_start_pb(&self.hparams, &self.group_name, self.clock.now_secs());
        self.writer.write_summary(&summary, 0)?;
        self.state = SessionState::Running;
        info!(group = %self.group_name, hparams = self.hparams.len(), "hparams session started");
        Ok(())
    }

    fn on_train_end(&mut self, ctx: &TrainContext, outcome: RunOutcome) -> Result<()> {
        self.check(ctx, SessionState::Running)?;
        let summary = session_end_pb(outcome.status(), self.clock.now_secs());
        self.writer.write_summary(&summary, 0)?;
        self.writer.flush()?;
        self.state = SessionState::Ended;
        info!(
            group = %self.group_name,
            status = outcome.status().as_str_name(),
            "hparams session ended"
        );
        Ok(())
    }
}

/// Run `train` between the callbacks' begin and end hooks.
///
/// Every callback's `on_train_begin` runs first, in order; the first error
/// aborts the run before training. `on_train_end` receives
/// `RunOutcome::Failure` if `train` returned an error. A training error
/// takes precedence over an error from an end hook.
///
/// # Errors
///
/// Returns the training error, or a callback error converted into `E`.
pub fn run_with_callbacks<T, E, F>(
    callbacks: &mut [&mut dyn TrainingCallback],
    ctx: &TrainContext,
    train: F,
) -> std::result::Result<T, E>
where
    F: FnOnce() -> std::result::Result<T, E>,
    E: From<Error>,
{
    for callback in callbacks.iter_mut() {
        callback.on_train_begin(ctx)?;
    }

    let result = train();
    let outcome = if result.is_ok() {
        RunOutcome::Success
    } else {
        RunOutcome::Failure
    };

    let mut end_error = None;
    for callback in callbacks.iter_mut() {
        if let Err(e) = callback.on_train_end(ctx, outcome) {
            warn!(error = %e, "training callback failed at end of run");
            end_error.get_or_insert(e);
        }
    }

    let value = result?;
    match end_error {
        Some(e) => Err(e.into()),
        None => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::hparams::HParam;
    use crate::metadata::{parse_session_end_info_plugin_data, parse_session_start_info_plugin_data};
    use crate::proto::Summary;
    use crate::writer::MemoryWriter;
    use chrono::{TimeZone, Utc};

    fn content(summary: &Summary) -> &[u8] {
        &summary.value[0]
            .metadata
            .as_ref()
            .unwrap()
            .plugin_data
            .as_ref()
            .unwrap()
            .content
    }

    fn callback() -> HParamsCallback<MemoryWriter> {
        let hparams: Vec<(HParamKey, HParamValue)> = vec![
            ("optimizer".into(), "adam".into()),
            (HParam::new("dense_neurons").into(), 8.into()),
        ];
        HParamsCallback::new(MemoryWriter::new(), hparams)
            .unwrap()
            .with_group_name("psl27")
            .with_clock(FixedClock(Utc.timestamp_opt(100, 0).unwrap()))
    }

    #[test]
    fn test_lifecycle_writes_start_and_end() {
        let mut cb = callback();
        let ctx = TrainContext::eager();
        assert_eq!(cb.state(), SessionState::NotStarted);
        cb.on_train_begin(&ctx).unwrap();
        assert_eq!(cb.state(), SessionState::Running);
        cb.on_train_end(&ctx, RunOutcome::Success).unwrap();
        assert_eq!(cb.state(), SessionState::Ended);

        let summaries = cb.writer().summaries();
        assert_eq!(summaries.len(), 2);
        let start = parse_session_start_info_plugin_data(content(&summaries[0].1)).unwrap();
        assert_eq!(start.group_name, "psl27");
        assert!((start.start_time_secs - 100.0).abs() < f64::EPSILON);
        let end = parse_session_end_info_plugin_data(content(&summaries[1].1)).unwrap();
        assert_eq!(end.status(), Status::Success);
    }

    #[test]
    fn test_graph_mode_rejected() {
        let mut cb = callback();
        let err = cb.on_train_begin(&TrainContext::graph()).unwrap_err();
        assert!(err.to_string().contains("only supported in eager execution mode"));
        assert!(cb.writer().is_empty());
    }

    #[test]
    fn test_end_before_begin_rejected() {
        let mut cb = callback();
        let err = cb
            .on_train_end(&TrainContext::eager(), RunOutcome::Success)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSessionState {
                expected: SessionState::Running,
                actual: SessionState::NotStarted,
            }
        ));
    }

    #[test]
    fn test_begin_twice_rejected() {
        let mut cb = callback();
        let ctx = TrainContext::eager();
        cb.on_train_begin(&ctx).unwrap();
        assert!(cb.on_train_begin(&ctx).is_err());
        assert_eq!(cb.writer().len(), 1);
    }

    #[test]
    fn test_duplicate_names_rejected_at_construction() {
        let hparams = vec![(HParam::new("foo"), 1), (HParam::new("foo"), 1)];
        let err = HParamsCallback::new(MemoryWriter::new(), hparams)
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "multiple values specified for hparam 'foo'");
    }

    #[test]
    fn test_run_with_callbacks_failure_status() {
        let mut cb = callback();
        {
            let mut callbacks: [&mut dyn TrainingCallback; 1] = [&mut cb];
            let result: Result<()> = run_with_callbacks(&mut callbacks, &TrainContext::eager(), || {
                Err(Error::InvalidDomain("diverged".to_string()))
            });
            assert!(result.is_err());
        }
        let end =
            parse_session_end_info_plugin_data(content(&cb.writer().summaries()[1].1)).unwrap();
        assert_eq!(end.status(), Status::Failure);
    }

    #[test]
    fn test_run_with_callbacks_skips_training_when_begin_fails() {
        let mut cb = callback();
        let mut trained = false;
        {
            let mut callbacks: [&mut dyn TrainingCallback; 1] = [&mut cb];
            let result: Result<()> = run_with_callbacks(&mut callbacks, &TrainContext::graph(), || {
                trained = true;
                Ok(())
            });
            assert!(matches!(result, Err(Error::EagerExecutionRequired)));
        }
        assert!(!trained);
    }
}
