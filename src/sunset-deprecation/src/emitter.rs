//! Warning rendering and dispatch.
//!
//! The [`Emitter`] pairs a [`DeprecationRegistry`] with a [`WarningSink`].
//! Library code normally goes through the process-wide emitter via the free
//! functions [`warn_deprecated`] and [`warn_deprecated_same_type_name`];
//! tests and embedders can build their own with [`Emitter::new`].

use crate::config::{DeprecationConfig, SinkKind};
use crate::{DeprecatedType, DeprecationError, DeprecationRecord, DeprecationRegistry, Result};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;
use tracing::{debug, warn};

/// Default number of frames between the emitter and the reported call site.
pub const DEFAULT_STACK_LEVEL: usize = 2;

/// Tracing target used by [`TracingSink`].
pub const TRACING_TARGET: &str = "deprecation";

static GLOBAL_EMITTER: OnceCell<Arc<Emitter>> = OnceCell::new();

/// Category of an emitted warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningCategory {
    Deprecation,
}

impl fmt::Display for WarningCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deprecation => write!(f, "DeprecationWarning"),
        }
    }
}

/// A warning delivered to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecationWarning {
    pub category: WarningCategory,
    pub message: String,
    /// Frames above the emitter the warning is attributed to.
    pub stack_level: usize,
    /// Call site of the deprecated use.
    pub location: &'static Location<'static>,
}

impl DeprecationWarning {
    pub fn new(
        message: impl Into<String>,
        stack_level: usize,
        location: &'static Location<'static>,
    ) -> Self {
        Self {
            category: WarningCategory::Deprecation,
            message: message.into(),
            stack_level,
            location,
        }
    }
}

impl fmt::Display for DeprecationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.location.file(),
            self.location.line(),
            self.category,
            self.message
        )
    }
}

/// Channel that displays or records warnings.
///
/// Emission is infallible: a sink must never abort the caller.
pub trait WarningSink: Send + Sync {
    fn emit(&self, warning: &DeprecationWarning);

    /// Warnings retained by this sink, if it retains any.
    fn captured(&self) -> Vec<DeprecationWarning> {
        Vec::new()
    }
}

/// Sink writing through `tracing` at WARN level.
#[derive(Debug, Clone)]
pub struct TracingSink {
    include_location: bool,
}

impl TracingSink {
    pub fn new() -> Self {
        Self {
            include_location: true,
        }
    }

    pub fn with_location(mut self, include_location: bool) -> Self {
        self.include_location = include_location;
        self
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl WarningSink for TracingSink {
    fn emit(&self, warning: &DeprecationWarning) {
        if self.include_location {
            warn!(
                target: TRACING_TARGET,
                category = %warning.category,
                stack_level = warning.stack_level,
                file = warning.location.file(),
                line = warning.location.line(),
                "{}",
                warning.message
            );
        } else {
            warn!(
                target: TRACING_TARGET,
                category = %warning.category,
                stack_level = warning.stack_level,
                "{}",
                warning.message
            );
        }
    }
}

/// Sink keeping every warning in memory.
#[derive(Debug, Default)]
pub struct CaptureSink {
    warnings: Mutex<Vec<DeprecationWarning>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured messages, in emission order.
    pub fn messages(&self) -> Vec<String> {
        self.warnings.lock().iter().map(|w| w.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.warnings.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.lock().is_empty()
    }

    /// Remove and return everything captured so far.
    pub fn take(&self) -> Vec<DeprecationWarning> {
        std::mem::take(&mut *self.warnings.lock())
    }
}

impl WarningSink for CaptureSink {
    fn emit(&self, warning: &DeprecationWarning) {
        self.warnings.lock().push(warning.clone());
    }

    fn captured(&self) -> Vec<DeprecationWarning> {
        self.warnings.lock().clone()
    }
}

/// Sink discarding every warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl WarningSink for NullSink {
    fn emit(&self, _warning: &DeprecationWarning) {}
}

/// Renders deprecation notices and sends them to a sink, once per record.
pub struct Emitter {
    registry: Arc<DeprecationRegistry>,
    sink: Arc<dyn WarningSink>,
    enabled: bool,
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("registry", &self.registry)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl Emitter {
    pub fn new(registry: Arc<DeprecationRegistry>, sink: Arc<dyn WarningSink>) -> Self {
        Self {
            registry,
            sink,
            enabled: true,
        }
    }

    /// Build an emitter over the process-wide registry from `config`.
    pub fn from_config(config: &DeprecationConfig) -> Self {
        let sink: Arc<dyn WarningSink> = match config.sink {
            SinkKind::Tracing => {
                Arc::new(TracingSink::new().with_location(config.include_location))
            }
            SinkKind::Capture => Arc::new(CaptureSink::new()),
            SinkKind::Null => Arc::new(NullSink),
        };
        Self::new(DeprecationRegistry::global(), sink).with_enabled(config.enabled)
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// The process-wide emitter.
    ///
    /// Created on first use from the default config plus environment
    /// overrides, unless [`Emitter::install`] ran first.
    pub fn global() -> Arc<Emitter> {
        Arc::clone(GLOBAL_EMITTER.get_or_init(|| {
            let config = DeprecationConfig::default().apply_env_overrides();
            Arc::new(Emitter::from_config(&config))
        }))
    }

    /// Install `emitter` as the process-wide emitter.
    ///
    /// Fails once the global emitter exists, including implicit creation by
    /// an earlier warning.
    pub fn install(emitter: Emitter) -> Result<Arc<Emitter>> {
        let emitter = Arc::new(emitter);
        GLOBAL_EMITTER
            .set(Arc::clone(&emitter))
            .map_err(|_| DeprecationError::EmitterAlreadyInstalled)?;
        Ok(emitter)
    }

    pub fn registry(&self) -> &Arc<DeprecationRegistry> {
        &self.registry
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Warnings retained by the sink (empty unless it captures).
    pub fn captured(&self) -> Vec<DeprecationWarning> {
        self.sink.captured()
    }

    /// Warn about a deprecated element the first time this exact notice is seen.
    #[track_caller]
    #[allow(clippy::too_many_arguments)]
    pub fn warn_deprecated(
        &self,
        version: &str,
        old_type: DeprecatedType,
        old_name: &str,
        new_type: Option<DeprecatedType>,
        new_name: Option<&str>,
        additional_msg: Option<&str>,
        stack_level: usize,
    ) {
        let record = DeprecationRecord {
            version: version.to_string(),
            old_type,
            old_name: old_name.to_string(),
            new_type,
            new_name: new_name.map(str::to_string),
            additional_msg: additional_msg.map(str::to_string),
        };
        self.warn_record(&record, stack_level);
    }

    /// Same as [`Emitter::warn_deprecated`] for a prebuilt record.
    #[track_caller]
    pub fn warn_record(&self, record: &DeprecationRecord, stack_level: usize) {
        if !self.registry.insert(record) {
            debug!(
                target: TRACING_TARGET,
                name = %record.old_name,
                version = %record.version,
                "deprecation already reported"
            );
            return;
        }

        self.emit(record.message(), stack_level);
    }

    /// Warn when an element keeps its kind and name but changes in `version`.
    #[track_caller]
    pub fn warn_deprecated_same_type_name(
        &self,
        version: &str,
        new_type: DeprecatedType,
        new_name: &str,
        additional_msg: Option<&str>,
        stack_level: usize,
    ) {
        self.warn_deprecated(
            version,
            new_type,
            new_name,
            Some(new_type),
            Some(new_name),
            additional_msg,
            stack_level + 1,
        );
    }

    /// Deliver an already rendered message, bypassing the registry.
    #[track_caller]
    pub fn emit(&self, message: String, stack_level: usize) {
        if !self.enabled {
            return;
        }
        let warning = DeprecationWarning::new(message, stack_level, Location::caller());
        self.sink.emit(&warning);
    }
}

/// Warn through the process-wide emitter. See [`Emitter::warn_deprecated`].
#[track_caller]
pub fn warn_deprecated(
    version: &str,
    old_type: DeprecatedType,
    old_name: &str,
    new_type: Option<DeprecatedType>,
    new_name: Option<&str>,
    additional_msg: Option<&str>,
    stack_level: usize,
) {
    Emitter::global().warn_deprecated(
        version,
        old_type,
        old_name,
        new_type,
        new_name,
        additional_msg,
        stack_level,
    );
}

/// See [`Emitter::warn_deprecated_same_type_name`].
#[track_caller]
pub fn warn_deprecated_same_type_name(
    version: &str,
    new_type: DeprecatedType,
    new_name: &str,
    additional_msg: Option<&str>,
    stack_level: usize,
) {
    Emitter::global().warn_deprecated_same_type_name(
        version,
        new_type,
        new_name,
        additional_msg,
        stack_level,
    );
}
