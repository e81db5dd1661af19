//! Deprecated methods and functions.
//!
//! Unlike argument renames, these wrappers do not consult the registry: each
//! wrapper owns its own warned flag, so two wrappers carrying an identical
//! notice each warn once.

use crate::types::render_callable_message;
use crate::{DeprecatedType, Emitter};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::trace;

/// One-shot latch.
///
/// Also handy for `DeprecatedEnum::deprecate` implementations that want to
/// warn once without going through the registry.
#[derive(Debug, Default)]
pub struct WarnOnce {
    fired: AtomicBool,
}

impl WarnOnce {
    pub const fn new() -> Self {
        Self {
            fired: AtomicBool::new(false),
        }
    }

    /// Returns `true` for the first caller only.
    pub fn fire(&self) -> bool {
        !self.fired.swap(true, Ordering::AcqRel)
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

/// Notice details shared by method and function deprecations.
#[derive(Debug, Clone)]
struct CallableDeprecation {
    old_type: DeprecatedType,
    version: String,
    new_type: DeprecatedType,
    new_name: String,
    additional_msg: Option<String>,
    stack_level: usize,
    emitter: Option<Arc<Emitter>>,
}

/// Deprecate a method in favour of `new_name`.
pub fn deprecate_method(
    version: &str,
    new_type: DeprecatedType,
    new_name: &str,
    additional_msg: Option<&str>,
    stack_level: usize,
) -> MethodDeprecation {
    MethodDeprecation(CallableDeprecation::new(
        DeprecatedType::Method,
        version,
        new_type,
        new_name,
        additional_msg,
        stack_level,
    ))
}

/// Deprecate a free function in favour of `new_name`.
pub fn deprecate_function(
    version: &str,
    new_type: DeprecatedType,
    new_name: &str,
    additional_msg: Option<&str>,
    stack_level: usize,
) -> FunctionDeprecation {
    FunctionDeprecation(CallableDeprecation::new(
        DeprecatedType::Function,
        version,
        new_type,
        new_name,
        additional_msg,
        stack_level,
    ))
}

impl CallableDeprecation {
    fn new(
        old_type: DeprecatedType,
        version: &str,
        new_type: DeprecatedType,
        new_name: &str,
        additional_msg: Option<&str>,
        stack_level: usize,
    ) -> Self {
        Self {
            old_type,
            version: version.to_string(),
            new_type,
            new_name: new_name.to_string(),
            additional_msg: additional_msg.map(str::to_string),
            stack_level,
            emitter: None,
        }
    }

    fn notice(&self, name: String) -> Notice {
        let message = render_callable_message(
            &self.version,
            self.old_type,
            &name,
            self.new_type,
            &self.new_name,
            self.additional_msg.as_deref(),
        );
        Notice {
            name,
            message,
            stack_level: self.stack_level,
            emitter: self.emitter.clone(),
            warned: WarnOnce::new(),
        }
    }
}

/// Builder returned by [`deprecate_method`].
#[derive(Debug, Clone)]
pub struct MethodDeprecation(CallableDeprecation);

impl MethodDeprecation {
    /// Route warnings through `emitter` instead of the process-wide one.
    pub fn with_emitter(mut self, emitter: Arc<Emitter>) -> Self {
        self.0.emitter = Some(emitter);
        self
    }

    /// Wrap `method`, named `name` in the rendered message.
    ///
    /// The message is rendered here, once.
    pub fn wrap<F>(&self, name: impl Into<String>, method: F) -> DeprecatedMethod<F> {
        DeprecatedMethod {
            notice: self.0.notice(name.into()),
            method,
        }
    }
}

/// Builder returned by [`deprecate_function`].
#[derive(Debug, Clone)]
pub struct FunctionDeprecation(CallableDeprecation);

impl FunctionDeprecation {
    /// Route warnings through `emitter` instead of the process-wide one.
    pub fn with_emitter(mut self, emitter: Arc<Emitter>) -> Self {
        self.0.emitter = Some(emitter);
        self
    }

    /// Wrap `func`, named `name` in the rendered message.
    pub fn wrap<F>(&self, name: impl Into<String>, func: F) -> DeprecatedFunction<F> {
        DeprecatedFunction {
            notice: self.0.notice(name.into()),
            func,
        }
    }
}

/// Precomputed message plus the wrapper's own warned flag.
#[derive(Debug)]
struct Notice {
    name: String,
    message: String,
    stack_level: usize,
    emitter: Option<Arc<Emitter>>,
    warned: WarnOnce,
}

impl Notice {
    #[track_caller]
    fn warn(&self) {
        if !self.warned.fire() {
            trace!(name = %self.name, "deprecation notice already shown");
            return;
        }
        let emitter = self.emitter.clone().unwrap_or_else(Emitter::global);
        emitter.emit(self.message.clone(), self.stack_level);
    }
}

/// A method that warns on its first call.
#[derive(Debug)]
pub struct DeprecatedMethod<F> {
    notice: Notice,
    method: F,
}

impl<F> DeprecatedMethod<F> {
    /// Call the method on `receiver`, warning first if this wrapper has not
    /// warned yet.
    ///
    /// `receiver` is whatever the method takes as `self`: `&T` or `&mut T`.
    #[track_caller]
    pub fn call<S, A, R>(&self, receiver: S, args: A) -> R
    where
        F: Fn(S, A) -> R,
    {
        self.notice.warn();
        (self.method)(receiver, args)
    }

    pub fn name(&self) -> &str {
        &self.notice.name
    }

    pub fn message(&self) -> &str {
        &self.notice.message
    }

    pub fn has_warned(&self) -> bool {
        self.notice.warned.has_fired()
    }
}

/// A function that warns on its first call.
#[derive(Debug)]
pub struct DeprecatedFunction<F> {
    notice: Notice,
    func: F,
}

impl<F> DeprecatedFunction<F> {
    /// Call the function, warning first if this wrapper has not warned yet.
    #[track_caller]
    pub fn call<A, R>(&self, args: A) -> R
    where
        F: Fn(A) -> R,
    {
        self.notice.warn();
        (self.func)(args)
    }

    pub fn name(&self) -> &str {
        &self.notice.name
    }

    pub fn message(&self) -> &str {
        &self.notice.message
    }

    pub fn has_warned(&self) -> bool {
        self.notice.warned.has_fired()
    }
}
