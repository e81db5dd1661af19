//! Renaming of deprecated keyword arguments.
//!
//! Callables that accept keyword arguments take them as a [`KwArgs`] map.
//! Wrapping such a callable with [`deprecate_arguments`] lets callers keep
//! passing an old argument name: the value is moved to the new name and a
//! deprecation warning is emitted through the shared registry, so the same
//! rename warns once per process no matter how many call sites use it.
//!
//! ```rust,ignore
//! let solve = deprecate_arguments("0.4.0", [("tol", "tolerance")], None, 3)
//!     .wrap("solve", |(), kwargs: KwArgs<f64>| kwargs["tolerance"]);
//!
//! let mut kwargs = KwArgs::new();
//! kwargs.insert("tol".to_string(), 1e-6);
//! assert_eq!(solve.call((), kwargs)?, 1e-6);
//! ```

use crate::{DeprecatedType, DeprecationError, Emitter, Result};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::trace;

/// Default stack level for argument renames.
pub const DEFAULT_ARGUMENT_STACK_LEVEL: usize = 3;

/// Keyword arguments, in the order the caller supplied them.
pub type KwArgs<V> = IndexMap<String, V>;

/// Old-name to new-name argument mapping plus the notice details.
#[derive(Debug, Clone)]
pub struct ArgumentRenamer {
    version: String,
    kwarg_map: IndexMap<String, String>,
    additional_msg: Option<String>,
    stack_level: usize,
    emitter: Option<Arc<Emitter>>,
}

/// Build an argument renamer for callables deprecated in `version`.
///
/// Pairs are applied in iteration order of `kwarg_map`.
pub fn deprecate_arguments<I, K, N>(
    version: &str,
    kwarg_map: I,
    additional_msg: Option<&str>,
    stack_level: usize,
) -> ArgumentRenamer
where
    I: IntoIterator<Item = (K, N)>,
    K: Into<String>,
    N: Into<String>,
{
    ArgumentRenamer {
        version: version.to_string(),
        kwarg_map: kwarg_map
            .into_iter()
            .map(|(old, new)| (old.into(), new.into()))
            .collect(),
        additional_msg: additional_msg.map(str::to_string),
        stack_level,
        emitter: None,
    }
}

impl ArgumentRenamer {
    /// Route warnings through `emitter` instead of the process-wide one.
    pub fn with_emitter(mut self, emitter: Arc<Emitter>) -> Self {
        self.emitter = Some(emitter);
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn kwarg_map(&self) -> &IndexMap<String, String> {
        &self.kwarg_map
    }

    /// Wrap `func`, reported as `func_name` in usage errors.
    pub fn wrap<F>(&self, func_name: impl Into<String>, func: F) -> RenamedArguments<F> {
        RenamedArguments {
            renamer: self.clone(),
            func_name: func_name.into(),
            func,
        }
    }

    /// Rewrite deprecated names in `kwargs` in place.
    ///
    /// Conflicts are detected for every pair before anything is emitted or
    /// moved, so a rejected call leaves `kwargs` untouched and warns nothing.
    #[track_caller]
    pub fn rename<V>(&self, func_name: &str, kwargs: &mut KwArgs<V>) -> Result<()> {
        if kwargs.is_empty() {
            return Ok(());
        }

        self.check_conflicts(func_name, kwargs)?;

        let emitter = self.emitter.clone().unwrap_or_else(Emitter::global);
        for (old_arg, new_arg) in &self.kwarg_map {
            let Some(value) = kwargs.shift_remove(old_arg) else {
                continue;
            };

            trace!(
                func = func_name,
                old = %old_arg,
                new = %new_arg,
                "renaming deprecated argument"
            );
            emitter.warn_deprecated(
                &self.version,
                DeprecatedType::Argument,
                old_arg,
                Some(DeprecatedType::Argument),
                Some(new_arg),
                self.additional_msg.as_deref(),
                self.stack_level,
            );
            kwargs.insert(new_arg.clone(), value);
        }

        Ok(())
    }

    /// Replay the renames over the key names only, failing on the first pair
    /// whose old and new names would both be present.
    fn check_conflicts<V>(&self, func_name: &str, kwargs: &KwArgs<V>) -> Result<()> {
        let mut keys: HashSet<&str> = kwargs.keys().map(String::as_str).collect();

        for (old_arg, new_arg) in &self.kwarg_map {
            if !keys.contains(old_arg.as_str()) {
                continue;
            }
            // A name mapped onto itself counts as both present.
            if keys.contains(new_arg.as_str()) {
                return Err(DeprecationError::ConflictingArguments {
                    func_name: func_name.to_string(),
                    new_arg: new_arg.clone(),
                    old_arg: old_arg.clone(),
                });
            }
            keys.remove(old_arg.as_str());
            keys.insert(new_arg.as_str());
        }

        Ok(())
    }
}

/// A callable whose deprecated keyword arguments are renamed before each call.
#[derive(Debug, Clone)]
pub struct RenamedArguments<F> {
    renamer: ArgumentRenamer,
    func_name: String,
    func: F,
}

impl<F> RenamedArguments<F> {
    pub fn name(&self) -> &str {
        &self.func_name
    }

    pub fn renamer(&self) -> &ArgumentRenamer {
        &self.renamer
    }

    /// Call the wrapped function with `args` and the rewritten `kwargs`.
    ///
    /// Fails without calling it when both an old name and its replacement
    /// were supplied.
    #[track_caller]
    pub fn call<A, V, R>(&self, args: A, mut kwargs: KwArgs<V>) -> Result<R>
    where
        F: Fn(A, KwArgs<V>) -> R,
    {
        if !kwargs.is_empty() {
            self.renamer.rename(&self.func_name, &mut kwargs)?;
        }
        Ok((self.func)(args, kwargs))
    }
}
