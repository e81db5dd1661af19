//! Deprecation notices for Sunset.
//!
//! Marks packages, classes, enum members, methods, functions, properties and
//! arguments as deprecated, and warns the first time each one is used:
//!
//! - [`warn_deprecated`] emits a notice once per distinct
//!   [`DeprecationRecord`], tracked in the [`DeprecationRegistry`];
//! - [`deprecate_arguments`] renames deprecated keyword arguments and warns
//!   through the registry;
//! - [`deprecate_method`] and [`deprecate_function`] wrap callables that warn
//!   on their own first call;
//! - [`DeprecatedEnumMeta`] fires a member's [`DeprecatedEnum::deprecate`]
//!   hook on every access.
//!
//! Warnings go to a [`WarningSink`]; the default [`TracingSink`] logs them
//! with `tracing` under the `deprecation` target.
//!
//! # Example
//!
//! ```rust,ignore
//! use sunset_deprecation::{DeprecatedType, deprecate_function, warn_deprecated};
//!
//! warn_deprecated(
//!     "0.5.0",
//!     DeprecatedType::Class,
//!     "Foo",
//!     Some(DeprecatedType::Class),
//!     Some("Bar"),
//!     Some("See docs."),
//!     2,
//! );
//!
//! let energy = deprecate_function("0.4.0", DeprecatedType::Function, "total_energy", None, 2)
//!     .wrap("energy", |x: f64| x * 2.0);
//! energy.call(1.0);
//! ```
//!
//! An enumeration that does not supply its `deprecate` hook is rejected at
//! compile time:
//!
//! ```compile_fail
//! use sunset_deprecation::{DeprecatedEnum, DeprecatedEnumMeta, deprecated_enum};
//!
//! deprecated_enum! {
//!     enum Solver: &'static str {
//!         Direct = "direct",
//!     }
//! }
//!
//! impl DeprecatedEnum for Solver {}
//!
//! let _ = DeprecatedEnumMeta::<Solver>::new();
//! ```

pub mod arguments;
pub mod callables;
pub mod config;
pub mod emitter;
pub mod enumeration;
pub mod error;
pub mod registry;
pub mod types;

pub use arguments::{
    ArgumentRenamer, DEFAULT_ARGUMENT_STACK_LEVEL, KwArgs, RenamedArguments, deprecate_arguments,
};
pub use callables::{
    DeprecatedFunction, DeprecatedMethod, FunctionDeprecation, MethodDeprecation, WarnOnce,
    deprecate_function, deprecate_method,
};
pub use config::{DeprecationConfig, SinkKind};
pub use emitter::{
    CaptureSink, DEFAULT_STACK_LEVEL, DeprecationWarning, Emitter, NullSink, TracingSink,
    WarningCategory, WarningSink, warn_deprecated, warn_deprecated_same_type_name,
};
pub use enumeration::{DeprecatedEnum, DeprecatedEnumMeta, EnumMembers};
pub use error::{DeprecationError, Result};
pub use registry::DeprecationRegistry;
pub use types::{DeprecatedType, DeprecationRecord};
