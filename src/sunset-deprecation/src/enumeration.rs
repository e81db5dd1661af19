//! Enumerations whose members announce their own deprecation.
//!
//! A deprecated enumeration is a plain Rust enum implementing
//! [`EnumMembers`] (usually through [`deprecated_enum!`](crate::deprecated_enum))
//! and [`DeprecatedEnum`]. Every access through a [`DeprecatedEnumMeta`]
//! fires the accessed member's `deprecate` hook. The base abstraction never
//! deduplicates; a hook that should only warn once delegates to
//! [`warn_deprecated`](crate::warn_deprecated) or keeps a
//! [`WarnOnce`](crate::WarnOnce).
//!
//! ```rust,ignore
//! deprecated_enum! {
//!     pub enum Basis: &'static str {
//!         Sto3g = "sto3g",
//!         Minao = "minao",
//!     }
//! }
//!
//! impl DeprecatedEnum for Basis {
//!     fn deprecate(&self) {
//!         warn_deprecated("0.2.0", DeprecatedType::Enum, "Basis", None, None, None, 3);
//!     }
//! }
//!
//! let basis = DeprecatedEnumMeta::<Basis>::new().get_by_name("Sto3g")?;
//! ```

use crate::{DeprecationError, Result};
use std::fmt;
use tracing::trace;

/// Closed set of named members with associated values.
pub trait EnumMembers: Sized + Copy + 'static {
    type Value: PartialEq + fmt::Display;

    /// Name of the enumeration type, used in lookup errors.
    const ENUM_NAME: &'static str;

    /// Every member, in declaration order.
    fn members() -> &'static [Self];

    fn name(&self) -> &'static str;

    fn value(&self) -> Self::Value;
}

/// An enumeration whose members warn when accessed.
///
/// `deprecate` has no default: an enumeration that does not say how its
/// members warn does not compile.
pub trait DeprecatedEnum: EnumMembers {
    fn deprecate(&self);
}

/// Hook fired on access to a member.
type ShowDeprecate<E> = fn(&E);

struct MemberSlot<E> {
    member: E,
    show_deprecate: ShowDeprecate<E>,
}

/// Access path for a deprecated enumeration.
///
/// Each lookup resolves the member, fires its hook, then returns it.
pub struct DeprecatedEnumMeta<E: DeprecatedEnum> {
    slots: Vec<MemberSlot<E>>,
}

impl<E: DeprecatedEnum> DeprecatedEnumMeta<E> {
    /// Register every member together with its own `deprecate` hook.
    pub fn new() -> Self {
        let slots = E::members()
            .iter()
            .map(|member| MemberSlot {
                member: *member,
                show_deprecate: E::deprecate,
            })
            .collect();
        Self { slots }
    }

    /// Typed attribute access, e.g. `meta.attr(Basis::Sto3g)`.
    ///
    /// `new` gives every member a slot, so the hook always fires.
    pub fn attr(&self, member: E) -> E {
        self.slot_by_name(member.name()).map_or(member, |slot| self.show(slot))
    }

    /// Look a member up by its name.
    pub fn get_by_name(&self, name: &str) -> Result<E> {
        let slot = self
            .slot_by_name(name)
            .ok_or_else(|| DeprecationError::UnknownMemberName {
                enum_name: E::ENUM_NAME.to_string(),
                name: name.to_string(),
            })?;
        Ok(self.show(slot))
    }

    /// Build a member from its raw value.
    pub fn get_by_value(&self, value: E::Value) -> Result<E> {
        let slot = self
            .slots
            .iter()
            .find(|slot| slot.member.value() == value)
            .ok_or_else(|| DeprecationError::UnknownMemberValue {
                enum_name: E::ENUM_NAME.to_string(),
                value: value.to_string(),
            })?;
        Ok(self.show(slot))
    }

    /// Every member, firing each member's hook once.
    pub fn list_members(&self) -> Vec<E> {
        self.slots.iter().map(|slot| self.show(slot)).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot_by_name(&self, name: &str) -> Option<&MemberSlot<E>> {
        self.slots.iter().find(|slot| slot.member.name() == name)
    }

    fn show(&self, slot: &MemberSlot<E>) -> E {
        trace!(enum_name = E::ENUM_NAME, member = slot.member.name(), "deprecated member accessed");
        (slot.show_deprecate)(&slot.member);
        slot.member
    }
}

impl<E: DeprecatedEnum> Default for DeprecatedEnumMeta<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DeprecatedEnum + fmt::Debug> fmt::Debug for DeprecatedEnumMeta<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeprecatedEnumMeta")
            .field("enum_name", &E::ENUM_NAME)
            .field(
                "members",
                &self.slots.iter().map(|slot| slot.member).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Declare a field-less enum with one value per member and implement
/// [`EnumMembers`] for it.
///
/// The enum derives `Debug, Clone, Copy, PartialEq, Eq, Hash`. Implement
/// [`DeprecatedEnum`] separately to supply the warning hook.
#[macro_export]
macro_rules! deprecated_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $value_ty:ty {
            $( $(#[$vmeta:meta])* $variant:ident = $value:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::EnumMembers for $name {
            type Value = $value_ty;

            const ENUM_NAME: &'static str = stringify!($name);

            fn members() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn name(&self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant) ),+
                }
            }

            fn value(&self) -> Self::Value {
                match self {
                    $( $name::$variant => $value ),+
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static HITS: [AtomicUsize; 3] = [AtomicUsize::new(0), AtomicUsize::new(0), AtomicUsize::new(0)];

    deprecated_enum! {
        enum Method: u8 {
            Rhf = 1,
            Uhf = 2,
            Rohf = 3,
        }
    }

    impl DeprecatedEnum for Method {
        fn deprecate(&self) {
            HITS[self.value() as usize - 1].fetch_add(1, Ordering::SeqCst);
        }
    }

    fn hits(member: Method) -> usize {
        HITS[member.value() as usize - 1].load(Ordering::SeqCst)
    }

    #[test]
    #[serial(method_hits)]
    fn test_every_access_fires_hook() {
        let meta = DeprecatedEnumMeta::<Method>::new();
        assert_eq!(meta.len(), 3);
        let rhf = hits(Method::Rhf);
        let uhf = hits(Method::Uhf);

        assert_eq!(meta.attr(Method::Rhf), Method::Rhf);
        assert_eq!(hits(Method::Rhf), rhf + 1);

        assert_eq!(meta.get_by_name("Rhf").unwrap(), Method::Rhf);
        assert_eq!(hits(Method::Rhf), rhf + 2);

        assert_eq!(meta.get_by_value(1).unwrap(), Method::Rhf);
        assert_eq!(hits(Method::Rhf), rhf + 3);

        assert_eq!(hits(Method::Uhf), uhf);
    }

    #[test]
    #[serial(method_hits)]
    fn test_list_members_fires_each_hook() {
        let meta = DeprecatedEnumMeta::<Method>::new();
        let before: Vec<_> = Method::members().iter().map(|m| hits(*m)).collect();

        assert_eq!(meta.list_members(), vec![Method::Rhf, Method::Uhf, Method::Rohf]);

        let after: Vec<_> = Method::members().iter().map(|m| hits(*m)).collect();
        assert_eq!(after, before.iter().map(|n| n + 1).collect::<Vec<_>>());
    }

    #[test]
    #[serial(method_hits)]
    fn test_unknown_lookups_fire_nothing() {
        let meta = DeprecatedEnumMeta::<Method>::new();
        let before: usize = Method::members().iter().map(|m| hits(*m)).sum();

        let err = meta.get_by_name("Cisd").unwrap_err();
        assert_eq!(err.to_string(), "'Cisd' is not a member of Method");

        let err = meta.get_by_value(9).unwrap_err();
        assert_eq!(err.to_string(), "9 is not a valid Method");

        let after: usize = Method::members().iter().map(|m| hits(*m)).sum();
        assert_eq!(after, before);
    }
}
