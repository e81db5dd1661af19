//! Deprecation kinds and records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of entity being deprecated.
///
/// Only used to render messages; the lowercase string values appear verbatim
/// in every warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeprecatedType {
    Package,
    Enum,
    Class,
    Method,
    Function,
    Argument,
    Property,
}

impl DeprecatedType {
    /// All kinds, in declaration order.
    pub const ALL: [DeprecatedType; 7] = [
        Self::Package,
        Self::Enum,
        Self::Class,
        Self::Method,
        Self::Function,
        Self::Argument,
        Self::Property,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Enum => "enum",
            Self::Class => "class",
            Self::Method => "method",
            Self::Function => "function",
            Self::Argument => "argument",
            Self::Property => "property",
        }
    }
}

impl fmt::Display for DeprecatedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeprecatedType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown deprecated type: {}", s))
    }
}

/// Identity of a single deprecation notice.
///
/// Two records are equal when all six fields are equal; this is the key the
/// registry deduplicates on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeprecationRecord {
    /// Release that introduced the deprecation.
    pub version: String,
    /// Kind of the deprecated element.
    pub old_type: DeprecatedType,
    /// Name of the deprecated element.
    pub old_name: String,
    /// Kind of the replacement, if any.
    pub new_type: Option<DeprecatedType>,
    /// Name of the replacement, if any.
    pub new_name: Option<String>,
    /// Free text appended to the message.
    pub additional_msg: Option<String>,
}

impl DeprecationRecord {
    pub fn new(
        version: impl Into<String>,
        old_type: DeprecatedType,
        old_name: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            old_type,
            old_name: old_name.into(),
            new_type: None,
            new_name: None,
            additional_msg: None,
        }
    }

    pub fn with_replacement(
        mut self,
        new_type: DeprecatedType,
        new_name: impl Into<String>,
    ) -> Self {
        self.new_type = Some(new_type);
        self.new_name = Some(new_name.into());
        self
    }

    pub fn with_additional_msg(mut self, msg: impl Into<String>) -> Self {
        self.additional_msg = Some(msg.into());
        self
    }

    /// Render the human-readable warning text for this record.
    pub fn message(&self) -> String {
        let replacement = match (self.new_type, self.new_name.as_deref()) {
            (Some(new_type), Some(new_name)) => Some((new_type, new_name)),
            _ => None,
        };
        render_message(
            &self.version,
            self.old_type,
            &self.old_name,
            replacement,
            self.additional_msg.as_deref(),
        )
    }
}

/// Shared message template.
///
/// The replacement clause needs both a kind and a non-empty name; empty
/// additional text is dropped.
pub(crate) fn render_message(
    version: &str,
    old_type: DeprecatedType,
    old_name: &str,
    replacement: Option<(DeprecatedType, &str)>,
    additional_msg: Option<&str>,
) -> String {
    let replacement = replacement.filter(|(_, new_name)| !new_name.is_empty());
    compose_message(version, old_type, old_name, replacement, additional_msg)
}

/// Template for deprecated methods and functions.
///
/// The replacement clause is always rendered, even for an empty name.
pub(crate) fn render_callable_message(
    version: &str,
    old_type: DeprecatedType,
    old_name: &str,
    new_type: DeprecatedType,
    new_name: &str,
    additional_msg: Option<&str>,
) -> String {
    compose_message(
        version,
        old_type,
        old_name,
        Some((new_type, new_name)),
        additional_msg,
    )
}

fn compose_message(
    version: &str,
    old_type: DeprecatedType,
    old_name: &str,
    replacement: Option<(DeprecatedType, &str)>,
    additional_msg: Option<&str>,
) -> String {
    let mut msg = format!(
        "The {} {} is deprecated as of version {} and will be removed no sooner than 3 months after the release",
        old_name, old_type, version
    );

    if let Some((new_type, new_name)) = replacement {
        msg.push_str(&format!(". Instead use the {} {}", new_name, new_type));
    }

    if let Some(additional) = additional_msg.filter(|extra| !extra.is_empty()) {
        msg.push(' ');
        msg.push_str(additional);
    }

    // Exactly one closing period.
    if !msg.ends_with('.') {
        msg.push('.');
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_type_strings() {
        let rendered: Vec<_> = DeprecatedType::ALL.iter().map(|t| t.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["package", "enum", "class", "method", "function", "argument", "property"]
        );
        assert_eq!("property".parse::<DeprecatedType>(), Ok(DeprecatedType::Property));
        assert!("module".parse::<DeprecatedType>().is_err());
    }

    #[test]
    fn test_message_with_replacement_and_extra() {
        let record = DeprecationRecord::new("0.5.0", DeprecatedType::Class, "Foo")
            .with_replacement(DeprecatedType::Class, "Bar")
            .with_additional_msg("See docs.");
        assert_eq!(
            record.message(),
            "The Foo class is deprecated as of version 0.5.0 and will be removed no sooner \
             than 3 months after the release. Instead use the Bar class See docs."
        );
    }

    #[test]
    fn test_message_without_replacement() {
        let record = DeprecationRecord::new("0.2.0", DeprecatedType::Package, "drivers");
        assert_eq!(
            record.message(),
            "The drivers package is deprecated as of version 0.2.0 and will be removed no \
             sooner than 3 months after the release."
        );
    }

    #[test]
    fn test_message_needs_both_replacement_fields() {
        let mut record = DeprecationRecord::new("1.0", DeprecatedType::Function, "old");
        record.new_name = Some("new".to_string());
        assert!(!record.message().contains("Instead use"));

        let record = DeprecationRecord::new("1.0", DeprecatedType::Function, "old")
            .with_replacement(DeprecatedType::Function, "");
        assert!(!record.message().contains("Instead use"));
    }

    #[test]
    fn test_single_closing_period() {
        let record = DeprecationRecord::new("0.5.0", DeprecatedType::Argument, "nelec")
            .with_additional_msg("Use keyword charge");
        assert!(record.message().ends_with("release Use keyword charge."));

        let record = record.with_additional_msg("Use keyword charge.");
        assert!(record.message().ends_with("release Use keyword charge."));
        assert!(!record.message().ends_with(".."));
    }

    #[test]
    fn test_callable_message_keeps_empty_replacement() {
        let msg = render_callable_message(
            "1.0",
            DeprecatedType::Method,
            "m",
            DeprecatedType::Method,
            "",
            None,
        );
        assert_eq!(
            msg,
            "The m method is deprecated as of version 1.0 and will be removed no sooner than \
             3 months after the release. Instead use the  method."
        );
    }

    #[test]
    fn test_record_value_equality() {
        let a = DeprecationRecord::new("1.0", DeprecatedType::Method, "run")
            .with_replacement(DeprecatedType::Method, "execute");
        let b = DeprecationRecord::new("1.0", DeprecatedType::Method, "run")
            .with_replacement(DeprecatedType::Method, "execute");
        let c = b.clone().with_additional_msg("extra");

        let mut set = HashSet::new();
        assert!(set.insert(a));
        assert!(!set.insert(b));
        assert!(set.insert(c));
    }
}
