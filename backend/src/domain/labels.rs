//! Label-backed enums for stored status columns.
//!
//! Status values persist as their display label, so each enum pairs a
//! variant with the exact stored text. The macro generates `as_str`,
//! `Display`, `FromStr`, serde renames, and an `ALL` listing.

use thiserror::Error;

/// Raised when a stored label cannot be decoded into its enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {label}")]
pub struct UnknownLabel {
    /// Which enum failed to decode, e.g. "project status".
    pub kind: &'static str,
    /// The unrecognised stored text.
    pub label: String,
}

impl UnknownLabel {
    /// Build an error for the named enum kind.
    pub fn new(kind: &'static str, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
        }
    }
}

macro_rules! define_label_enum {
    (
        $(#[$outer:meta])*
        pub enum $name:ident as $noun:literal {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $label)]
                $variant,
            )*
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// The stored and displayed label.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::domain::labels::UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($label => Ok(Self::$variant),)*
                    other => Err($crate::domain::labels::UnknownLabel::new($noun, other)),
                }
            }
        }
    };
}

pub(crate) use define_label_enum;
