// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative macros for reducing boilerplate.
//!
//! - [`keyword_enum!`]: unit enum <-> lowercase keyword (`as_str`, `Display`, `FromStr`)
//! - [`setters!`]: setter methods for production builder/config structs

/// Generate keyword conversions for a unit-only enum.
///
/// Produces `as_str()`, a `Display` impl, `ALL` (every variant in declaration
/// order), and a case-insensitive `FromStr` that fails with
/// [`crate::UnknownKeyword`].
///
/// ```ignore
/// crate::keyword_enum! {
///     Compression {
///         Size => "size",
///         Standard => "standard",
///     }
/// }
/// ```
#[macro_export]
macro_rules! keyword_enum {
    ($enum:ident { $( $variant:ident => $str:expr ),+ $(,)? }) => {
        impl $enum {
            pub const ALL: &'static [$enum] = &[ $( $enum::$variant, )+ ];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $str, )+
                }
            }
        }

        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum {
            type Err = $crate::UnknownKeyword;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $(
                    if wanted.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err($crate::UnknownKeyword {
                    kind: stringify!($enum),
                    value: wanted.to_string(),
                })
            }
        }
    };
}

/// Generate setter methods inside an existing `impl` block.
///
/// ```ignore
/// impl MyConfig {
///     tav_core::setters! {
///         into { name: String }
///         set { count: u32 }
///         option { label: String }
///     }
/// }
/// ```
#[macro_export]
macro_rules! setters {
    (
        $(into {
            $( $into_field:ident : $into_ty:ty ),* $(,)?
        })?
        $(set {
            $( $set_field:ident : $set_ty:ty ),* $(,)?
        })?
        $(option {
            $( $opt_field:ident : $opt_ty:ty ),* $(,)?
        })?
    ) => {
        $($(
            pub fn $into_field(mut self, v: impl Into<$into_ty>) -> Self {
                self.$into_field = v.into();
                self
            }
        )*)?

        $($(
            pub fn $set_field(mut self, v: $set_ty) -> Self {
                self.$set_field = v;
                self
            }
        )*)?

        $($(
            pub fn $opt_field(mut self, v: impl Into<$opt_ty>) -> Self {
                self.$opt_field = Some(v.into());
                self
            }
        )*)?
    };
}
