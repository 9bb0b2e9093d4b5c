//! Macro for implementing Display and FromStr for wire-level enums
//!
//! Statuses, reminder types and event kinds travel as short strings on the
//! collaborator wire and in storage. This macro gives them one consistent
//! textual form and a case-insensitive, whitespace-tolerant parser.
//!
//! # Example
//!
//! ```rust
//! use careerdeck_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum SyncState {
//!     Idle,
//!     Running,
//! }
//!
//! impl_domain_status_conversions!(SyncState {
//!     Idle => "idle",
//!     Running => "running",
//! });
//!
//! assert_eq!("  RUNNING ".parse::<SyncState>().unwrap(), SyncState::Running);
//! ```

/// Implements Display and FromStr traits for domain enums
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their string
///   representations (lowercase)
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical wire representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
