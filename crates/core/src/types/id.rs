//! Newtype IDs for type-safe entity references.
//!
//! Catalog and order identifiers are opaque strings issued by the backend.
//! Use the `define_id!` macro to create type-safe wrappers that prevent
//! accidentally mixing IDs from different entity types.

use thiserror::Error;

/// Errors that can occur when parsing an ID.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input string is empty or only whitespace.
    #[error("{kind} cannot be empty")]
    Empty {
        /// Name of the ID type being parsed.
        kind: &'static str,
    },
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` as a plain string, validated on the way in
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `parse()` rejecting empty input, `as_str()`, `into_inner()`
/// - `Display`, `FromStr`, `AsRef<str>`, `TryFrom<String>`, `Into<String>`
///
/// # Example
///
/// ```rust
/// # use leafcart_core::define_id;
/// define_id!(BasketId);
/// define_id!(ShelfId);
///
/// let basket = BasketId::parse("b-1").unwrap();
/// assert_eq!(basket.as_str(), "b-1");
/// assert!(ShelfId::parse("  ").is_err());
///
/// // These are different types, so this won't compile:
/// // let _: ShelfId = basket;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse an ID, rejecting empty or whitespace-only input.
            ///
            /// # Errors
            ///
            /// Returns [`IdError::Empty`]($crate::IdError::Empty) when the
            /// trimmed input is empty.
            pub fn parse(id: impl Into<String>) -> ::core::result::Result<Self, $crate::IdError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err($crate::IdError::Empty {
                        kind: stringify!($name),
                    });
                }
                Ok(Self(id))
            }

            /// Get the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::IdError;

            fn try_from(id: String) -> ::core::result::Result<Self, Self::Error> {
                Self::parse(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(SellerId);
define_id!(UserId);
define_id!(PurchaseId);
