mod assignment;
mod catalog;
mod client;
mod features;
mod offer;
mod program;

pub use assignment::Assignment;
pub use catalog::{Catalog, CatalogError};
pub use client::{CategorySet, Client};
pub use features::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector, age_group, income_bracket};
pub use offer::{Offer, TargetGender};
pub use program::{BinaryProgram, Constraint, ProgramError, Relation, Selection};

/// An insertion-ordered hash map.
///
/// Repeated solves over the same inputs must produce the same selections, so
/// anything the engine iterates over uses a map with deterministic ordering.
pub type Map<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;

macro_rules! id_wrapper {
    ($struct:ident) => {
        /// An integer identifier newtype
        #[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        #[repr(transparent)]
        pub struct $struct(pub u64);

        impl From<u64> for $struct {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$struct> for u64 {
            fn from(value: $struct) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $struct {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

macro_rules! label_wrapper {
    ($struct:ident) => {
        #[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        #[doc = concat!("A newtype wrapper for a ", stringify!($struct), " label")]
        pub struct $struct(String);

        impl $struct {
            /// Borrow the underlying label
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $struct {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $struct {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $struct {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_wrapper!(ClientId);
id_wrapper!(OfferId);
label_wrapper!(Gender);
label_wrapper!(Category);
