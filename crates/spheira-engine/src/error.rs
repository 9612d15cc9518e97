//! Error kinds callers may want to match on.
//!
//! Every fallible operation returns `anyhow::Result`. Errors raised by the
//! handler itself are [`HandlerError`] values and can be recovered with
//! `downcast_ref`; errors from linkers, variants and file sinks pass through
//! unchanged.

use thiserror::Error;

use crate::family::{Family, MAX_VARIANTS_PER_FAMILY};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// An operation that needs the active variant ran before any family was
    /// selected.
    #[error("no active variant: select a family first")]
    NoActiveVariant,

    /// The same family appeared twice in the variant catalog.
    #[error("family `{0}` registered twice")]
    DuplicateFamily(Family),

    /// A family exceeded the parameter-space key domain.
    #[error("family `{family}` has {count} variants (max {max})", max = MAX_VARIANTS_PER_FAMILY)]
    TooManyVariants { family: Family, count: usize },
}
