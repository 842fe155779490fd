//! Error types for the percolation core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and convenient result aliases.

use std::fmt;

use thiserror::Error;

use crate::experiment::ExecutionStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Invalid-argument failures raised by [`crate::ConnectivityGrid`].
///
/// Every variant is reported before the grid is mutated, so a failed call
/// leaves the grid exactly as it was.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GridError {
    /// The side length was zero or too large to address.
    #[error("grid size must be a positive integer whose site count fits in memory (got {got})")]
    InvalidSize {
        /// The rejected side length.
        got: usize,
    },
    /// A coordinate fell outside `[0, size)`.
    #[error("site ({row}, {col}) is outside the {size}x{size} grid")]
    SiteOutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Side length of the grid that rejected the site.
        size: usize,
    },
}

impl GridError {
    /// Reports whether this error is an invalid-argument condition.
    ///
    /// Grids raise no other kind of error, so this always holds; callers that
    /// map errors onto a coarser taxonomy can rely on it.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidSize { .. } | Self::SiteOutOfBounds { .. }
        )
    }
}

define_error_codes! {
    /// Stable codes describing [`GridError`] variants.
    enum GridErrorCode for GridError {
        /// The side length was zero or too large to address.
        InvalidSize => InvalidSize { .. } => "GRID_INVALID_SIZE",
        /// A coordinate fell outside `[0, size)`.
        SiteOutOfBounds => SiteOutOfBounds { .. } => "GRID_SITE_OUT_OF_BOUNDS",
    }
}

/// Error type produced when configuring or running percolation experiments.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ExperimentError {
    /// A grid operation rejected its arguments.
    #[error(transparent)]
    Grid {
        /// Underlying grid error bubbled up by the experiment.
        #[from]
        source: GridError,
    },
    /// Experiments need at least two trials to estimate a deviation.
    #[error("an experiment needs at least 2 trials (got {got})")]
    TooFewTrials {
        /// The rejected trial count.
        got: usize,
    },
    /// The site source ran dry before the grid percolated.
    #[error("site source exhausted after opening {opened} sites without percolating")]
    SourceExhausted {
        /// Number of open sites when the source ran out.
        opened: usize,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// Statistics were requested over an empty sample set.
    #[error("threshold statistics need at least one sample")]
    EmptySamples,
}

define_error_codes! {
    /// Stable codes describing [`ExperimentError`] variants.
    enum ExperimentErrorCode for ExperimentError {
        /// A grid operation rejected its arguments.
        Grid => Grid { .. } => "EXPERIMENT_GRID_FAILURE",
        /// Experiments need at least two trials.
        TooFewTrials => TooFewTrials { .. } => "EXPERIMENT_TOO_FEW_TRIALS",
        /// The site source ran dry before the grid percolated.
        SourceExhausted => SourceExhausted { .. } => "EXPERIMENT_SOURCE_EXHAUSTED",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "EXPERIMENT_BACKEND_UNAVAILABLE",
        /// Statistics were requested over an empty sample set.
        EmptySamples => EmptySamples => "EXPERIMENT_EMPTY_SAMPLES",
    }
}

impl ExperimentError {
    /// Retrieve the inner [`GridErrorCode`] when the error originated in a grid.
    #[must_use]
    pub const fn grid_code(&self) -> Option<GridErrorCode> {
        match self {
            Self::Grid { source } => Some(source.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by grid operations.
pub type GridResult<T> = core::result::Result<T, GridError>;

/// Convenient alias for results returned by the experiment API.
pub type Result<T> = core::result::Result<T, ExperimentError>;
