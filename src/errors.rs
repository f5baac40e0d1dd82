//! ## Custom Errors for Metrum
//!
//! This module defines the custom errors that are raised by the containers and
//! the track smoother in this crate.

use std::error::Error;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents errors specific to invalid operations or parameters in Metrum.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum MetrumError {
    /// Occurs when an invalid leaf capacity is provided.
    InvalidCapacity {
        /// The capacity value that was provided.
        capacity: usize,
    },
    /// Occurs when a k-nearest-neighbor search is requested with `k < 1`.
    InvalidNeighborCount {
        /// The neighbor count that was requested.
        count: usize,
    },
    /// Occurs when a range search is requested with a non-positive or
    /// non-finite radius.
    InvalidRadius {
        /// The radius that was requested.
        radius: f64,
    },
    /// Occurs when a smoothing window of non-positive duration is configured.
    InvalidWindow {
        /// The window duration in milliseconds.
        window_ms: i64,
    },
    /// Occurs when the minimum sample count for a fit is configured below one.
    InvalidRequiredPoints {
        /// The minimum sample count that was requested.
        required: usize,
    },
    /// Occurs when a distance metric returns NaN or a negative value.
    InvalidDistance {
        /// The value the metric returned.
        value: f64,
    },
    /// Occurs when an element is inserted into a sequence that already
    /// contains it.
    DuplicateElement {
        /// Debug rendering of the offending element.
        element: String,
    },
    /// Occurs when an anchor element is not present in the sequence.
    ElementNotFound {
        /// Debug rendering of the missing element.
        element: String,
    },
    /// Occurs when navigation runs past the boundary of a sequence, or a
    /// cursor removal is attempted before any element was visited.
    NoSuchElement,
    /// Occurs when the first or last element of an empty sequence is requested.
    EmptySequence,
    /// Occurs when a cursor observes a structural modification that was not
    /// made through the cursor itself.
    ConcurrentModification,
}

impl fmt::Display for MetrumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetrumError::InvalidCapacity { capacity } => {
                write!(
                    f,
                    "Invalid capacity: {capacity}. Leaf capacity must be at least 4."
                )
            }
            MetrumError::InvalidNeighborCount { count } => {
                write!(
                    f,
                    "Invalid neighbor count: {count}. At least one neighbor must be requested."
                )
            }
            MetrumError::InvalidRadius { radius } => {
                write!(
                    f,
                    "Invalid radius: {radius}. Search radius must be finite and positive."
                )
            }
            MetrumError::InvalidWindow { window_ms } => {
                write!(
                    f,
                    "Invalid window: {window_ms} ms. Window duration must be positive."
                )
            }
            MetrumError::InvalidRequiredPoints { required } => {
                write!(
                    f,
                    "Invalid required points: {required}. At least one sample is required."
                )
            }
            MetrumError::InvalidDistance { value } => {
                write!(
                    f,
                    "Invalid distance: {value}. Metrics must return finite non-negative values."
                )
            }
            MetrumError::DuplicateElement { element } => {
                write!(f, "Duplicate element: {element} is already in the sequence")
            }
            MetrumError::ElementNotFound { element } => {
                write!(f, "Element not found: {element} is not in the sequence")
            }
            MetrumError::NoSuchElement => {
                write!(f, "No element at the requested position")
            }
            MetrumError::EmptySequence => {
                write!(f, "The sequence is empty")
            }
            MetrumError::ConcurrentModification => {
                write!(f, "The sequence was modified outside of the cursor")
            }
        }
    }
}

impl Error for MetrumError {}
