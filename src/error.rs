//! The error type reported by every fallible operation in the crate.

use core::fmt;
use std::borrow::Cow;

/// The category of a [`TimeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A user-supplied broken-down time cannot be canonicalized without
    /// altering one of the supplied fields, or a string failed to parse.
    InvalidInput,
    /// The resulting absolute time falls outside the representable range.
    Overflow,
    /// A comparison or difference was requested across representations.
    RepresentationMismatch,
    /// A formatter's output does not fit the provided buffer.
    BufferTooSmall,
    /// A DST fold shift was requested outside an overlap.
    NotApplicable,
    /// The zone database could not be read or understood.
    ZoneData,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InvalidInput => "invalid input",
            Self::Overflow => "overflow",
            Self::RepresentationMismatch => "representation mismatch",
            Self::BufferTooSmall => "buffer too small",
            Self::NotApplicable => "not applicable",
            Self::ZoneData => "zone data",
        };
        f.write_str(s)
    }
}

/// An error produced while constructing, mutating, or comparing
/// instants, or while consulting the zone database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeError {
    kind: ErrorKind,
    context: Cow<'static, str>,
}

impl TimeError {
    #[inline]
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: Cow::Borrowed(""),
        }
    }

    /// Returns this error's [`ErrorKind`].
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Creates an invalid-input error.
    #[inline]
    #[must_use]
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// Creates an overflow error.
    #[inline]
    #[must_use]
    pub fn overflow() -> Self {
        Self::new(ErrorKind::Overflow)
    }

    /// Creates a representation-mismatch error.
    #[inline]
    #[must_use]
    pub fn representation_mismatch() -> Self {
        Self::new(ErrorKind::RepresentationMismatch)
    }

    /// Creates a buffer-too-small error.
    #[inline]
    #[must_use]
    pub fn buffer_too_small() -> Self {
        Self::new(ErrorKind::BufferTooSmall)
    }

    /// Creates a not-applicable error.
    #[inline]
    #[must_use]
    pub fn not_applicable() -> Self {
        Self::new(ErrorKind::NotApplicable)
    }

    /// Creates a zone-data error.
    #[inline]
    #[must_use]
    pub fn zone_data() -> Self {
        Self::new(ErrorKind::ZoneData)
    }

    /// Attaches a context message to this error.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.context = message.into();
        self
    }
}

impl fmt::Display for TimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.context.is_empty() {
            write!(f, ": {}", self.context)?;
        }
        Ok(())
    }
}

impl std::error::Error for TimeError {}
