//! Canonicalization of pipeline descriptions.
//!
//! The encoder only accepts values already reduced to the primitive set
//! (string, boolean, integer, double, list, null, nested map). Producing that
//! form is a collaborator's job; this module defines the seam and a serde
//! based implementation.

use crate::errors::{LineageError, UnsupportedValueTypeError};
use serde::Serialize;
use serde_json::{Number, Value};
use std::fmt;
use std::marker::PhantomData;

/// Reduces a native pipeline description to a canonical JSON value.
pub trait Canonicalizer {
    /// The native description type.
    type Source: ?Sized;

    /// Produces the canonical form of `source`.
    fn canonicalize(&self, source: &Self::Source) -> Result<Value, LineageError>;
}

/// Canonicalizes any serializable description through `serde_json`.
///
/// Tuples and sequences become lists, `None` and unit become null, structs
/// and string-keyed maps become nested maps. Non-finite floats become null.
pub struct SerdeCanonicalizer<T: ?Sized> {
    _source: PhantomData<fn(&T)>,
}

impl<T: ?Sized> SerdeCanonicalizer<T> {
    /// Creates a new serde canonicalizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _source: PhantomData,
        }
    }
}

impl<T: ?Sized> Default for SerdeCanonicalizer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for SerdeCanonicalizer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerdeCanonicalizer").finish()
    }
}

impl<T: Serialize + ?Sized> Canonicalizer for SerdeCanonicalizer<T> {
    type Source = T;

    fn canonicalize(&self, source: &T) -> Result<Value, LineageError> {
        Ok(serde_json::to_value(source)?)
    }
}

/// Adapts a plain function into a [`Canonicalizer`].
pub struct FnCanonicalizer<S: ?Sized, F> {
    func: F,
    _source: PhantomData<fn(&S)>,
}

impl<S: ?Sized, F> FnCanonicalizer<S, F>
where
    F: Fn(&S) -> Result<Value, LineageError>,
{
    /// Wraps `func`.
    #[must_use]
    pub fn new(func: F) -> Self {
        Self {
            func,
            _source: PhantomData,
        }
    }
}

impl<S: ?Sized, F> fmt::Debug for FnCanonicalizer<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCanonicalizer").finish()
    }
}

impl<S: ?Sized, F> Canonicalizer for FnCanonicalizer<S, F>
where
    F: Fn(&S) -> Result<Value, LineageError>,
{
    type Source = S;

    fn canonicalize(&self, source: &S) -> Result<Value, LineageError> {
        (self.func)(source)
    }
}

/// Converts a float found under `key` into a canonical number.
///
/// # Errors
///
/// Returns `UnsupportedValueTypeError` for NaN and infinities, which have no
/// canonical form and must not be mistaken for null.
pub fn canonical_float(key: &str, value: f64) -> Result<Value, UnsupportedValueTypeError> {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| UnsupportedValueTypeError::new(key, "non-finite double"))
}
