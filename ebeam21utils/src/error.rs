//!
//! # Ebeam21 Error-Helper Utilities
//!
//! ```rust
//! use ebeam21utils::error::ErrorHelper;
//!
//! /// Example implementer of [`ErrorHelper`].
//! /// Typical implementers carry internal state to report upon failure.
//! struct LayerWalker {
//!     layernum: i16,
//! }
//! impl ErrorHelper for LayerWalker {
//!     type Error = String;
//!
//!     /// Attach the walker's position to the failure message.
//!     fn err(&self, msg: impl Into<String>) -> Self::Error {
//!         format!("Layer {}: {}", self.layernum, msg.into())
//!     }
//! }
//! impl LayerWalker {
//!     fn walk(&self) -> Result<i64, String> {
//!         // Unwrap an [`Option`], or fail with the walker's context
//!         self.unwrap(Some(5), "missing geometry")
//!     }
//! }
//! ```
//!

///
/// # ErrorHelper
///
/// Helper trait for re-use among many conversion tree-walkers.
/// Each implementer will generally have some internal state to report upon failure,
/// which it can inject in the implementation-required `err` method.
/// The `fail` method, provided by default, simply returns the `err` value.
///
pub trait ErrorHelper {
    type Error;

    /// Create and return a [Self::Error] value.
    fn err(&self, msg: impl Into<String>) -> Self::Error;
    /// Return failure
    fn fail<T>(&self, msg: impl Into<String>) -> Result<T, Self::Error> {
        Err(self.err(msg))
    }
    /// Unwrap the [Option] `opt` if it is [Some], and return our error if not.
    fn unwrap<T>(&self, opt: Option<T>, msg: impl Into<String>) -> Result<T, Self::Error> {
        match opt {
            Some(val) => Ok(val),
            None => self.fail(msg),
        }
    }
    /// Assert a boolean condition. Returns through `self.fail` if it is not satisfied.
    fn assert(&self, b: bool, msg: impl Into<String>) -> Result<(), Self::Error> {
        match b {
            true => Ok(()),
            false => self.fail(msg),
        }
    }
}
