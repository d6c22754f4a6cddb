//! Dual number type integration for automatic differentiation.
//!
//! Functions written against [`DualNumber`] expose their derivative to the
//! Newton-Raphson solver without a hand-written `f'`.
//!
//! ## Usage
//!
//! ```
//! use estimator_core::types::dual::DualNumber;
//!
//! // d/dx (x² + 1) at x = 3
//! let x = DualNumber::new(3.0, 1.0);
//! let y = x * x + DualNumber::from(1.0);
//! assert_eq!(y.re, 10.0);
//! assert_eq!(y.eps, 6.0);
//! ```

/// Type alias for num-dual's Dual64 (f64-based dual numbers).
///
/// This type supports first-order automatic differentiation with:
/// - `re`: Real part (function value)
/// - `eps`: Dual part (derivative)
pub type DualNumber = num_dual::Dual64;
