//! Numerical building blocks.
//!
//! - `solvers`: Scalar root finders used by `find_roots`

pub mod solvers;
