//! simatrix - pairwise string similarity matrices
//!
//! Computes a matrix of pairwise similarity or distance values for a
//! collection of strings, using a selectable measure from a family of edit
//! distances, kernels and set coefficients.
//!
//! # Features
//! - One string abstraction carrying either byte sequences or word tokens
//!   produced by a configurable delimiter alphabet
//! - Triangular storage exploiting measure symmetry
//! - Sub-range and block-wise sharding for distributed runs
//! - Parallel fill with throttled progress reporting
//!
//! # Example
//! ```
//! use simatrix::{compute, ComputeOptions, Config, Matrix, StringValue};
//!
//! let strings: Vec<StringValue> = ["abc", "abd", "xyz"]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, s)| StringValue::from_text(s).with_idx(i))
//!     .collect();
//!
//! let mut matrix = Matrix::new(&strings);
//! matrix.alloc();
//!
//! let measure = simatrix::measures::resolve("levenshtein", &Config::default());
//! compute(&mut matrix, &strings, measure.as_ref(), ComputeOptions::default()).unwrap();
//!
//! assert_eq!(matrix.get(0, 1), 1.0);
//! assert_eq!(matrix.get(0, 1), matrix.get(1, 0));
//! ```

pub mod compute;
pub mod config;
pub mod error;
pub mod hash;
pub mod input;
pub mod matrix;
pub mod measures;
pub mod output;
pub mod progress;
pub mod value;

pub use compute::{compute, ComputeOptions, ComputeStats};
pub use config::Config;
pub use error::Error;
pub use matrix::{Matrix, Range};
pub use measures::Measure;
pub use value::{DelimTable, StringValue};
