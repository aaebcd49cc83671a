//! dapmath - maps self-describing scientific datasets onto a typed numeric model.
//!
//! A dataset is a tree of typed variables (scalars, structures, sequences,
//! lists, arrays and grids) with attached attribute tables, in the style of a
//! DAP2 DDS and DAS. dapmath turns each variable into an adapter that knows the
//! variable's [`MathType`](model::MathType), chooses a compact
//! [`RepresentationalSet`](model::RepresentationalSet) for every numeric leaf,
//! and converts raw instances into physical values (fill and missing values
//! become NaN, packed values are scaled and offset).
//!
//! # Features
//!
//! - Structural type mapping with reversed (innermost-first) array domains
//! - Vetting, unpacking and ranging driven by CF-style attributes
//! - Lazy, columnar flat fields backed by shared source vectors
//! - JSON dataset descriptors and configuration
//!
//! # Example
//!
//! ```ignore
//! use dapmath::adapter::VariableAdapterFactory;
//! use dapmath::source::DatasetReader;
//! use std::path::Path;
//!
//! let info = DatasetReader::read_file(Path::new("dataset.json"))?;
//! let mut factory = VariableAdapterFactory::default();
//! for variable in &info.dataset.variables {
//!     let table = info.dataset.attribute_table(&variable.name);
//!     let adapter = factory.variable_adapter(variable, table)?;
//!     println!("{}: {}", variable.name, adapter.math_type());
//! }
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod adapter;
pub mod attribute_data;
pub mod config;
pub mod error;
pub mod model;
pub mod process;
pub mod range;
pub mod source;
pub mod util;

pub use adapter::{VariableAdapter, VariableAdapterFactory};
pub use config::ConversionConfig;
pub use error::{DapError, Result};
