//! Filter type system
//!
//! Implements the three-valued type lattice of the filter language:
//! - `value`: any JSON value (or absent)
//! - `nodes`: a node list
//! - `logical`: a test result
//!
//! plus the function registry and the declared-type checks built on it.

mod checks;
mod conversions;
mod core;
mod registry;

pub use core::{FunctionSignature, FunctionType, Typed};
pub use registry::{BUILTIN_FUNCTIONS, FunctionExtension, FunctionRegistry};
