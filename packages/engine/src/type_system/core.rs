//! Core types of the filter type system
//!
//! Contains `FunctionType`, `FunctionSignature` and the typed result every
//! filter evaluation step produces.

use serde::Serialize;

use crate::error::SignatureError;
use crate::value::{NodeList, Scalar};

/// The three types of the filter language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionType {
    /// Any JSON value, or absent
    Value,
    /// A node list
    Nodes,
    /// A test result, true or false
    Logical,
}

impl FunctionType {
    /// Decode one character of a signature code
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'v' => Some(FunctionType::Value),
            'n' => Some(FunctionType::Nodes),
            'l' => Some(FunctionType::Logical),
            _ => None,
        }
    }

    #[must_use]
    pub const fn code(self) -> char {
        match self {
            FunctionType::Value => 'v',
            FunctionType::Nodes => 'n',
            FunctionType::Logical => 'l',
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            FunctionType::Value => "value",
            FunctionType::Nodes => "nodes",
            FunctionType::Logical => "logical",
        }
    }
}

/// Return type and ordered parameter types of a function
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FunctionSignature {
    pub return_type: FunctionType,
    pub parameter_types: Vec<FunctionType>,
}

impl FunctionSignature {
    #[must_use]
    pub fn new(return_type: FunctionType, parameter_types: Vec<FunctionType>) -> Self {
        Self {
            return_type,
            parameter_types,
        }
    }

    /// Decode a compact signature code: the first character is the return
    /// type, the rest are parameter types (`"vv"` is value → value,
    /// `"lvv"` is (value, value) → logical)
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError`] for an empty code or a character other than
    /// `l`, `n` or `v`. `name` is only used in the error.
    pub fn from_code(name: &str, code: &str) -> Result<Self, SignatureError> {
        let mut types = code.chars().map(|c| {
            FunctionType::from_code(c).ok_or_else(|| SignatureError::UnknownTypeCode {
                name: name.to_string(),
                code: c,
                signature: code.to_string(),
            })
        });
        let return_type = types.next().ok_or_else(|| SignatureError::Empty {
            name: name.to_string(),
        })??;
        let parameter_types = types.collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(return_type, parameter_types))
    }

    /// Encode back into the compact form
    #[must_use]
    pub fn code(&self) -> String {
        std::iter::once(self.return_type)
            .chain(self.parameter_types.iter().copied())
            .map(FunctionType::code)
            .collect()
    }

    #[inline]
    #[must_use]
    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }
}

/// Result of one filter evaluation step, tagged with its type
#[derive(Debug, Clone, PartialEq)]
pub enum Typed<'a> {
    Value(Scalar<'a>),
    Nodes(NodeList<'a>),
    Logical(bool),
}

impl Typed<'_> {
    /// The dynamic type tag
    #[must_use]
    pub fn type_of(&self) -> FunctionType {
        match self {
            Typed::Value(_) => FunctionType::Value,
            Typed::Nodes(_) => FunctionType::Nodes,
            Typed::Logical(_) => FunctionType::Logical,
        }
    }
}
