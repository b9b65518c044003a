//! Function registry
//!
//! Maps function names to signatures (and optionally to evaluators for
//! extension functions). A registry is built, extended, then shared
//! read-only behind an `Arc` by every query that uses it.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;

use super::core::{FunctionSignature, FunctionType, Typed};
use crate::error::SignatureError;

/// Built-in functions and their signature codes
pub const BUILTIN_FUNCTIONS: [(&str, &str); 4] = [
    ("length", "vv"),
    ("count", "vn"),
    ("match", "lvv"),
    ("search", "lvv"),
];

/// Evaluator for an extension function
///
/// Arguments arrive already evaluated, one typed result per parameter. The
/// returned value should match the registered return type.
pub trait FunctionExtension: Send + Sync {
    fn call<'a>(&self, args: Vec<Typed<'a>>) -> Typed<'a>;
}

/// Name → signature table, plus evaluators for extension functions
#[derive(Clone)]
pub struct FunctionRegistry {
    signatures: HashMap<String, FunctionSignature>,
    extensions: HashMap<String, Arc<dyn FunctionExtension>>,
}

impl FunctionRegistry {
    /// Registry holding the built-in functions
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for (name, code) in BUILTIN_FUNCTIONS {
            let (return_type, parameter_types) = builtin_types(code);
            registry.register(name, FunctionSignature::new(return_type, parameter_types));
        }
        registry
    }

    /// Registry without any function, not even the built-ins
    #[must_use]
    pub fn empty() -> Self {
        Self {
            signatures: HashMap::new(),
            extensions: HashMap::new(),
        }
    }

    /// Insert or overwrite the signature for `name`
    pub fn register(&mut self, name: impl Into<String>, signature: FunctionSignature) {
        let name = name.into();
        tracing::debug!(
            target: "jpt::registry",
            function = %name,
            signature = %signature.code(),
            "registered function signature"
        );
        self.signatures.insert(name, signature);
    }

    /// Insert or overwrite the signature for `name` from a compact code
    /// (`l` logical, `n` nodes, `v` value; return type first)
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError`] when `code` is empty or has an unknown character;
    /// the registry is left unchanged.
    pub fn register_function(&mut self, name: &str, code: &str) -> Result<(), SignatureError> {
        let signature = FunctionSignature::from_code(name, code)?;
        self.register(name, signature);
        Ok(())
    }

    /// Register a signature together with its evaluator
    ///
    /// Built-in names keep their built-in evaluation; only the signature is replaced.
    pub fn register_extension(
        &mut self,
        name: impl Into<String>,
        signature: FunctionSignature,
        extension: Arc<dyn FunctionExtension>,
    ) {
        let name = name.into();
        self.register(name.clone(), signature);
        self.extensions.insert(name, extension);
    }

    #[must_use]
    pub fn signature(&self, name: &str) -> Option<&FunctionSignature> {
        self.signatures.get(name)
    }

    #[must_use]
    pub fn extension(&self, name: &str) -> Option<&Arc<dyn FunctionExtension>> {
        self.extensions.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.signatures.contains_key(name)
    }

    /// Registered names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.signatures.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut extensions: Vec<&str> = self.extensions.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .field("extensions", &extensions)
            .finish()
    }
}

/// Built-in codes are constants; decode them without an error path
fn builtin_types(code: &str) -> (FunctionType, Vec<FunctionType>) {
    let mut types = code.chars().filter_map(FunctionType::from_code);
    let return_type = types.next().unwrap_or(FunctionType::Value);
    (return_type, types.collect())
}
