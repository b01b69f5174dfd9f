//! Catalog records for component types

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::types::{ParamShape, TypePath};

/// A constructor or method parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name as declared
    pub name: String,
    /// Reported shape
    pub shape: ParamShape,
    /// Qualifier annotation value, when present
    #[serde(default)]
    pub qualifier: Option<String>,
}

impl ParamSpec {
    /// Parameter with no qualifier
    pub fn new(name: impl Into<String>, shape: ParamShape) -> Self {
        Self {
            name: name.into(),
            shape,
            qualifier: None,
        }
    }

    /// Parameter with a shape given in the compact syntax
    pub fn parse(name: impl Into<String>, shape: &str) -> Result<Self, CatalogError> {
        Ok(Self::new(name, ParamShape::parse(shape)?))
    }

    /// Attach a qualifier to this parameter
    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }
}

/// A constructor declared on a catalog type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorSpec {
    /// Whether the host marked this constructor for injection
    #[serde(default)]
    pub designated: bool,
    /// Parameters in declaration order
    #[serde(default)]
    pub params: Vec<ParamSpec>,
}

/// A method declared on a catalog type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSpec {
    /// Method name
    pub name: String,
    /// Whether the host marked this method for injection
    #[serde(default)]
    pub inject: bool,
    /// Parameters in declaration order
    #[serde(default)]
    pub params: Vec<ParamSpec>,
}

/// One component type record reported by the host introspection facility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeEntry {
    /// Path of the component type
    pub path: TypePath,
    /// Explicit qualifier, when the component declares one
    #[serde(default)]
    pub qualifier: Option<String>,
    /// Erased supertype closure, exclusive of the type itself
    #[serde(default)]
    pub supertypes: Vec<TypePath>,
    /// Declared constructors
    #[serde(default)]
    pub constructors: Vec<ConstructorSpec>,
    /// Declared methods
    #[serde(default)]
    pub methods: Vec<MethodSpec>,
}

impl TypeEntry {
    /// Entry for `path` with no qualifier, supertypes, constructors, or methods
    pub fn new(path: impl Into<TypePath>) -> Self {
        Self {
            path: path.into(),
            qualifier: None,
            supertypes: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Set the explicit qualifier
    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    /// Add one supertype to the erased closure
    pub fn with_supertype(mut self, path: impl Into<TypePath>) -> Self {
        self.supertypes.push(path.into());
        self
    }

    /// Add an undesignated constructor
    pub fn with_constructor(mut self, params: Vec<ParamSpec>) -> Self {
        self.constructors.push(ConstructorSpec {
            designated: false,
            params,
        });
        self
    }

    /// Add a constructor marked for injection
    pub fn with_designated_constructor(mut self, params: Vec<ParamSpec>) -> Self {
        self.constructors.push(ConstructorSpec {
            designated: true,
            params,
        });
        self
    }

    /// Add a method not marked for injection
    pub fn with_method(mut self, name: impl Into<String>, params: Vec<ParamSpec>) -> Self {
        self.methods.push(MethodSpec {
            name: name.into(),
            inject: false,
            params,
        });
        self
    }

    /// Add a method marked for injection
    pub fn with_inject_method(mut self, name: impl Into<String>, params: Vec<ParamSpec>) -> Self {
        self.methods.push(MethodSpec {
            name: name.into(),
            inject: true,
            params,
        });
        self
    }
}
