// ==============================================================================
// Method Model: RPC Operation Declarations
// ==============================================================================
//
// A method declares an HTTP verb (carried through from the source protocol's
// annotations so that client and server generators agree on routing), a
// return type, and an ordered parameter list. "Returns nothing" is an
// explicit `ReturnType::Void` marker, never an absent value: callers and
// plugins always branch on a discriminant, not on `Option`.

use indexmap::IndexSet;

use crate::error::ModelError;
use crate::model::field_type::FieldType;
use crate::model::names::validate_name;

/// The HTTP verbs a method may be annotated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpVerb {
    /// Return the verb as it appears in annotations and generated routing
    /// tables.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Delete => "DELETE",
        }
    }
}

impl std::str::FromStr for HttpVerb {
    type Err = ModelError;

    /// Parse a verb annotation. Matching is exact: annotations are written
    /// uppercase, and anything else fails with
    /// [`ModelError::InvalidHttpVerb`].
    fn from_str(s: &str) -> Result<HttpVerb, ModelError> {
        match s {
            "GET" => Ok(HttpVerb::Get),
            "POST" => Ok(HttpVerb::Post),
            "PUT" => Ok(HttpVerb::Put),
            "DELETE" => Ok(HttpVerb::Delete),
            _ => Err(ModelError::InvalidHttpVerb {
                verb: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a method returns: a value of some type, or explicitly nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnType {
    Value(FieldType),
    Void,
}

impl ReturnType {
    /// Does this method return nothing?
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, ReturnType::Void)
    }

    /// The returned type, or `None` for void.
    #[must_use]
    pub fn as_field_type(&self) -> Option<&FieldType> {
        match self {
            ReturnType::Value(ty) => Some(ty),
            ReturnType::Void => None,
        }
    }
}

impl From<FieldType> for ReturnType {
    fn from(ty: FieldType) -> ReturnType {
        ReturnType::Value(ty)
    }
}

/// One method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDef {
    pub name: String,
    pub param_type: FieldType,
}

impl ParamDef {
    /// Build a parameter. Uniqueness is the owning method's concern.
    pub fn new(name: impl Into<String>, param_type: FieldType) -> Result<ParamDef, ModelError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(ParamDef { name, param_type })
    }

    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        self.param_type.validate()
    }
}

/// One RPC operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    pub name: String,
    pub doc: Option<String>,
    pub http_verb: HttpVerb,
    pub return_type: ReturnType,
    pub params: Vec<ParamDef>,
}

impl MethodDef {
    /// Build a method declaration. Fails with
    /// [`ModelError::DuplicateParamName`] when two parameters share a name.
    /// Parameter order is preserved.
    pub fn new(
        name: impl Into<String>,
        http_verb: HttpVerb,
        return_type: ReturnType,
        params: Vec<ParamDef>,
    ) -> Result<MethodDef, ModelError> {
        let def = MethodDef {
            name: name.into(),
            doc: None,
            http_verb,
            return_type,
            params,
        };
        def.validate()?;
        Ok(def)
    }

    /// Attach a doc comment.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> MethodDef {
        self.doc = Some(doc.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        let mut seen = IndexSet::new();
        for param in &self.params {
            if !seen.insert(param.name.as_str()) {
                return Err(ModelError::DuplicateParamName {
                    method: self.name.clone(),
                    param: param.name.clone(),
                });
            }
            param.validate()?;
        }
        if let ReturnType::Value(ty) = &self.return_type {
            ty.validate()?;
        }
        Ok(())
    }
}
