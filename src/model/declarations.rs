// ==============================================================================
// Named Declarations: Enums, Records, and Errors
// ==============================================================================
//
// Declarations carry an optional per-declaration namespace override, matching
// the `@namespace` annotation in Avro IDL: a declaration without one inherits
// the owning protocol's namespace. Uniqueness of declaration names is checked
// per full name at the protocol boundary, so two records called `Foo` may
// coexist in one protocol when their namespaces differ.
//
// Field order is preserved and semantically significant: generators derive
// positional constructor arguments from it.

use indexmap::IndexSet;

use crate::error::ModelError;
use crate::model::field_type::FieldType;
use crate::model::names::{make_full_name, validate_name, validate_namespace};

/// A named closed set of symbolic values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    pub name: String,
    pub namespace: Option<String>,
    pub symbols: Vec<String>,
    pub doc: Option<String>,
}

impl EnumDef {
    /// Build an enum declaration.
    ///
    /// Fails with [`ModelError::EmptySymbolSet`] when `symbols` is empty and
    /// [`ModelError::DuplicateSymbol`] on a case-sensitive repeat. Symbol
    /// order is preserved exactly; duplicates are rejected, never merged.
    pub fn new(
        name: impl Into<String>,
        symbols: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<EnumDef, ModelError> {
        let def = EnumDef {
            name: name.into(),
            namespace: None,
            symbols: symbols.into_iter().map(Into::into).collect(),
            doc: None,
        };
        def.validate()?;
        Ok(def)
    }

    /// Attach a doc comment.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> EnumDef {
        self.doc = Some(doc.into());
        self
    }

    /// Override the namespace inherited from the owning protocol.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> EnumDef {
        self.namespace = Some(namespace.into());
        self
    }

    /// The full name of this enum given the owning protocol's namespace.
    #[must_use]
    pub fn full_name(&self, default_namespace: Option<&str>) -> String {
        let ns = self.namespace.as_deref().or(default_namespace);
        make_full_name(&self.name, ns).into_owned()
    }

    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        if let Some(ns) = &self.namespace {
            validate_namespace(ns)?;
        }
        if self.symbols.is_empty() {
            return Err(ModelError::EmptySymbolSet {
                enum_name: self.name.clone(),
            });
        }
        let mut seen = IndexSet::new();
        for symbol in &self.symbols {
            if !seen.insert(symbol.as_str()) {
                return Err(ModelError::DuplicateSymbol {
                    enum_name: self.name.clone(),
                    symbol: symbol.clone(),
                });
            }
        }
        Ok(())
    }
}

/// One field of a record or error declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub field_type: FieldType,
    pub doc: Option<String>,
}

impl FieldDef {
    /// Build a field. The only check here is that the name is a valid Avro
    /// name; uniqueness is the owning declaration's concern.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Result<FieldDef, ModelError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(FieldDef {
            name,
            field_type,
            doc: None,
        })
    }

    /// Attach a doc comment.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> FieldDef {
        self.doc = Some(doc.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        self.field_type.validate()
    }
}

/// A named aggregate of typed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDef {
    pub name: String,
    pub namespace: Option<String>,
    pub doc: Option<String>,
    pub fields: Vec<FieldDef>,
}

impl RecordDef {
    /// Build a record declaration. Fails with
    /// [`ModelError::DuplicateFieldName`] when two fields share a name
    /// (case-sensitive exact match). Field order is preserved.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Result<RecordDef, ModelError> {
        let def = RecordDef {
            name: name.into(),
            namespace: None,
            doc: None,
            fields,
        };
        def.validate()?;
        Ok(def)
    }

    /// Attach a doc comment.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> RecordDef {
        self.doc = Some(doc.into());
        self
    }

    /// Override the namespace inherited from the owning protocol.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> RecordDef {
        self.namespace = Some(namespace.into());
        self
    }

    /// The full name of this record given the owning protocol's namespace.
    #[must_use]
    pub fn full_name(&self, default_namespace: Option<&str>) -> String {
        let ns = self.namespace.as_deref().or(default_namespace);
        make_full_name(&self.name, ns).into_owned()
    }

    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        if let Some(ns) = &self.namespace {
            validate_namespace(ns)?;
        }
        check_unique_fields(&self.name, &self.fields)?;
        for field in &self.fields {
            field.validate()?;
        }
        Ok(())
    }
}

/// A named aggregate of typed fields thrown by methods, declared with
/// `error` in Avro IDL. Structurally identical to a record, but generators
/// emit it as an exception type, so the two are kept distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDef {
    pub name: String,
    pub namespace: Option<String>,
    pub doc: Option<String>,
    pub fields: Vec<FieldDef>,
}

impl ErrorDef {
    /// Build an error declaration, under the same rules as
    /// [`RecordDef::new`].
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Result<ErrorDef, ModelError> {
        let def = ErrorDef {
            name: name.into(),
            namespace: None,
            doc: None,
            fields,
        };
        def.validate()?;
        Ok(def)
    }

    /// Attach a doc comment.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> ErrorDef {
        self.doc = Some(doc.into());
        self
    }

    /// Override the namespace inherited from the owning protocol.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> ErrorDef {
        self.namespace = Some(namespace.into());
        self
    }

    /// The full name of this error given the owning protocol's namespace.
    #[must_use]
    pub fn full_name(&self, default_namespace: Option<&str>) -> String {
        let ns = self.namespace.as_deref().or(default_namespace);
        make_full_name(&self.name, ns).into_owned()
    }

    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        if let Some(ns) = &self.namespace {
            validate_namespace(ns)?;
        }
        check_unique_fields(&self.name, &self.fields)?;
        for field in &self.fields {
            field.validate()?;
        }
        Ok(())
    }
}

/// Reject duplicate field names within one declaration, naming the first
/// offender.
fn check_unique_fields(declaration: &str, fields: &[FieldDef]) -> Result<(), ModelError> {
    let mut seen = IndexSet::new();
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            return Err(ModelError::DuplicateFieldName {
                declaration: declaration.to_string(),
                field: field.name.clone(),
            });
        }
    }
    Ok(())
}
