// ==============================================================================
// Protocol Aggregate: the Validated Construction Boundary
// ==============================================================================
//
// `ProtoDef` is the root of the model. Construction is the only point at
// which invariants are checked: `ProtoDef::new` validates declaration and
// method uniqueness, then re-walks every declaration and every reachable
// field type, so that a successfully built aggregate is internally consistent
// in depth for its whole lifetime. Plugins receive `&ProtoDef` and can rely
// on that guarantee instead of re-validating.
//
// No cross-reference resolution happens here. A `FieldType::Ref` is accepted
// even when the named declaration lives in another file; resolving names
// across protocols is the registry's job (see `crate::registry`).

use indexmap::IndexSet;

use crate::error::ModelError;
use crate::model::declarations::{EnumDef, ErrorDef, RecordDef};
use crate::model::method::MethodDef;
use crate::model::names::{make_full_name, validate_name, validate_namespace};

/// Source location of the file a protocol was parsed from. Carried opaquely
/// from parser input to plugin output naming; only `file_name` non-emptiness
/// is enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathInfo {
    pub file_name: String,
    pub dir_name: Option<String>,
    pub full_path: String,
}

impl PathInfo {
    pub fn new(
        file_name: impl Into<String>,
        dir_name: Option<String>,
        full_path: impl Into<String>,
    ) -> Result<PathInfo, ModelError> {
        let file_name = file_name.into();
        if file_name.is_empty() {
            return Err(ModelError::EmptyFileName);
        }
        Ok(PathInfo {
            file_name,
            dir_name,
            full_path: full_path.into(),
        })
    }
}

/// One parsed Avro protocol: a namespace, source-location metadata, and the
/// records, enums, errors, and methods declared in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoDef {
    pub path_info: PathInfo,
    pub name: String,
    pub namespace: Option<String>,
    pub doc: Option<String>,
    pub records: Vec<RecordDef>,
    pub enums: Vec<EnumDef>,
    pub errors: Vec<ErrorDef>,
    pub methods: Vec<MethodDef>,
}

impl ProtoDef {
    /// Build a protocol aggregate.
    ///
    /// Fails with [`ModelError::DuplicateDeclarationName`] when any two of
    /// records ∪ enums ∪ errors resolve to the same full name, and
    /// [`ModelError::DuplicateMethodName`] on a method-name collision.
    /// Every declaration and every reachable field type is re-validated, so
    /// values smuggled past the per-declaration constructors are still
    /// rejected here.
    pub fn new(
        path_info: PathInfo,
        name: impl Into<String>,
        namespace: Option<String>,
        records: Vec<RecordDef>,
        enums: Vec<EnumDef>,
        errors: Vec<ErrorDef>,
        methods: Vec<MethodDef>,
    ) -> Result<ProtoDef, ModelError> {
        let def = ProtoDef {
            path_info,
            name: name.into(),
            namespace,
            doc: None,
            records,
            enums,
            errors,
            methods,
        };
        def.validate()?;
        Ok(def)
    }

    /// Attach a doc comment.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> ProtoDef {
        self.doc = Some(doc.into());
        self
    }

    /// The full name of this protocol (`namespace.Name`).
    #[must_use]
    pub fn full_name(&self) -> String {
        make_full_name(&self.name, self.namespace.as_deref()).into_owned()
    }

    /// Full names of all declarations (records, enums, errors), in
    /// declaration-list order: records first, then enums, then errors.
    pub fn declaration_names(&self) -> impl Iterator<Item = String> + '_ {
        let ns = self.namespace.as_deref();
        self.records
            .iter()
            .map(move |r| r.full_name(ns))
            .chain(self.enums.iter().map(move |e| e.full_name(ns)))
            .chain(self.errors.iter().map(move |e| e.full_name(ns)))
    }

    /// Find a record by simple name.
    #[must_use]
    pub fn find_record(&self, name: &str) -> Option<&RecordDef> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Find an enum by simple name.
    #[must_use]
    pub fn find_enum(&self, name: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Find an error by simple name.
    #[must_use]
    pub fn find_error(&self, name: &str) -> Option<&ErrorDef> {
        self.errors.iter().find(|e| e.name == name)
    }

    /// Find a method by name.
    #[must_use]
    pub fn find_method(&self, name: &str) -> Option<&MethodDef> {
        self.methods.iter().find(|m| m.name == name)
    }

    fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        if let Some(ns) = &self.namespace {
            validate_namespace(ns)?;
        }

        // Declaration names must be unique per full name, so a namespace
        // override on one of two same-named declarations is enough to
        // disambiguate them.
        let mut decl_names = IndexSet::new();
        for full_name in self.declaration_names() {
            if !decl_names.insert(full_name.clone()) {
                return Err(ModelError::DuplicateDeclarationName {
                    protocol: self.name.clone(),
                    name: full_name,
                });
            }
        }

        let mut method_names = IndexSet::new();
        for method in &self.methods {
            if !method_names.insert(method.name.as_str()) {
                return Err(ModelError::DuplicateMethodName {
                    protocol: self.name.clone(),
                    name: method.name.clone(),
                });
            }
        }

        // Deep re-validation: the aggregate is the construction boundary, so
        // everything reachable is checked here regardless of how it was built.
        for record in &self.records {
            record.validate()?;
        }
        for e in &self.enums {
            e.validate()?;
        }
        for error in &self.errors {
            error.validate()?;
        }
        for method in &self.methods {
            method.validate()?;
        }
        Ok(())
    }
}
