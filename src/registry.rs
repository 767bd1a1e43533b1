// ==============================================================================
// Declaration Registry: Cross-Protocol Name Tracking and Reference Checking
// ==============================================================================
//
// The model accepts a `FieldType::Ref` even when the named declaration is not
// part of the same aggregate -- it may live in another file or namespace. This
// registry is the external collaborator that closes the loop: protocols are
// registered as they are loaded, and `unresolved_refs` then reports every
// reference that no registered declaration satisfies.
//
// References stay in the type tree as names rather than being replaced with
// the referenced declaration; generators render a reference as its name, so
// nothing is gained by inlining, and keeping the tree acyclic stays trivial.

use indexmap::IndexMap;

use crate::error::ModelError;
use crate::model::field_type::FieldType;
use crate::model::names::make_full_name;
use crate::model::protocol::ProtoDef;

/// Which kind of declaration a registered full name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Record,
    Enum,
    Error,
}

/// A reference that no registered declaration satisfies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedRef {
    /// The full name the reference resolved to.
    pub name: String,
    /// Where the reference occurs, as a dotted path
    /// (`namespace.Record.field`, or `namespace.Protocol.method.param`).
    pub at: String,
    /// The closest registered name, when one is within edit distance.
    pub suggestion: Option<String>,
}

/// Registry of named declarations across one or more protocols, keyed by full
/// name, in registration order.
#[derive(Debug, Default)]
pub struct DeclRegistry {
    decls: IndexMap<String, DeclKind>,
}

impl DeclRegistry {
    #[must_use]
    pub fn new() -> DeclRegistry {
        DeclRegistry {
            decls: IndexMap::new(),
        }
    }

    /// Register every declaration of `proto` under its full name.
    ///
    /// Fails with [`ModelError::DuplicateDeclarationName`] when a full name is
    /// already registered, e.g. when two files declare the same type in the
    /// same namespace. The registry is unchanged up to the offending
    /// declaration; callers treat this as fatal for the protocol load.
    pub fn register_protocol(&mut self, proto: &ProtoDef) -> Result<(), ModelError> {
        let ns = proto.namespace.as_deref();
        self.decls
            .reserve(proto.records.len() + proto.enums.len() + proto.errors.len());

        for record in &proto.records {
            self.register(record.full_name(ns), DeclKind::Record, &proto.name)?;
        }
        for e in &proto.enums {
            self.register(e.full_name(ns), DeclKind::Enum, &proto.name)?;
        }
        for error in &proto.errors {
            self.register(error.full_name(ns), DeclKind::Error, &proto.name)?;
        }
        Ok(())
    }

    fn register(
        &mut self,
        full_name: String,
        kind: DeclKind,
        protocol: &str,
    ) -> Result<(), ModelError> {
        if self.decls.contains_key(&full_name) {
            return Err(ModelError::DuplicateDeclarationName {
                protocol: protocol.to_string(),
                name: full_name,
            });
        }
        self.decls.insert(full_name, kind);
        Ok(())
    }

    /// Look up a declaration by full name.
    #[must_use]
    pub fn lookup(&self, full_name: &str) -> Option<DeclKind> {
        self.decls.get(full_name).copied()
    }

    /// Check whether a full name is registered.
    #[must_use]
    pub fn contains(&self, full_name: &str) -> bool {
        self.decls.contains_key(full_name)
    }

    /// All registered full names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.decls.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Walk every field type reachable from `proto` -- record and error
    /// fields, method parameters, and method return types, recursing through
    /// arrays, maps, and unions -- and collect the references that resolve to
    /// no registered declaration, in walk order.
    ///
    /// Bare reference names resolve under the protocol's namespace; dotted
    /// names are taken as fully qualified. Each result carries the path where
    /// the reference occurs and, when a registered name is close by edit
    /// distance, a "did you mean" suggestion.
    #[must_use]
    pub fn unresolved_refs(&self, proto: &ProtoDef) -> Vec<UnresolvedRef> {
        let ns = proto.namespace.as_deref();
        let mut unresolved = Vec::new();

        for record in &proto.records {
            let base = record.full_name(ns);
            for field in &record.fields {
                self.collect(&field.field_type, &format!("{base}.{}", field.name), ns, &mut unresolved);
            }
        }
        for error in &proto.errors {
            let base = error.full_name(ns);
            for field in &error.fields {
                self.collect(&field.field_type, &format!("{base}.{}", field.name), ns, &mut unresolved);
            }
        }

        let proto_full = proto.full_name();
        for method in &proto.methods {
            for param in &method.params {
                self.collect(
                    &param.param_type,
                    &format!("{proto_full}.{}.{}", method.name, param.name),
                    ns,
                    &mut unresolved,
                );
            }
            if let Some(ty) = method.return_type.as_field_type() {
                self.collect(
                    ty,
                    &format!("{proto_full}.{}.return", method.name),
                    ns,
                    &mut unresolved,
                );
            }
        }

        unresolved
    }

    fn collect(
        &self,
        ty: &FieldType,
        path: &str,
        namespace: Option<&str>,
        unresolved: &mut Vec<UnresolvedRef>,
    ) {
        match ty {
            FieldType::Ref { name } => {
                let full_name = make_full_name(name, namespace);
                if !self.decls.contains_key(full_name.as_ref()) {
                    let suggestion = self.suggest(&full_name);
                    unresolved.push(UnresolvedRef {
                        name: full_name.into_owned(),
                        at: path.to_string(),
                        suggestion,
                    });
                }
            }
            FieldType::Array { items } => self.collect(items, path, namespace, unresolved),
            FieldType::Map { values } => self.collect(values, path, namespace, unresolved),
            FieldType::Union { branches } => {
                for branch in branches {
                    self.collect(branch, path, namespace, unresolved);
                }
            }
            // Primitives contain no references to resolve.
            FieldType::Primitive(_) => {}
        }
    }

    /// Find the registered name closest to `target`, if any is within the
    /// edit-distance threshold. Compares both full names and simple (last
    /// segment) names, so `org.example.Usr` suggests `org.example.User`.
    fn suggest(&self, target: &str) -> Option<String> {
        let target_simple = target.rsplit('.').next().unwrap_or(target);
        let mut best: Option<(usize, &str)> = None;

        for known in self.names() {
            let known_simple = known.rsplit('.').next().unwrap_or(known);
            let distance = levenshtein(target, known)
                .min(levenshtein(target_simple, known_simple));
            if distance <= max_edit_distance(target_simple.len())
                && best.is_none_or(|(d, _)| distance < d)
            {
                best = Some((distance, known));
            }
        }

        best.map(|(_, name)| name.to_string())
    }
}

// ==============================================================================
// String Similarity
// ==============================================================================

/// Compute the Levenshtein edit distance between two strings.
///
/// Uses the standard dynamic programming algorithm with a two-row buffer.
/// This is sufficient for identifiers and type names, which are short.
fn levenshtein(a: &str, b: &str) -> usize {
    let a_len = a.len();
    let b_len = b.len();
    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr_row[0] = i + 1;
        for (j, cb) in b.chars().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr_row[j + 1] = (prev_row[j] + cost) // substitution
                .min(prev_row[j + 1] + 1) // deletion
                .min(curr_row[j] + 1); // insertion
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }
    prev_row[b_len]
}

/// Maximum edit distance for a suggestion to be considered close enough.
/// Short names require distance <= 1 to avoid noisy suggestions.
fn max_edit_distance(name_len: usize) -> usize {
    if name_len <= 4 { 1 } else { 2 }
}
