// ==============================================================================
// Model Construction Errors
// ==============================================================================
//
// Every invariant in the protocol model is checked at construction time, and
// every violation maps to exactly one variant here. Construction is fail-fast:
// no partially-valid declaration or aggregate is ever handed to a caller, so
// downstream consumers (the registry, every plugin) never re-validate.
//
// The enum derives `thiserror::Error` for `Display`/`Error` and implements
// `miette::Diagnostic` by hand, so that callers holding a `miette::Result` at
// the orchestration boundary get stable error codes and help text for free.

use thiserror::Error;

/// An invariant violation detected while constructing part of a protocol
/// definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A union was built from an empty branch list, a branch that is itself a
    /// union, or two branches that are indistinguishable by type tag.
    #[error("invalid union member: {reason}")]
    InvalidUnionMember { reason: String },

    /// An enum declared the same symbol twice. Duplicates are rejected, never
    /// silently merged.
    #[error("duplicate symbol `{symbol}` in enum `{enum_name}`")]
    DuplicateSymbol { enum_name: String, symbol: String },

    /// An enum declared no symbols at all.
    #[error("enum `{enum_name}` must declare at least one symbol")]
    EmptySymbolSet { enum_name: String },

    /// Two fields of one record or error declaration share a name
    /// (case-sensitive exact match).
    #[error("duplicate field `{field}` in `{declaration}`")]
    DuplicateFieldName { declaration: String, field: String },

    /// Two parameters of one method share a name.
    #[error("duplicate parameter `{param}` in method `{method}`")]
    DuplicateParamName { method: String, param: String },

    /// Two declarations (records, enums, or errors) in one protocol resolve
    /// to the same full name within their namespace.
    #[error("duplicate declaration `{name}` in protocol `{protocol}`")]
    DuplicateDeclarationName { protocol: String, name: String },

    /// Two methods of one protocol share a name.
    #[error("duplicate method `{name}` in protocol `{protocol}`")]
    DuplicateMethodName { protocol: String, name: String },

    /// A method was annotated with a verb outside the accepted set.
    #[error("invalid HTTP verb `{verb}`")]
    InvalidHttpVerb { verb: String },

    /// A declaration, field, parameter, or type reference name does not match
    /// the Avro name pattern.
    #[error("invalid Avro name: `{name}`")]
    InvalidName { name: String },

    /// A `PathInfo` or `GeneratedCode` was built with an empty file name.
    #[error("file name must not be empty")]
    EmptyFileName,
}

impl miette::Diagnostic for ModelError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let code = match self {
            ModelError::InvalidUnionMember { .. } => "avrodef::union::invalid_member",
            ModelError::DuplicateSymbol { .. } => "avrodef::enum::duplicate_symbol",
            ModelError::EmptySymbolSet { .. } => "avrodef::enum::empty_symbol_set",
            ModelError::DuplicateFieldName { .. } => "avrodef::record::duplicate_field",
            ModelError::DuplicateParamName { .. } => "avrodef::method::duplicate_param",
            ModelError::DuplicateDeclarationName { .. } => {
                "avrodef::protocol::duplicate_declaration"
            }
            ModelError::DuplicateMethodName { .. } => "avrodef::protocol::duplicate_method",
            ModelError::InvalidHttpVerb { .. } => "avrodef::method::invalid_http_verb",
            ModelError::InvalidName { .. } => "avrodef::name::invalid",
            ModelError::EmptyFileName => "avrodef::path::empty_file_name",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let help: &'static str = match self {
            ModelError::InvalidUnionMember { .. } => {
                "union branches must be distinguishable by type tag: at most one \
                 branch per primitive kind, one array, one map, and no \
                 immediately nested unions (flatten before constructing)"
            }
            ModelError::InvalidHttpVerb { .. } => "expected one of GET, POST, PUT, or DELETE",
            ModelError::InvalidName { .. } => {
                "names must start with a letter or underscore, followed by \
                 letters, digits, or underscores; namespace segments are \
                 separated by dots"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}
