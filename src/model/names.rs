// ==============================================================================
// Avro Name Validation and Full-Name Construction
// ==============================================================================
//
// The Avro specification requires that names match `[A-Za-z_][A-Za-z0-9_]*`,
// but the Java reference implementation (`IdlReader.VALID_NAME`) uses the
// Unicode-aware pattern `[_\p{L}][_\p{LD}]*`, accepting Unicode letters and
// digits. We match Java's behavior using Rust's Unicode-aware `char` methods,
// so protocols with Cyrillic or CJK identifiers round-trip correctly.

use std::borrow::Cow;

use crate::error::ModelError;

/// Check whether a single name segment is a valid Avro name.
pub(crate) fn is_valid_avro_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        // First character must be a Unicode letter or underscore.
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    // Remaining characters must be Unicode letters, digits, or underscores.
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Validate a simple (dot-free) declaration, field, parameter, or symbol name.
pub(crate) fn validate_name(name: &str) -> Result<(), ModelError> {
    if is_valid_avro_name(name) {
        Ok(())
    } else {
        Err(ModelError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Validate a dotted namespace: each segment must independently satisfy the
/// name pattern. The empty namespace is treated as absent and accepted.
pub(crate) fn validate_namespace(namespace: &str) -> Result<(), ModelError> {
    if namespace.is_empty() {
        return Ok(());
    }
    for segment in namespace.split('.') {
        if !is_valid_avro_name(segment) {
            return Err(ModelError::InvalidName {
                name: namespace.to_string(),
            });
        }
    }
    Ok(())
}

/// Validate a type-reference name, which may be either a simple name or a
/// dotted full name (`org.example.Foo`).
pub(crate) fn validate_reference_name(name: &str) -> Result<(), ModelError> {
    if name.is_empty() {
        return Err(ModelError::InvalidName {
            name: name.to_string(),
        });
    }
    for segment in name.split('.') {
        if !is_valid_avro_name(segment) {
            return Err(ModelError::InvalidName {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

/// Build the full name of a declaration or reference. A name that already
/// contains a dot is taken as fully qualified and the namespace is ignored,
/// matching how the Java tools resolve dotted identifiers.
pub(crate) fn make_full_name<'a>(name: &'a str, namespace: Option<&str>) -> Cow<'a, str> {
    if name.contains('.') {
        return Cow::Borrowed(name);
    }
    match namespace {
        Some(ns) if !ns.is_empty() => Cow::Owned(format!("{ns}.{name}")),
        _ => Cow::Borrowed(name),
    }
}
