// ==============================================================================
// Field Types: the Closed Hierarchy of Shapes a Field May Take
// ==============================================================================
//
// A field's type is one of exactly five shapes: a named-type reference, a
// primitive, an array, a map, or a union. The enum is the single source of
// truth for variant identity; the capability queries (`is_union_def` and
// friends) are a derived projection of the discriminant so that consumers can
// branch on a variant without matching the concrete representation.
//
// Union legality is enforced here, once, at construction: Avro forbids a
// union from immediately containing another union, and requires all branches
// to be distinguishable by type tag. Catching this centrally means neither
// the parser nor any plugin ever re-derives the rule.
//
// Types nest (array of union, union of map, ...) but never cycle by value:
// a record field that refers to its own record does so through `Ref`, which
// is resolved by name against an external registry, never by an owning edge.

use indexmap::IndexSet;

use crate::error::ModelError;
use crate::model::names::validate_reference_name;

/// The primitive Avro type kinds, including the logical types the protocol
/// model treats as first-class primitives (`decimal`, `date`, `time-millis`,
/// `timestamp-millis`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    Bytes,
    Null,
    Decimal,
    Date,
    TimeMillis,
    TimestampMillis,
}

impl PrimitiveKind {
    /// Return the Avro type-name string for this primitive.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Bytes => "bytes",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Decimal => "decimal",
            PrimitiveKind::Date => "date",
            PrimitiveKind::TimeMillis => "time-millis",
            PrimitiveKind::TimestampMillis => "timestamp-millis",
        }
    }

    /// Look up a primitive kind by its Avro type-name string.
    #[must_use]
    pub fn from_name(name: &str) -> Option<PrimitiveKind> {
        Some(match name {
            "string" => PrimitiveKind::String,
            "int" => PrimitiveKind::Int,
            "long" => PrimitiveKind::Long,
            "float" => PrimitiveKind::Float,
            "double" => PrimitiveKind::Double,
            "boolean" => PrimitiveKind::Boolean,
            "bytes" => PrimitiveKind::Bytes,
            "null" => PrimitiveKind::Null,
            "decimal" => PrimitiveKind::Decimal,
            "date" => PrimitiveKind::Date,
            "time-millis" => PrimitiveKind::TimeMillis,
            "timestamp-millis" => PrimitiveKind::TimestampMillis,
            _ => return None,
        })
    }
}

/// The type of a record field, error field, method parameter, or method
/// return value.
///
/// Build values through the constructors ([`reference`](FieldType::reference),
/// [`primitive`](FieldType::primitive), [`array`](FieldType::array),
/// [`map`](FieldType::map), [`union`](FieldType::union)) rather than variant
/// syntax; the constructors enforce name and union legality, and
/// [`ProtoDef::new`](crate::model::protocol::ProtoDef::new) re-walks every
/// reachable type so that an aggregate is well-formed in depth once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// A reference, by simple or dotted full name, to a record, enum, or
    /// error declared elsewhere. Resolution is deferred to an external
    /// registry; this model never chases the name.
    Ref { name: String },
    /// One of the built-in scalar kinds.
    Primitive(PrimitiveKind),
    /// A homogeneous sequence.
    Array { items: Box<FieldType> },
    /// A string-keyed homogeneous mapping. Keys are implicitly strings and
    /// not modeled.
    Map { values: Box<FieldType> },
    /// Exactly one of a set of alternatives.
    Union { branches: Vec<FieldType> },
}

impl FieldType {
    /// A named-type reference. Fails if `name` is not a valid simple or
    /// dotted Avro name.
    pub fn reference(name: impl Into<String>) -> Result<FieldType, ModelError> {
        let name = name.into();
        validate_reference_name(&name)?;
        Ok(FieldType::Ref { name })
    }

    /// A primitive type.
    #[must_use]
    pub fn primitive(kind: PrimitiveKind) -> FieldType {
        FieldType::Primitive(kind)
    }

    /// An array of `items`. Accepts any already-constructed type, including
    /// another array or a union.
    #[must_use]
    pub fn array(items: FieldType) -> FieldType {
        FieldType::Array {
            items: Box::new(items),
        }
    }

    /// A map with `values`. Accepts any already-constructed type.
    #[must_use]
    pub fn map(values: FieldType) -> FieldType {
        FieldType::Map {
            values: Box::new(values),
        }
    }

    /// A union over `branches`.
    ///
    /// Fails with [`ModelError::InvalidUnionMember`] if `branches` is empty,
    /// if any branch is itself a union (Avro forbids immediate nesting; the
    /// caller must flatten first), or if two branches share a type tag (two
    /// `int`s, two arrays, two maps, or two references to the same name).
    pub fn union(branches: Vec<FieldType>) -> Result<FieldType, ModelError> {
        check_union_branches(&branches)?;
        Ok(FieldType::Union { branches })
    }

    // ==========================================================================
    // Capability queries
    // ==========================================================================
    //
    // Exactly one of these is true for any value, and which one is fixed by
    // the constructor that produced it.

    /// Is this a named-type reference?
    #[must_use]
    pub fn is_type_name(&self) -> bool {
        matches!(self, FieldType::Ref { .. })
    }

    /// Is this a primitive?
    #[must_use]
    pub fn is_primitive_def(&self) -> bool {
        matches!(self, FieldType::Primitive(_))
    }

    /// Is this an array?
    #[must_use]
    pub fn is_array_def(&self) -> bool {
        matches!(self, FieldType::Array { .. })
    }

    /// Is this a map?
    #[must_use]
    pub fn is_map_def(&self) -> bool {
        matches!(self, FieldType::Map { .. })
    }

    /// Is this a union?
    #[must_use]
    pub fn is_union_def(&self) -> bool {
        matches!(self, FieldType::Union { .. })
    }

    /// The discriminant label used in diagnostics and by plugins reporting an
    /// unsupported type.
    #[must_use]
    pub fn kind_str(&self) -> &'static str {
        match self {
            FieldType::Ref { .. } => "named",
            FieldType::Primitive(_) => "primitive",
            FieldType::Array { .. } => "array",
            FieldType::Map { .. } => "map",
            FieldType::Union { .. } => "union",
        }
    }

    /// Re-validate this type and everything nested inside it.
    ///
    /// The constructors already reject illegal values, but variant syntax can
    /// bypass them; the protocol aggregate calls this on every reachable type
    /// so the well-formedness guarantee holds in depth.
    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        match self {
            FieldType::Ref { name } => validate_reference_name(name),
            FieldType::Primitive(_) => Ok(()),
            FieldType::Array { items } => items.validate(),
            FieldType::Map { values } => values.validate(),
            FieldType::Union { branches } => {
                check_union_branches(branches)?;
                for branch in branches {
                    branch.validate()?;
                }
                Ok(())
            }
        }
    }
}

/// The distinguishability tag of a union branch. Primitives tag by kind name,
/// arrays and maps by shape, references by name (prefixed so a type named
/// `array` cannot collide with the array shape tag).
fn branch_tag(branch: &FieldType) -> (String, String) {
    match branch {
        FieldType::Primitive(kind) => (kind.as_str().to_string(), kind.as_str().to_string()),
        FieldType::Array { .. } => ("array".to_string(), "array".to_string()),
        FieldType::Map { .. } => ("map".to_string(), "map".to_string()),
        FieldType::Ref { name } => (format!("named:{name}"), name.clone()),
        FieldType::Union { .. } => ("union".to_string(), "union".to_string()),
    }
}

fn check_union_branches(branches: &[FieldType]) -> Result<(), ModelError> {
    if branches.is_empty() {
        return Err(ModelError::InvalidUnionMember {
            reason: "union must contain at least one branch".to_string(),
        });
    }

    let mut seen = IndexSet::new();
    for branch in branches {
        if branch.is_union_def() {
            return Err(ModelError::InvalidUnionMember {
                reason: "unions may not immediately contain other unions".to_string(),
            });
        }
        let (tag, label) = branch_tag(branch);
        if !seen.insert(tag) {
            return Err(ModelError::InvalidUnionMember {
                reason: format!("two branches share the type tag `{label}`"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int() -> FieldType {
        FieldType::primitive(PrimitiveKind::Int)
    }

    fn string() -> FieldType {
        FieldType::primitive(PrimitiveKind::String)
    }

    /// Collect the five capability flags in a fixed order.
    fn flags(ty: &FieldType) -> [bool; 5] {
        [
            ty.is_type_name(),
            ty.is_primitive_def(),
            ty.is_array_def(),
            ty.is_map_def(),
            ty.is_union_def(),
        ]
    }

    #[test]
    fn test_exactly_one_capability_flag_per_constructor() {
        let cases = [
            (FieldType::reference("Foo").unwrap(), 0),
            (int(), 1),
            (FieldType::array(int()), 2),
            (FieldType::map(string()), 3),
            (FieldType::union(vec![int(), string()]).unwrap(), 4),
        ];
        for (ty, expect_true) in cases {
            let flags = flags(&ty);
            assert_eq!(flags.iter().filter(|f| **f).count(), 1, "{ty:?}");
            assert!(flags[expect_true], "{ty:?}");
        }
    }

    #[test]
    fn test_primitive_kind_round_trips_by_name() {
        for kind in [
            PrimitiveKind::String,
            PrimitiveKind::Decimal,
            PrimitiveKind::TimeMillis,
            PrimitiveKind::TimestampMillis,
        ] {
            assert_eq!(PrimitiveKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(PrimitiveKind::from_name("varchar"), None);
    }

    #[test]
    fn test_reference_rejects_invalid_names() {
        assert!(FieldType::reference("Foo").is_ok());
        assert!(FieldType::reference("org.example.Foo").is_ok());

        let err = FieldType::reference("").unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidName {
                name: String::new()
            }
        );
        assert!(FieldType::reference("my-type").is_err());
    }

    #[test]
    fn test_arrays_and_maps_nest_freely() {
        // array<array<union {int, string}>> is legal.
        let inner = FieldType::union(vec![int(), string()]).unwrap();
        let ty = FieldType::array(FieldType::array(inner));
        assert!(ty.is_array_def());
        assert!(ty.validate().is_ok());

        let ty = FieldType::map(FieldType::array(FieldType::map(int())));
        assert!(ty.validate().is_ok());
    }

    #[test]
    fn test_union_rejects_empty_branch_list() {
        let err = FieldType::union(vec![]).unwrap_err();
        insta::assert_snapshot!(
            err,
            @"invalid union member: union must contain at least one branch"
        );
    }

    #[test]
    fn test_union_rejects_nested_union() {
        let inner = FieldType::union(vec![int(), string()]).unwrap();
        let err = FieldType::union(vec![inner, FieldType::primitive(PrimitiveKind::Null)])
            .unwrap_err();
        insta::assert_snapshot!(
            err,
            @"invalid union member: unions may not immediately contain other unions"
        );
    }

    #[test]
    fn test_union_rejects_duplicate_primitive_kind() {
        let err = FieldType::union(vec![int(), int()]).unwrap_err();
        insta::assert_snapshot!(
            err,
            @"invalid union member: two branches share the type tag `int`"
        );
    }

    #[test]
    fn test_union_rejects_two_arrays_and_two_maps() {
        let err = FieldType::union(vec![
            FieldType::array(int()),
            FieldType::array(string()),
        ])
        .unwrap_err();
        insta::assert_snapshot!(
            err,
            @"invalid union member: two branches share the type tag `array`"
        );

        assert!(FieldType::union(vec![FieldType::map(int()), FieldType::map(string())]).is_err());
        // One array plus one map is fine.
        assert!(FieldType::union(vec![FieldType::array(int()), FieldType::map(int())]).is_ok());
    }

    #[test]
    fn test_union_rejects_duplicate_reference_but_allows_distinct_ones() {
        // Two different named types are distinguishable by name tag.
        let ok = FieldType::union(vec![
            FieldType::reference("Cat").unwrap(),
            FieldType::reference("Dog").unwrap(),
        ]);
        assert!(ok.is_ok());

        let err = FieldType::union(vec![
            FieldType::reference("Cat").unwrap(),
            FieldType::reference("Cat").unwrap(),
        ])
        .unwrap_err();
        insta::assert_snapshot!(
            err,
            @"invalid union member: two branches share the type tag `Cat`"
        );
    }

    #[test]
    fn test_union_reference_tag_does_not_collide_with_shape_tags() {
        // A named type called `array` coexists with an actual array branch.
        let ok = FieldType::union(vec![
            FieldType::reference("array").unwrap(),
            FieldType::array(int()),
        ]);
        assert!(ok.is_ok());
    }

    #[test]
    fn test_union_preserves_branch_order() {
        let branches = vec![FieldType::primitive(PrimitiveKind::Null), string(), int()];
        let FieldType::Union { branches: got } = FieldType::union(branches.clone()).unwrap()
        else {
            panic!("union constructor must produce a union");
        };
        assert_eq!(got, branches);
    }

    #[test]
    fn test_validate_catches_illegal_union_built_with_variant_syntax() {
        // Variant syntax bypasses the constructor; the deep walk used by the
        // protocol aggregate still catches it.
        let ty = FieldType::Array {
            items: Box::new(FieldType::Union {
                branches: vec![int(), int()],
            }),
        };
        assert!(ty.validate().is_err());
    }

    #[test]
    fn test_kind_str_labels() {
        assert_eq!(FieldType::reference("Foo").unwrap().kind_str(), "named");
        assert_eq!(int().kind_str(), "primitive");
        assert_eq!(FieldType::array(int()).kind_str(), "array");
        assert_eq!(FieldType::map(int()).kind_str(), "map");
        assert_eq!(
            FieldType::union(vec![int(), string()]).unwrap().kind_str(),
            "union"
        );
    }
}
