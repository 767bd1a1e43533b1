// ==============================================================================
// Integration Tests: Build Protocol Aggregates and Check Model Invariants
// ==============================================================================
//
// Each test builds declarations through the public constructors the way a
// parser front-end would, and asserts the documented construction-time
// guarantees: uniqueness scoping, union legality, explicit void returns, and
// deferred (registry-based) reference resolution.

use avrodef::{
    DeclKind, DeclRegistry, EnumDef, ErrorDef, FieldDef, FieldType, HttpVerb, MethodDef,
    ModelError, ParamDef, PathInfo, PrimitiveKind, ProtoDef, RecordDef, ReturnType,
};
use pretty_assertions::assert_eq;

fn path(file: &str) -> PathInfo {
    PathInfo::new(file, Some("schemas".to_string()), format!("/schemas/{file}"))
        .expect("non-empty file name")
}

/// A protocol exercising every field-type variant and both method shapes.
fn pet_store() -> ProtoDef {
    let species = EnumDef::new("Species", ["CAT", "DOG", "AXOLOTL"])
        .expect("distinct symbols")
        .with_doc("What kind of animal this is.");

    let pet = RecordDef::new(
        "Pet",
        vec![
            FieldDef::new("id", FieldType::primitive(PrimitiveKind::Long)).unwrap(),
            FieldDef::new("species", FieldType::reference("Species").unwrap()).unwrap(),
            FieldDef::new(
                "nicknames",
                FieldType::array(FieldType::primitive(PrimitiveKind::String)),
            )
            .unwrap(),
            FieldDef::new(
                "attributes",
                FieldType::map(FieldType::primitive(PrimitiveKind::String)),
            )
            .unwrap(),
            FieldDef::new(
                "owner",
                FieldType::union(vec![
                    FieldType::primitive(PrimitiveKind::Null),
                    FieldType::reference("Owner").unwrap(),
                ])
                .unwrap(),
            )
            .unwrap(),
        ],
    )
    .expect("distinct field names");

    let owner = RecordDef::new(
        "Owner",
        vec![FieldDef::new("name", FieldType::primitive(PrimitiveKind::String)).unwrap()],
    )
    .unwrap();

    let not_found = ErrorDef::new(
        "PetNotFound",
        vec![FieldDef::new("id", FieldType::primitive(PrimitiveKind::Long)).unwrap()],
    )
    .unwrap();

    let get_pet = MethodDef::new(
        "getPet",
        HttpVerb::Get,
        ReturnType::Value(FieldType::reference("Pet").unwrap()),
        vec![ParamDef::new("id", FieldType::primitive(PrimitiveKind::Long)).unwrap()],
    )
    .unwrap()
    .with_doc("Fetch one pet by id.");

    let delete_pet = MethodDef::new(
        "deletePet",
        HttpVerb::Delete,
        ReturnType::Void,
        vec![ParamDef::new("id", FieldType::primitive(PrimitiveKind::Long)).unwrap()],
    )
    .unwrap();

    ProtoDef::new(
        path("petstore.avdl"),
        "PetStore",
        Some("org.example.pets".to_string()),
        vec![pet, owner],
        vec![species],
        vec![not_found],
        vec![get_pet, delete_pet],
    )
    .expect("well-formed protocol")
}

// ==============================================================================
// Aggregate Construction
// ==============================================================================

#[test]
fn builds_and_introspects_a_full_protocol() {
    let proto = pet_store();

    assert_eq!(proto.full_name(), "org.example.pets.PetStore");
    assert_eq!(proto.path_info.file_name, "petstore.avdl");

    let decls: Vec<_> = proto.declaration_names().collect();
    assert_eq!(
        decls,
        [
            "org.example.pets.Pet",
            "org.example.pets.Owner",
            "org.example.pets.Species",
            "org.example.pets.PetNotFound",
        ]
    );

    let pet = proto.find_record("Pet").expect("Pet is declared");
    assert_eq!(pet.fields.len(), 5);
    assert!(pet.fields[4].field_type.is_union_def());

    let ping = proto.find_method("deletePet").expect("deletePet is declared");
    assert!(ping.return_type.is_void());
}

#[test]
fn enum_symbols_round_trip_in_input_order() {
    let species = pet_store()
        .find_enum("Species")
        .expect("Species is declared")
        .clone();
    assert_eq!(species.symbols, ["CAT", "DOG", "AXOLOTL"]);
}

#[test]
fn duplicate_declarations_rejected_only_within_one_namespace() {
    // Same namespace: rejected.
    let err = ProtoDef::new(
        path("dup.avdl"),
        "P",
        Some("ns".to_string()),
        vec![
            RecordDef::new("Foo", vec![]).unwrap(),
            RecordDef::new("Foo", vec![]).unwrap(),
        ],
        vec![],
        vec![],
        vec![],
    )
    .unwrap_err();
    assert_eq!(
        err,
        ModelError::DuplicateDeclarationName {
            protocol: "P".to_string(),
            name: "ns.Foo".to_string(),
        }
    );

    // Different namespaces: accepted.
    let proto = ProtoDef::new(
        path("dup.avdl"),
        "P",
        Some("ns".to_string()),
        vec![
            RecordDef::new("Foo", vec![]).unwrap(),
            RecordDef::new("Foo", vec![]).unwrap().with_namespace("other.ns"),
        ],
        vec![],
        vec![],
        vec![],
    )
    .expect("namespace override disambiguates");
    assert_eq!(
        proto.declaration_names().collect::<Vec<_>>(),
        ["ns.Foo", "other.ns.Foo"]
    );
}

#[test]
fn aggregate_is_the_construction_boundary() {
    // A record field may reference a declaration the aggregate does not
    // contain; resolution belongs to the registry, not the constructor.
    let proto = ProtoDef::new(
        path("dangling.avdl"),
        "P",
        None,
        vec![RecordDef::new(
            "Holder",
            vec![FieldDef::new("x", FieldType::reference("SomewhereElse").unwrap()).unwrap()],
        )
        .unwrap()],
        vec![],
        vec![],
        vec![],
    );
    assert!(proto.is_ok());
}

// ==============================================================================
// Registry Resolution
// ==============================================================================

#[test]
fn registry_resolves_all_references_in_the_pet_store() {
    let proto = pet_store();
    let mut registry = DeclRegistry::new();
    registry.register_protocol(&proto).expect("no collisions");

    assert_eq!(
        registry.lookup("org.example.pets.Species"),
        Some(DeclKind::Enum)
    );
    assert_eq!(
        registry.lookup("org.example.pets.PetNotFound"),
        Some(DeclKind::Error)
    );
    assert!(registry.unresolved_refs(&proto).is_empty());
}

#[test]
fn registry_reports_danglers_with_paths_and_suggestions() {
    let proto = ProtoDef::new(
        path("typo.avdl"),
        "P",
        Some("ns".to_string()),
        vec![
            RecordDef::new("UserProfile", vec![]).unwrap(),
            RecordDef::new(
                "Holder",
                vec![FieldDef::new("p", FieldType::reference("UserProfil").unwrap()).unwrap()],
            )
            .unwrap(),
        ],
        vec![],
        vec![],
        vec![],
    )
    .unwrap();

    let mut registry = DeclRegistry::new();
    registry.register_protocol(&proto).unwrap();

    let unresolved = registry.unresolved_refs(&proto);
    assert_eq!(unresolved.len(), 1);
    assert_eq!(unresolved[0].name, "ns.UserProfil");
    assert_eq!(unresolved[0].at, "ns.Holder.p");
    assert_eq!(unresolved[0].suggestion.as_deref(), Some("ns.UserProfile"));
}

#[test]
fn registry_spans_multiple_protocols() {
    let shared = ProtoDef::new(
        path("shared.avdl"),
        "Shared",
        Some("org.example.common".to_string()),
        vec![RecordDef::new("Money", vec![]).unwrap()],
        vec![],
        vec![],
        vec![],
    )
    .unwrap();

    let billing = ProtoDef::new(
        path("billing.avdl"),
        "Billing",
        Some("org.example.billing".to_string()),
        vec![RecordDef::new(
            "Invoice",
            vec![FieldDef::new(
                "total",
                FieldType::reference("org.example.common.Money").unwrap(),
            )
            .unwrap()],
        )
        .unwrap()],
        vec![],
        vec![],
        vec![],
    )
    .unwrap();

    let mut registry = DeclRegistry::new();
    registry.register_protocol(&shared).unwrap();
    registry.register_protocol(&billing).unwrap();
    assert!(registry.unresolved_refs(&billing).is_empty());
}
