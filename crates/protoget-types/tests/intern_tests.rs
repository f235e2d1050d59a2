use protoget_types::{
    BasicKind, FieldInfo, MethodInfo, MethodSig, StaticShape, TypeData, TypeId, TypeInterner,
};

fn marker(interner: &mut TypeInterner) -> TypeId {
    interner.interface(vec![MethodSig {
        name: "ProtoMessage".to_string(),
        signature: TypeId::EMPTY_SIGNATURE,
    }])
}

/// `type Person struct { Name string; Age int }` with `func (*Person) ProtoMessage()`.
fn person(interner: &mut TypeInterner) -> TypeId {
    let person = interner.declare_named("pb", "Person");
    let fields = interner.struct_type(vec![
        FieldInfo {
            name: "Name".to_string(),
            type_id: TypeId::STRING,
            embedded: false,
        },
        FieldInfo {
            name: "Age".to_string(),
            type_id: TypeId::INT,
            embedded: false,
        },
    ]);
    interner.set_underlying(person, fields);
    interner.add_method(
        person,
        MethodInfo {
            name: "ProtoMessage".to_string(),
            signature: TypeId::EMPTY_SIGNATURE,
            pointer_receiver: true,
        },
    );
    person
}

#[test]
fn test_predeclared_types_are_registered() {
    let interner = TypeInterner::new();
    assert_eq!(
        interner.lookup(TypeId::STRING),
        Some(&TypeData::Basic(BasicKind::String))
    );
    assert_eq!(
        interner.lookup(TypeId::EMPTY_SIGNATURE),
        Some(&TypeData::Signature {
            params: vec![],
            results: vec![]
        })
    );
    assert_eq!(interner.display(TypeId::ERROR), "error");
    assert!(interner.is_interface(TypeId::ERROR));
}

#[test]
fn test_structural_types_are_deduplicated() {
    let mut interner = TypeInterner::new();
    let a = interner.pointer(TypeId::INT);
    let b = interner.pointer(TypeId::INT);
    let c = interner.pointer(TypeId::STRING);
    assert_eq!(a, b);
    assert_ne!(a, c);

    let sig1 = interner.signature(vec![TypeId::INT], vec![TypeId::STRING]);
    let sig2 = interner.signature(vec![TypeId::INT], vec![TypeId::STRING]);
    assert_eq!(sig1, sig2);
}

#[test]
fn test_interface_method_order_is_irrelevant() {
    let mut interner = TypeInterner::new();
    let a = MethodSig {
        name: "A".to_string(),
        signature: TypeId::EMPTY_SIGNATURE,
    };
    let b = MethodSig {
        name: "B".to_string(),
        signature: TypeId::EMPTY_SIGNATURE,
    };
    let ab = interner.interface(vec![a.clone(), b.clone()]);
    let ba = interner.interface(vec![b, a]);
    assert_eq!(ab, ba);
}

#[test]
fn test_named_types_are_never_merged() {
    let mut interner = TypeInterner::new();
    let first = interner.declare_named("a", "T");
    let second = interner.declare_named("b", "T");
    assert_ne!(first, second);
    assert_eq!(interner.display(first), "a.T");
    assert_eq!(interner.display(second), "b.T");
}

#[test]
fn test_method_sets_follow_receiver_kind() {
    let mut interner = TypeInterner::new();
    let t = interner.declare_named("p", "T");
    interner.set_underlying(t, TypeId::INT);
    interner.add_method(
        t,
        MethodInfo {
            name: "Value".to_string(),
            signature: TypeId::EMPTY_SIGNATURE,
            pointer_receiver: false,
        },
    );
    interner.add_method(
        t,
        MethodInfo {
            name: "Ptr".to_string(),
            signature: TypeId::EMPTY_SIGNATURE,
            pointer_receiver: true,
        },
    );
    let ptr_t = interner.pointer(t);

    assert!(interner.method_set_lookup(t, "Value").is_some());
    assert!(interner.method_set_lookup(t, "Ptr").is_none());
    assert!(interner.method_set_lookup(ptr_t, "Value").is_some());
    assert!(interner.method_set_lookup(ptr_t, "Ptr").is_some());
    // An addressable `T` variable may still call the pointer method.
    assert!(interner.selectable_method(t, "Ptr").is_some());
}

#[test]
fn test_pointer_receiver_marker_is_implemented_by_pointer_only() {
    let mut interner = TypeInterner::new();
    let marker = marker(&mut interner);
    let person = person(&mut interner);
    let ptr = interner.pointer(person);

    assert!(interner.implements(ptr, marker));
    assert!(!interner.implements(person, marker));
    assert!(!interner.implements(TypeId::STRING, marker));
}

#[test]
fn test_marker_signature_must_match_exactly() {
    let mut interner = TypeInterner::new();
    let marker = marker(&mut interner);
    let t = interner.declare_named("p", "Odd");
    let fields = interner.struct_type(vec![]);
    interner.set_underlying(t, fields);
    let returns_int = interner.signature(vec![], vec![TypeId::INT]);
    interner.add_method(
        t,
        MethodInfo {
            name: "ProtoMessage".to_string(),
            signature: returns_int,
            pointer_receiver: true,
        },
    );
    let ptr = interner.pointer(t);
    assert!(!interner.implements(ptr, marker));
}

#[test]
fn test_interfaces_implement_through_their_own_methods() {
    let mut interner = TypeInterner::new();
    let marker = marker(&mut interner);
    let message = interner.declare_named("proto", "Message");
    interner.set_underlying(message, marker);
    assert!(interner.implements(message, marker));

    match interner.shape(message, marker) {
        StaticShape::Other { implements_marker } => assert!(implements_marker),
        other => panic!("expected Other, got {other:?}"),
    }
}

#[test]
fn test_shape_of_pointer_to_record() {
    let mut interner = TypeInterner::new();
    let marker = marker(&mut interner);
    let person = person(&mut interner);
    let ptr = interner.pointer(person);

    let shape = interner.shape(ptr, marker);
    assert!(shape.implements_marker());
    let record = shape.record().expect("pointer to record");
    assert_eq!(record.name, "Person");
    assert_eq!(record.package, "pb");
    assert_eq!(record.fields().collect::<Vec<_>>(), vec!["Name", "Age"]);
    assert!(record.has_field("Name"));
    assert!(!record.has_field("name"));
    assert!(!record.has_field("GetName"));
}

#[test]
fn test_shape_rejects_other_indirections() {
    let mut interner = TypeInterner::new();
    let marker = marker(&mut interner);
    let person = person(&mut interner);
    let ptr = interner.pointer(person);
    let ptr_ptr = interner.pointer(ptr);
    let anonymous = interner.struct_type(vec![]);
    let ptr_anonymous = interner.pointer(anonymous);

    assert!(interner.shape(person, marker).record().is_none());
    assert!(interner.shape(ptr_ptr, marker).record().is_none());
    assert!(interner.shape(ptr_anonymous, marker).record().is_none());
    assert!(!interner.shape(ptr_ptr, marker).implements_marker());
}

#[test]
fn test_field_lookup_derefs_and_promotes_embedded_fields() {
    let mut interner = TypeInterner::new();
    let inner = interner.declare_named("p", "Inner");
    let inner_fields = interner.struct_type(vec![FieldInfo {
        name: "X".to_string(),
        type_id: TypeId::INT,
        embedded: false,
    }]);
    interner.set_underlying(inner, inner_fields);

    let outer = interner.declare_named("p", "Outer");
    let outer_fields = interner.struct_type(vec![FieldInfo {
        name: "Inner".to_string(),
        type_id: inner,
        embedded: true,
    }]);
    interner.set_underlying(outer, outer_fields);
    let ptr_outer = interner.pointer(outer);

    assert_eq!(interner.field(ptr_outer, "X"), Some(TypeId::INT));
    assert_eq!(interner.field(ptr_outer, "Inner"), Some(inner));
    assert_eq!(interner.field(ptr_outer, "Y"), None);
}

#[test]
fn test_display_spells_go_types() {
    let mut interner = TypeInterner::new();
    let person = person(&mut interner);
    let ptr = interner.pointer(person);
    let slice = interner.slice(ptr);
    let sig = interner.signature(vec![TypeId::INT, slice], vec![TypeId::STRING, TypeId::ERROR]);

    assert_eq!(interner.display(slice), "[]*pb.Person");
    assert_eq!(interner.display(sig), "func(int, []*pb.Person) (string, error)");
    assert_eq!(
        interner.display(interner.underlying(person)),
        "struct{Name string; Age int}"
    );
}
