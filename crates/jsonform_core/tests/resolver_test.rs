use jsonform_core::{
    FieldDescriptor, FieldType, FormData, FormOptions, Schema, SchemaForm, SchemaResolver,
};
use serde_json::json;

fn keys(resolved: &jsonform_core::ResolvedSchema) -> Vec<&str> {
    resolved.keys().collect()
}

#[test]
fn test_explicit_properties_keep_declared_order() {
    let schema: Schema = serde_json::from_value(json!({
        "title": "Order",
        "properties": {
            "zeta": { "title": "Zeta" },
            "alpha": { "title": "Alpha" },
            "mid": {}
        }
    }))
    .unwrap();

    let mut resolver = SchemaResolver::new();
    let resolved = resolver.resolve(&schema, &FormData::from(json!({ "other": 1 })));

    assert_eq!(keys(&resolved), vec!["zeta", "alpha", "mid"]);
    assert_eq!(resolved.title, "Order");
    assert!(!resolved.synthesized);
    assert!(!resolver.is_memoized(schema.id()));
}

#[test]
fn test_synthesizes_one_field_per_data_key() {
    let schema = Schema::new("People");
    let data = FormData::from(json!({ "name": "Ann", "age": 30, "member": true, "tags": [] }));

    let resolved = SchemaResolver::new().resolve(&schema, &data);

    assert_eq!(keys(&resolved), vec!["name", "age", "member", "tags"]);
    assert!(resolved.synthesized);
    let age = resolved.field("age").unwrap();
    assert_eq!(age.key, "age");
    assert_eq!(age.label(), "age");
    assert_eq!(age.field_type, FieldType::Number);
    assert_eq!(resolved.field("name").unwrap().field_type, FieldType::Text);
    assert_eq!(resolved.field("member").unwrap().field_type, FieldType::Boolean);
    assert_eq!(resolved.field("tags").unwrap().field_type, FieldType::Other);
}

#[test]
fn test_non_record_data_synthesizes_nothing() {
    let schema = Schema::default();
    let resolved = SchemaResolver::new().resolve(&schema, &FormData::from(json!("text")));
    assert!(resolved.is_empty());
}

#[test]
fn test_explicit_empty_properties_render_no_fields() {
    let schema = Schema::new("Empty").with_empty_properties();
    let resolved = SchemaResolver::new().resolve(&schema, &FormData::from(json!({ "name": "Ann" })));
    assert!(resolved.is_empty());
    assert!(!resolved.synthesized);
}

#[test]
fn test_resolution_is_memoized_per_schema() {
    let schema = Schema::default();
    let mut resolver = SchemaResolver::new();
    let data = FormData::from(json!({ "name": "Ann", "age": 30 }));

    let first = resolver.resolve(&schema, &data);
    let second = resolver.resolve(&schema, &data);
    assert_eq!(first, second);
    assert!(resolver.is_memoized(schema.id()));

    // Later data does not re-synthesize for the same schema identity.
    let third = resolver.resolve(&schema, &FormData::from(json!({ "email": "a@b.c" })));
    assert_eq!(keys(&third), vec!["name", "age"]);

    // The caller's schema is never written to.
    assert!(!schema.has_properties());
}

#[test]
fn test_forget_allows_new_synthesis() {
    let schema = Schema::default();
    let mut resolver = SchemaResolver::new();
    resolver.resolve(&schema, &FormData::Absent);

    assert!(resolver.forget(schema.id()));
    let resolved = resolver.resolve(&schema, &FormData::from(json!({ "email": "" })));
    assert_eq!(keys(&resolved), vec!["email"]);
}

#[test]
fn test_replaced_schema_leaves_memo() {
    let first = Schema::default();
    let first_id = first.id();
    let mut form = SchemaForm::new(Some(first), Some(json!({ "name": "Ann" })), FormOptions::default());
    assert!(form.resolver().is_memoized(first_id));

    for _ in 0..10 {
        let previous = form.schema().id();
        form.set_schema(Some(Schema::default()));
        assert!(!form.resolver().is_memoized(previous));
        assert!(form.resolver().is_memoized(form.schema().id()));
    }
    assert!(!form.resolver().is_memoized(first_id));

    // Re-applying the same schema keeps its fields.
    let same = form.schema().clone();
    form.set_schema(Some(same));
    assert!(form.resolver().is_memoized(form.schema().id()));
    assert_eq!(form.fields().len(), 1);
}

#[test]
fn test_into_schema_returns_resolved_copy() {
    let schema = Schema::new("Profile").with_required(["name"]);
    let resolved = SchemaResolver::new().resolve(&schema, &FormData::from(json!({ "name": "Ann" })));

    let written = resolved.into_schema();
    assert_eq!(written.id(), schema.id());
    assert_eq!(written.title, "Profile");
    assert!(written.is_required("name"));
    assert_eq!(written.get_field("name"), Some(&FieldDescriptor::synthesized("name", &json!("Ann"))));
    assert!(!schema.has_properties());
}

#[test]
fn test_required_keys_without_fields_are_inert() {
    let schema = Schema::new("")
        .with_required(["email", "ghost"])
        .with_field(FieldDescriptor::new("email"));
    let resolved = SchemaResolver::new().resolve(&schema, &FormData::Absent);

    assert!(resolved.is_required("email"));
    assert!(!resolved.is_required("ghost"));
}

#[test]
fn test_field_type_names() {
    assert_eq!(FieldType::parse("integer"), FieldType::Number);
    assert_eq!(FieldType::parse("String"), FieldType::Text);
    assert_eq!(FieldType::parse("boolean"), FieldType::Boolean);
    assert_eq!(FieldType::parse("bool"), FieldType::Other);
    assert_eq!(FieldType::parse("object"), FieldType::Other);

    let descriptor: FieldDescriptor = serde_json::from_value(json!({ "type": "number" })).unwrap();
    assert_eq!(descriptor.field_type, FieldType::Number);
    let untyped: FieldDescriptor = serde_json::from_value(json!({})).unwrap();
    assert_eq!(untyped.field_type, FieldType::Text);
}
