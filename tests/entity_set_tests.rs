use entityset::{
    Entity, EntityError, EntitySet, KeyMatching, Query, Record, RecordFactory, RecordSchema, Rule,
    SetConfig, Validatable, Value,
};
use serde_json::json;

fn factory() -> RecordFactory {
    RecordFactory::new()
        .register(
            RecordSchema::new("Item")
                .field("name")
                .field_with_default("qty", 1i64)
                .rule("name", Rule::required("name")),
        )
        .register(RecordSchema::new("Note").field("text"))
}

fn items(names: &[&str]) -> EntitySet<Record> {
    let mut set = factory().set("Item").unwrap();
    for name in names {
        set.append(json!({ "name": name })).unwrap();
    }
    set
}

fn names(set: &EntitySet<Record>) -> Vec<Value> {
    set.aggregate("name")
}

#[test]
fn find_returns_matching_members_reindexed() {
    let set = items(&["x", "y", "x"]);
    let a = set[0].clone();
    let c = set[2].clone();

    let found = set.find(&Query::from([("name", "x")]), 0, 0).unwrap();

    assert_eq!(found.count(), 2);
    assert_eq!(found[0], a);
    assert_eq!(found[1], c);
    assert!(found.get(2).is_none());
}

#[test]
fn move_to_front_to_back() {
    let mut set = items(&["A", "B", "C"]);
    set.move_to(0, 2).unwrap();
    assert_eq!(names(&set), vec![Value::from("B"), Value::from("C"), Value::from("A")]);
}

#[test]
fn members_always_have_declared_type() {
    let factory = factory();
    let mut set = factory.set("Item").unwrap();
    let note = factory.create("Note", json!({"text": "hello", "name": "n"})).unwrap();

    set.append(note).unwrap();
    set.prepend(json!({"name": "raw"})).unwrap();
    set.offset_set(None, json!({"name": "tail"})).unwrap();
    set.move_to(0, 1).unwrap();
    set.filter(|member| member.get("name").is_some());

    assert!(set.iter().all(|member| member.type_name() == "Item"));
    assert_eq!(set.count(), 3);
    assert_eq!(set[0].get("name"), Some(&Value::from("n")));
    assert_eq!(set[0].get("text"), Some(&Value::from("hello")));
}

#[test]
fn indices_stay_dense_after_mutations() {
    let mut set = items(&["a", "b", "c", "d", "e"]);

    set.pull(1);
    set.remove(&Query::from([("name", "^d$")])).unwrap();
    set.push(10, json!({"name": "f"})).unwrap();
    set.reduce([0, 2, 3]);

    let count = set.count();
    assert_eq!(count, 3);
    for index in 0..count {
        assert!(set.contains_index(index));
    }
    assert!(!set.contains_index(count));
    assert_eq!(names(&set), vec![Value::from("a"), Value::from("e"), Value::from("f")]);
}

#[test]
fn push_and_pull_are_inverse() {
    let mut set = items(&["a", "b"]);
    let item = factory().create("Item", json!({"name": "new", "qty": 4})).unwrap();

    set.push(1, item.clone()).unwrap();
    let pulled = set.pull(1).unwrap();

    assert_eq!(pulled.to_array(None).unwrap(), item.to_array(None).unwrap());
    assert_eq!(set.count(), 2);
}

#[test]
fn filter_is_idempotent() {
    let mut once = items(&["apple", "kiwi", "avocado", "fig"]);
    let mut twice = once.clone();
    let starts_with_a =
        |member: &Record| matches!(member.get("name"), Some(Value::Text(name)) if name.starts_with('a'));

    once.filter(starts_with_a);
    twice.filter(starts_with_a).filter(starts_with_a);

    assert_eq!(once.to_array(None).unwrap(), twice.to_array(None).unwrap());
    assert_eq!(once.count(), 2);
}

#[test]
fn find_keys_repeats_index_for_each_matched_field() {
    let set = items(&["alpha", "beta"]);
    let query = Query::new().field("name", "^al").field("qty", "1");

    assert_eq!(set.find_keys(&query, 0, 0).unwrap(), vec![0, 0]);
    assert_eq!(set.find_key(&query).unwrap(), Some(0));
    assert!(set.find_one(&Query::from([("name", "gamma")])).unwrap().is_none());
}

#[test]
fn per_member_key_matching_collapses_duplicates() {
    let config = SetConfig::new().key_matching(KeyMatching::PerMember);
    let mut set = factory().set_with_config("Item", config).unwrap();
    set.fill(vec![json!({"name": "alpha"}), json!({"name": "beta"})], None)
        .unwrap();

    let query = Query::new().field("name", "a").field("qty", "1");
    assert_eq!(set.find_keys(&query, 0, 0).unwrap(), vec![0, 1]);
}

#[test]
fn case_insensitive_queries() {
    let config = SetConfig::new().case_insensitive(true);
    let mut set = factory().set_with_config("Item", config).unwrap();
    set.append(json!({"name": "Widget"})).unwrap();

    assert_eq!(set.find_key(&Query::from([("name", "^widget$")])).unwrap(), Some(0));
}

#[test]
fn must_represent_reports_both_types() {
    let set = items(&[]);
    let err = set.must_represent("Note").unwrap_err();
    assert!(matches!(err, EntityError::TypeMismatch { .. }));
    assert_eq!(
        err.to_string(),
        "Type mismatch: set represents 'Item', got 'Note'"
    );
}

#[test]
fn validate_collects_member_messages_in_order() {
    let mut set = items(&["ok"]);
    set.append(json!({"qty": 0})).unwrap();
    set.append(json!({"name": ""})).unwrap();
    set.add_validator("qty", Rule::range("qty", Some(1.0), None));

    assert_eq!(
        set.validate(),
        vec!["name is required", "qty must be at least 1", "name is required"]
    );
}

#[test]
fn walk_and_first_last() {
    let set = items(&["a", "b", "c"]);
    let mut total = 0;
    set.walk(|member| total += member.get("qty").and_then(Value::as_i64).unwrap_or(0));

    assert_eq!(total, 3);
    assert_eq!(set.first().and_then(|m| m.get("name")), Some(&Value::from("a")));
    assert_eq!(set.last().and_then(|m| m.get("name")), Some(&Value::from("c")));
}

#[test]
fn default_mapper_applies_to_fill_and_export() {
    let factory = RecordFactory::new().register(
        RecordSchema::new("Item")
            .field("name")
            .mapper(entityset::Mapper::new("api").rename("label", "name")),
    );
    let mut set = factory
        .set_with_config("Item", SetConfig::new().default_mapper("api"))
        .unwrap();

    set.fill(vec![json!({"label": "x"})], None).unwrap();

    assert_eq!(set[0].get("name"), Some(&Value::from("x")));
    assert_eq!(
        set.to_array(None).unwrap()[0].to_json(),
        json!({"label": "x"})
    );
}
