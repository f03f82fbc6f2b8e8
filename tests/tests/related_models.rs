use pretty_assertions::assert_eq;
use tests::prelude::*;

#[test]
fn unrestricted_considers_every_model() {
    let mut test = DbTest::new();
    let (_, schema) = Mock::schema();
    let db = test.setup_db(schema);

    let related_models = db.related_models();
    for model in db.schema().models(true) {
        assert!(related_models.should_consider(model), "{}", model.label());
    }
}

#[test]
fn exclusion_dominates_inclusion() {
    let mut test = DbTest::new();
    let (mock, schema) = Mock::schema();
    let db = test.setup_db(schema);

    let related_models = db.related_models().include([mock.pet]).exclude([mock.pet]);
    assert!(!related_models.should_consider(mock.pet));

    let related_models = db
        .related_models()
        .include_apps(["tests"])
        .exclude([mock.pet]);
    assert!(!related_models.should_consider(mock.pet));
    assert!(related_models.should_consider(mock.location));

    let related_models = db
        .related_models()
        .include([mock.pet])
        .exclude_apps(["tests"]);
    assert!(!related_models.should_consider(mock.pet));

    let related_models = db
        .related_models()
        .include_apps(["tests"])
        .exclude_apps(["tests"]);
    for model in db.schema().models(true) {
        assert!(!related_models.should_consider(model));
    }
}

#[test]
fn include_restricts_considered_models() {
    let mut test = DbTest::new();
    let (mock, schema) = Mock::schema();
    let db = test.setup_db(schema);

    let related_models = db.related_models().include([mock.pet]);
    assert!(related_models.should_consider(mock.pet));
    assert!(!related_models.should_consider(mock.location));
    assert!(!related_models.should_consider(mock.tagged_item));

    // Models of an included app are considered alongside included models
    let related_models = db
        .related_models()
        .include([mock.pet])
        .include_apps(["other"]);
    assert!(related_models.should_consider(mock.pet));
    assert!(!related_models.should_consider(mock.location));

    // An exclude list alone leaves everything else considered
    let related_models = db.related_models().exclude([mock.pet]);
    assert!(!related_models.should_consider(mock.pet));
    assert!(related_models.should_consider(mock.location));
}

#[test]
fn referring_models() {
    let mut test = DbTest::new();
    let (mock, schema) = Mock::schema();
    let db = test.setup_db(schema);

    let person = mock.create_person(&db, "Ada", "Lovelace");
    mock.tag(&db, "mathematician", &person);

    let mut related_models = db.related_models();
    let referring = assert_ok!(related_models.get_referring_models(mock.person));

    assert_eq!(
        referring.into_iter().collect::<Vec<_>>(),
        [
            (mock.pet, vec![mock.pet_owner()]),
            (mock.location, vec![mock.location_owner()]),
            (mock.tagged_item, vec![mock.tagged_item_content_object()]),
        ]
    );

    let mut related_models = db.related_models().exclude([mock.location]);
    let referring = assert_ok!(related_models.get_referring_models(mock.person));
    assert_eq!(
        referring.keys().copied().collect::<Vec<_>>(),
        [mock.pet, mock.tagged_item]
    );
}

#[test]
fn related_fields_skip_reverse_accessors() {
    let mut test = DbTest::new();
    let (mock, schema) = Mock::schema();
    let db = test.setup_db(schema);

    let mut related_models = db.related_models();

    // `MockPerson::pets` and `MockPerson::owned_locations` point at pets and
    // locations but are computed from the other side.
    assert_empty!(assert_ok!(
        related_models.get_related_fields(mock.pet, mock.person)
    ));
    assert_empty!(assert_ok!(
        related_models.get_related_fields(mock.location, mock.person)
    ));

    assert_eq!(
        assert_ok!(related_models.get_related_fields(mock.person, mock.pet)),
        [mock.pet_owner()]
    );

    let pets = db.schema().field(mock.person_pets());
    assert!(!related_models.should_include_field(pets, mock.pet));

    let owner = db.schema().field(mock.pet_owner());
    assert!(related_models.should_include_field(owner, mock.person));
    assert!(!related_models.should_include_field(owner, mock.location));
}

#[test]
fn generic_foreign_keys_always_pass_the_field_check() {
    let mut test = DbTest::new();
    let (mock, schema) = Mock::schema();
    let db = test.setup_db(schema);

    let related_models = db.related_models();
    let content_object = db.schema().field(mock.tagged_item_content_object());

    assert!(related_models.should_include_field(content_object, mock.person));
    assert!(related_models.should_include_field(content_object, mock.pet));

    // Checking fields reads nothing
    assert!(test.log().is_empty());
}

#[test]
fn untagged_generic_foreign_key_is_cached() {
    let mut test = DbTest::new();
    let (mock, schema) = Mock::schema();
    let db = test.setup_db(schema);

    let mut related_models = db.related_models();
    let content_object = db.schema().field(mock.tagged_item_content_object());

    assert_none!(related_models.cached_content_types(content_object));

    for model in [mock.person, mock.pet, mock.location, mock.tagged_item] {
        assert!(!assert_ok!(
            related_models.has_generic_foreign_key_to_model(content_object, model)
        ));
        assert!(!assert_ok!(
            related_models.should_include_virtual_field(content_object, model)
        ));
    }

    assert_eq!(test.log().distinct_count(), 1);
    assert_empty!(related_models.cached_content_types(content_object).unwrap());
}

#[test]
fn cached_content_types_are_not_refreshed() {
    let mut test = DbTest::new();
    let (mock, schema) = Mock::schema();
    let db = test.setup_db(schema);

    let person = mock.create_person(&db, "Ada", "Lovelace");
    let content_object = db.schema().field(mock.tagged_item_content_object());

    let mut related_models = db.related_models();
    assert!(!assert_ok!(
        related_models.has_generic_foreign_key_to_model(content_object, mock.person)
    ));

    mock.tag(&db, "mathematician", &person);

    assert!(!assert_ok!(
        related_models.has_generic_foreign_key_to_model(content_object, mock.person)
    ));

    let mut related_models = db.related_models();
    assert!(assert_ok!(
        related_models.has_generic_foreign_key_to_model(content_object, mock.person)
    ));
    assert_eq!(test.log().distinct_count(), 2);
}

#[test]
fn cache_is_shared_across_lookups() {
    let mut test = DbTest::new();
    let (mock, schema) = Mock::schema();
    let db = test.setup_db(schema);

    let ada = mock.create_person(&db, "Ada", "Lovelace");
    let alan = mock.create_person(&db, "Alan", "Turing");
    mock.tag(&db, "mathematician", &ada);
    mock.tag(&db, "cryptographer", &alan);

    let mut related_models = db.related_models();

    for person in [&ada, &alan] {
        let related = assert_ok!(backref::get_related_objects_with(
            &mut related_models,
            person,
            &Filter::new()
        ));
        assert_eq!(related[&mock.tagged_item_content_object()].len(), 1);
    }

    assert_eq!(test.log().distinct_count(), 1);

    let cached = related_models.cached_content_types(mock.tagged_item_content_object());
    assert_eq!(
        cached.unwrap().iter().cloned().collect::<Vec<_>>(),
        [db.content_types().get_for_model(mock.person).unwrap().clone()]
    );
}

#[test]
fn model_without_virtual_fields_contributes_no_generic_foreign_keys() {
    let mut test = DbTest::new();

    let mut builder = Schema::builder();
    let person = builder
        .model("tests", "MockPerson")
        .primitive("first_name", Type::String)
        .id();
    let tagged_item = builder
        .model("tests", "MockTaggedItem")
        .primitive("tag", Type::String)
        .primitive("content_type", Type::I64)
        .primitive("object_id", Type::I64)
        .generic_foreign_key("content_object", "content_type", "object_id")
        .without_virtual_fields()
        .id();
    let db = test.setup_db(builder.build().unwrap());

    let ada = db.insert(person, [("first_name", "Ada")]).unwrap();
    let content_type = db.content_types().get_for_model(person).unwrap().clone();
    db.insert(
        tagged_item,
        [
            ("tag", Value::from("mathematician")),
            ("content_type", content_type),
            ("object_id", ada[0].clone()),
        ],
    )
    .unwrap();

    let mut related_models = db.related_models();
    assert_empty!(assert_ok!(
        related_models.get_related_fields(person, tagged_item)
    ));
    assert_empty!(assert_ok!(db.related_objects(&ada, &Filter::new())));
    assert_eq!(test.log().distinct_count(), 0);
}

#[test]
fn model_without_content_type_is_never_referenced_generically() {
    let mut test = DbTest::new();
    let (mock, schema) = Mock::schema();

    let mut builder = Db::builder();
    builder.without_content_type(mock.person);
    let db = assert_ok!(test.try_setup_db(builder, schema));

    let person = mock.create_person(&db, "Ada", "Lovelace");
    db.insert(
        mock.tagged_item,
        [
            ("tag", Value::from("mathematician")),
            ("content_type", Value::I64(1)),
            ("object_id", person[0].clone()),
        ],
    )
    .unwrap();

    let mut related_models = db.related_models();
    let content_object = db.schema().field(mock.tagged_item_content_object());
    assert!(!assert_ok!(
        related_models.has_generic_foreign_key_to_model(content_object, mock.person)
    ));

    let model_map = db
        .model_map(mock.person, mock.tagged_item_content_object())
        .unwrap();
    assert_empty!(assert_ok!(
        model_map.get_related_objects(&person, &Filter::new())
    ));
    assert_eq!(test.log().filter_count(), 0);
}

#[test]
fn custom_content_type() {
    let mut test = DbTest::new();
    let (mock, schema) = Mock::schema();

    let mut builder = Db::builder();
    builder.content_type(mock.person, 100_i64);
    let db = assert_ok!(test.try_setup_db(builder, schema));

    let person = mock.create_person(&db, "Ada", "Lovelace");
    let tag = mock.tag(&db, "mathematician", &person);
    assert_eq!(tag[mock.tagged_item_content_type()], Value::I64(100));

    let related = assert_ok!(db.related_objects(&person, &Filter::new()));
    assert_eq!(related[&mock.tagged_item_content_object()], [tag]);
}

#[test]
fn duplicate_content_type_is_rejected() {
    let mut test = DbTest::new();
    let (mock, schema) = Mock::schema();

    // The person model already defaults to 1
    let mut builder = Db::builder();
    builder.content_type(mock.pet, 1_i64);

    let err = assert_err!(test.try_setup_db(builder, schema));
    assert!(err.is_invalid_schema());
}

#[test]
fn duplicate_content_type_of_another_integer_width_is_rejected() {
    let mut test = DbTest::new();
    let (mock, schema) = Mock::schema();

    let mut builder = Db::builder();
    builder.content_type(mock.person, 7_i64).content_type(mock.pet, 7_i32);

    let err = assert_err!(test.try_setup_db(builder, schema));
    assert!(err.is_invalid_schema());
}

#[test]
fn swapped_content_types_are_accepted() {
    let mut test = DbTest::new();
    let (mock, schema) = Mock::schema();

    let mut builder = Db::builder();
    builder
        .content_type(mock.person, 2_i64)
        .content_type(mock.pet, 1_i64);
    let db = assert_ok!(test.try_setup_db(builder, schema));

    assert_eq!(db.content_types().get_model(&Value::I64(2)), Some(mock.person));
    assert_eq!(db.content_types().get_model(&Value::I64(1)), Some(mock.pet));
}

#[test]
fn model_outside_the_schema_matches_no_app() {
    let mut test = DbTest::new();
    let (mock, schema) = Mock::schema();
    let db = test.setup_db(schema);

    let unknown = ModelId(99);

    let related_models = db.related_models().exclude_apps(["tests"]);
    assert!(related_models.should_consider(unknown));
    assert!(!related_models.should_consider(mock.pet));

    let related_models = db.related_models().include_apps(["tests"]);
    assert!(!related_models.should_consider(unknown));

    let related_models = db.related_models().include([unknown]);
    assert!(related_models.should_consider(unknown));
}
