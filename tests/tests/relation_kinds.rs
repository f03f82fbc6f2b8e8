use pretty_assertions::assert_eq;
use tests::prelude::*;

#[test]
fn many_to_many_is_found_through_its_through_model() {
    let mut test = DbTest::new();

    let mut builder = Schema::builder();
    let person = builder
        .model("tests", "MockPerson")
        .primitive("first_name", Type::String)
        .id();
    let group = builder
        .model("tests", "MockGroup")
        .primitive("name", Type::String)
        .many_to_many("members", person)
        .belongs_to("leader", person)
        .related_name("led_groups")
        .id();
    let db = test.setup_db(builder.build().unwrap());

    let through = db
        .schema()
        .models(true)
        .find(|model| model.auto_created)
        .unwrap();
    assert_eq!(through.label(), "tests.MockGroupMembers");

    let mut related_models = db.related_models();

    // `members` targets people but is multi-valued
    assert_eq!(
        assert_ok!(related_models.get_related_fields(person, group)),
        [group.field(3)]
    );
    assert!(!related_models.should_include_field(db.schema().field(group.field(2)), person));

    // `led_groups` is a reverse accessor
    assert_empty!(assert_ok!(related_models.get_related_fields(group, person)));

    let referring = assert_ok!(related_models.get_referring_models(person));
    assert_eq!(
        referring.into_iter().collect::<Vec<_>>(),
        [
            (group, vec![group.field(3)]),
            (through.id, vec![through.id.field(2)]),
        ]
    );

    let ada = db.insert(person, [("first_name", "Ada")]).unwrap();
    let alan = db.insert(person, [("first_name", "Alan")]).unwrap();
    let analysts = db
        .insert(
            group,
            [("name", Value::from("Analysts")), ("leader", alan[0].clone())],
        )
        .unwrap();
    let membership = db
        .insert(
            through.id,
            [
                ("mock_group", analysts[0].clone()),
                ("mock_person", ada[0].clone()),
            ],
        )
        .unwrap();

    let related = assert_ok!(db.related_objects(&ada, &Filter::new()));
    assert_eq!(
        related.into_iter().collect::<Vec<_>>(),
        [(through.id.field(2), vec![membership])]
    );

    let related = assert_ok!(db.related_objects(&alan, &Filter::new()));
    assert_eq!(
        related.into_iter().collect::<Vec<_>>(),
        [(group.field(3), vec![analysts])]
    );
}

#[test]
fn self_referential_many_to_many() {
    let mut test = DbTest::new();

    let mut builder = Schema::builder();
    let person = builder
        .model("tests", "MockPerson")
        .primitive("first_name", Type::String)
        // The first declared model receives id 0
        .many_to_many("friends", ModelId(0))
        .id();
    let db = test.setup_db(builder.build().unwrap());

    let through = db
        .schema()
        .models(true)
        .find(|model| model.auto_created)
        .unwrap();
    let names: Vec<_> = through
        .fields
        .iter()
        .map(|field| field.name.app_name.as_str())
        .collect();
    assert_eq!(names, ["id", "from_mock_person", "to_mock_person"]);

    let mut related_models = db.related_models();
    assert_eq!(
        assert_ok!(related_models.get_related_fields(person, through)),
        [through.id.field(1), through.id.field(2)]
    );
    assert_empty!(assert_ok!(related_models.get_related_fields(person, person)));
}

#[test]
fn one_to_one_resolves_like_a_foreign_key() {
    let mut test = DbTest::new();

    let mut builder = Schema::builder();
    let person = builder
        .model("tests", "MockPerson")
        .primitive("first_name", Type::String)
        .id();
    let passport = builder
        .model("tests", "MockPassport")
        .primitive("number", Type::String)
        .one_to_one("holder", person)
        .id();
    let db = test.setup_db(builder.build().unwrap());

    let reverse = db.schema().model(person).field_by_name("mock_passport").unwrap();
    assert!(reverse.ty.as_has_one().is_some());

    let ada = db.insert(person, [("first_name", "Ada")]).unwrap();
    let document = db
        .insert(
            passport,
            [("number", Value::from("X123")), ("holder", ada[0].clone())],
        )
        .unwrap();

    let related = assert_ok!(db.related_objects(&ada, &Filter::new()));
    assert_eq!(
        related.into_iter().collect::<Vec<_>>(),
        [(passport.field(2), vec![document])]
    );
}

#[test]
fn include_apps_restricts_scanned_groups() {
    let mut test = DbTest::new();

    let mut builder = Schema::builder();
    let person = builder
        .model("people", "Person")
        .primitive("name", Type::String)
        .id();
    let pet = builder
        .model("people", "Pet")
        .belongs_to("owner", person)
        .related_name("pets")
        .id();
    let invoice = builder
        .model("billing", "Invoice")
        .primitive("total", Type::I64)
        .belongs_to("customer", person)
        .id();
    let db = test.setup_db(builder.build().unwrap());

    let ada = db.insert(person, [("name", "Ada")]).unwrap();
    let rex = db.insert(pet, [("owner", ada[0].clone())]).unwrap();
    let bill = db
        .insert(
            invoice,
            [("total", Value::I64(42)), ("customer", ada[0].clone())],
        )
        .unwrap();

    let mut related_models = db.related_models().include_apps(["billing"]);
    let related = assert_ok!(backref::get_related_objects_with(
        &mut related_models,
        &ada,
        &Filter::new()
    ));
    assert_eq!(
        related.into_iter().collect::<Vec<_>>(),
        [(invoice.field(2), vec![bill])]
    );

    let mut related_models = db.related_models().exclude_apps(["billing"]);
    let related = assert_ok!(backref::get_related_objects_with(
        &mut related_models,
        &ada,
        &Filter::new()
    ));
    assert_eq!(
        related.into_iter().collect::<Vec<_>>(),
        [(pet.field(1), vec![rex])]
    );

    // Default reverse accessor name
    assert!(db.schema().model(person).field_by_name("invoice_set").is_some());
}
