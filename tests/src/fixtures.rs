//! The Person / Pet / Location / TaggedItem models most tests run against.

use backref::{
    schema::app::{FieldId, ModelId, Schema},
    stmt::{Record, Type, Value},
    Db,
};

/// Ids of the mock models, valid for the schema returned by
/// [`Mock::schema`].
#[derive(Debug, Clone, Copy)]
pub struct Mock {
    pub person: ModelId,
    pub pet: ModelId,
    pub location: ModelId,
    pub tagged_item: ModelId,
}

impl Mock {
    pub fn schema() -> (Mock, Schema) {
        let mut builder = Schema::builder();

        let person = builder
            .model("tests", "MockPerson")
            .primitive("first_name", Type::String)
            .primitive("last_name", Type::String)
            .id();

        let pet = builder
            .model("tests", "MockPet")
            .primitive("name", Type::String)
            .belongs_to("owner", person)
            .related_name("pets")
            .id();

        let location = builder
            .model("tests", "MockPersonLocation")
            .primitive("address", Type::String)
            .belongs_to("owner", person)
            .related_name("owned_locations")
            .id();

        let tagged_item = builder
            .model("tests", "MockTaggedItem")
            .primitive("tag", Type::String)
            .primitive("content_type", Type::I64)
            .primitive("object_id", Type::I64)
            .generic_foreign_key("content_object", "content_type", "object_id")
            .id();

        let mock = Mock {
            person,
            pet,
            location,
            tagged_item,
        };

        (mock, builder.build().unwrap())
    }

    /// `MockPerson::pets`
    pub fn person_pets(&self) -> FieldId {
        self.person.field(3)
    }

    /// `MockPerson::owned_locations`
    pub fn person_owned_locations(&self) -> FieldId {
        self.person.field(4)
    }

    /// `MockPet::owner`
    pub fn pet_owner(&self) -> FieldId {
        self.pet.field(2)
    }

    /// `MockPersonLocation::owner`
    pub fn location_owner(&self) -> FieldId {
        self.location.field(2)
    }

    /// `MockTaggedItem::content_type`
    pub fn tagged_item_content_type(&self) -> FieldId {
        self.tagged_item.field(2)
    }

    /// `MockTaggedItem::object_id`
    pub fn tagged_item_object_id(&self) -> FieldId {
        self.tagged_item.field(3)
    }

    /// `MockTaggedItem::content_object`
    pub fn tagged_item_content_object(&self) -> FieldId {
        self.tagged_item.field(4)
    }

    pub fn create_person(&self, db: &Db, first_name: &str, last_name: &str) -> Record {
        db.insert(
            self.person,
            [("first_name", first_name), ("last_name", last_name)],
        )
        .unwrap()
    }

    pub fn create_pet(&self, db: &Db, name: &str, owner: &Record) -> Record {
        db.insert(
            self.pet,
            [("name", Value::from(name)), ("owner", pk(owner).clone())],
        )
        .unwrap()
    }

    pub fn create_location(&self, db: &Db, address: &str, owner: &Record) -> Record {
        db.insert(
            self.location,
            [("address", Value::from(address)), ("owner", pk(owner).clone())],
        )
        .unwrap()
    }

    /// Tags `object` through the `content_object` generic foreign key.
    pub fn tag(&self, db: &Db, tag: &str, object: &Record) -> Record {
        let content_type = db.content_types().get_for_model(object.model).unwrap();

        db.insert(
            self.tagged_item,
            [
                ("tag", Value::from(tag)),
                ("content_type", content_type.clone()),
                ("object_id", pk(object).clone()),
            ],
        )
        .unwrap()
    }
}

/// The primary key of `record`; every mock model keeps it at index 0.
pub fn pk(record: &Record) -> &Value {
    &record[0]
}
