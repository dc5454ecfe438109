use std::fmt;

use mongodb::bson::{self, oid::ObjectId, Document};
use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// A book as stored in the `books` collection.
///
/// `id` is supplied by the caller and is not the storage `_id`; the storage
/// identifier is ignored when documents are read back. Missing or `null`
/// fields read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
}

impl<'de> Deserialize<'de> for Book {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = deserializer.deserialize_map(FieldsVisitor)?;
        Ok(Book {
            id: fields.id.unwrap_or_default(),
            title: fields.title.unwrap_or_default(),
            author: fields.author.unwrap_or_default(),
        })
    }
}

/// Body of `PUT /books/{id}`. Only the fields present are written; `null`
/// counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl<'de> Deserialize<'de> for BookUpdate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = deserializer.deserialize_map(FieldsVisitor)?;
        Ok(BookUpdate {
            id: fields.id,
            title: fields.title,
            author: fields.author,
        })
    }
}

// Only objects are accepted; the derived impl would also take `[id, title, author]`.
#[derive(Default)]
struct Fields {
    id: Option<String>,
    title: Option<String>,
    author: Option<String>,
}

struct FieldsVisitor;

impl<'de> Visitor<'de> for FieldsVisitor {
    type Value = Fields;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a book object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Fields, A::Error> {
        let mut fields = Fields::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "id" => fields.id = map.next_value()?,
                "title" => fields.title = map.next_value()?,
                "author" => fields.author = map.next_value()?,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(fields)
    }
}

impl BookUpdate {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.title.is_none() && self.author.is_none()
    }

    /// Applies the present fields onto `book`.
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(id) = &self.id {
            book.id = id.clone();
        }
        if let Some(title) = &self.title {
            book.title = title.clone();
        }
        if let Some(author) = &self.author {
            book.author = author.clone();
        }
    }

    /// The document handed to `$set`.
    pub fn to_set_document(&self) -> Result<Document, bson::ser::Error> {
        bson::to_document(self)
    }
}

/// Acknowledgment returned by `POST /books`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertAck {
    #[serde(rename = "InsertedID")]
    pub inserted_id: String,
}

impl From<ObjectId> for InsertAck {
    fn from(oid: ObjectId) -> Self {
        InsertAck {
            inserted_id: oid.to_hex(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn missing_fields_default_to_empty() {
        let book: Book = serde_json::from_str(r#"{"title": "Dune"}"#).unwrap();
        assert_eq!(
            book,
            Book {
                id: String::new(),
                title: "Dune".into(),
                author: String::new(),
            }
        );
    }

    #[test]
    fn null_fields_read_as_empty() {
        let book: Book =
            serde_json::from_str(r#"{"id": "b1", "title": null, "author": "A"}"#).unwrap();
        assert_eq!(book.title, "");
        assert_eq!(book.author, "A");

        let update: BookUpdate = serde_json::from_str(r#"{"title": null}"#).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn arrays_are_not_books() {
        assert!(serde_json::from_str::<Book>(r#"["b2", "Dune", "Herbert"]"#).is_err());
        assert!(serde_json::from_str::<BookUpdate>(r#"["b2"]"#).is_err());
        assert!(serde_json::from_str::<Book>(r#""b2""#).is_err());
    }

    #[test]
    fn insert_ack_uses_driver_key() {
        let oid = ObjectId::new();
        assert_eq!(
            serde_json::to_value(InsertAck::from(oid)).unwrap(),
            serde_json::json!({ "InsertedID": oid.to_hex() })
        );
    }

    #[test]
    fn storage_id_is_ignored_on_read() {
        let stored = doc! {
            "_id": ObjectId::new(),
            "id": "b1",
            "title": "Dune",
            "author": "Herbert",
        };
        let book: Book = bson::from_document(stored).unwrap();
        assert_eq!(book.id, "b1");
        assert_eq!(book.author, "Herbert");
    }

    #[test]
    fn set_document_holds_only_present_fields() {
        let update = BookUpdate {
            title: Some("New".into()),
            ..Default::default()
        };
        assert_eq!(update.to_set_document().unwrap(), doc! { "title": "New" });
        assert!(!update.is_empty());
        assert!(BookUpdate::default().is_empty());
    }

    #[test]
    fn apply_leaves_absent_fields_untouched() {
        let mut book = Book {
            id: "b1".into(),
            title: "Old".into(),
            author: "Someone".into(),
        };
        BookUpdate {
            title: Some("New".into()),
            ..Default::default()
        }
        .apply_to(&mut book);
        assert_eq!(book.title, "New");
        assert_eq!(book.author, "Someone");
        assert_eq!(book.id, "b1");
    }
}
