//! `serde` support for [`Node`].
//!
//! A node is written as a struct with the fields `name`, `value`,
//! `attributes` and `children`. The last three are omitted when unset or
//! empty.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde_core::de::{self, MapAccess, Visitor};
use serde_core::ser::SerializeStruct;
use serde_core::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Node;

const NODE: &str = "Node";
const FIELDS: &[&str] = &["name", "value", "attributes", "children"];

// -----------------------------------------------------------------------------
// Serialize

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let attributes = self.attribute_map();
        let len = 1
            + usize::from(self.value().is_some())
            + usize::from(!attributes.is_empty())
            + usize::from(self.has_children());

        let mut state = serializer.serialize_struct(NODE, len)?;
        state.serialize_field("name", self.name())?;

        if self.value().is_some() {
            state.serialize_field("value", &self.value())?;
        } else {
            state.skip_field("value")?;
        }
        if attributes.is_empty() {
            state.skip_field("attributes")?;
        } else {
            state.serialize_field("attributes", attributes)?;
        }
        if self.has_children() {
            state.serialize_field("children", self.children())?;
        } else {
            state.skip_field("children")?;
        }

        state.end()
    }
}

// -----------------------------------------------------------------------------
// Deserialize

enum Field {
    Name,
    Value,
    Attributes,
    Children,
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = Field;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("`name`, `value`, `attributes` or `children`")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                match value {
                    "name" => Ok(Field::Name),
                    "value" => Ok(Field::Value),
                    "attributes" => Ok(Field::Attributes),
                    "children" => Ok(Field::Children),
                    _ => Err(de::Error::unknown_field(value, FIELDS)),
                }
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a document node")
    }

    fn visit_map<V: MapAccess<'de>>(self, mut map: V) -> Result<Self::Value, V::Error> {
        let mut name: Option<String> = None;
        let mut value: Option<String> = None;
        let mut attributes: Option<BTreeMap<String, String>> = None;
        let mut children: Option<Vec<Node>> = None;

        while let Some(key) = map.next_key::<Field>()? {
            match key {
                Field::Name => {
                    if name.is_some() {
                        return Err(de::Error::duplicate_field("name"));
                    }
                    name = Some(map.next_value()?);
                }
                Field::Value => {
                    if value.is_some() {
                        return Err(de::Error::duplicate_field("value"));
                    }
                    value = map.next_value()?;
                }
                Field::Attributes => {
                    if attributes.is_some() {
                        return Err(de::Error::duplicate_field("attributes"));
                    }
                    attributes = Some(map.next_value()?);
                }
                Field::Children => {
                    if children.is_some() {
                        return Err(de::Error::duplicate_field("children"));
                    }
                    children = Some(map.next_value()?);
                }
            }
        }

        let name = name.ok_or_else(|| de::Error::missing_field("name"))?;
        Node::from_parts(
            name,
            value,
            attributes.unwrap_or_default(),
            children.unwrap_or_default(),
        )
        .map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_struct(NODE, FIELDS, NodeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::Node;
    use std::string::{String, ToString};

    fn sample() -> Node {
        let mut root = Node::new("shape");
        root.set_attribute("ty", "demo::Shape");
        root.push_child(Node::leaf("name", "box"));
        let points = root.append("points");
        points.push_child(Node::leaf("point", "1,2"));
        points.push_child(Node::leaf("point", "3,4"));
        root.append("empty");
        root
    }

    #[test]
    fn json_shape_omits_unset_fields() {
        let json = serde_json::to_value(Node::leaf("five", "5")).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "five", "value": "5" }));

        let json = serde_json::to_value(Node::new("w")).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "w" }));
    }

    #[test]
    fn json_round_trip() {
        let node = sample();
        let text = serde_json::to_string(&node).unwrap();
        let back: Node = serde_json::from_str(&text).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn ron_round_trip() {
        let node = sample();
        let text: String = ron::to_string(&node).unwrap();
        let back: Node = ron::from_str(&text).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn rejects_bad_input() {
        let err = serde_json::from_str::<Node>(r#"{ "value": "1" }"#).unwrap_err();
        assert!(err.to_string().contains("missing field `name`"));

        let err = serde_json::from_str::<Node>(r#"{ "name": "" }"#).unwrap_err();
        assert!(err.to_string().contains("node name must not be empty"));

        let err = serde_json::from_str::<Node>(r#"{ "name": "a", "extra": 1 }"#).unwrap_err();
        assert!(err.to_string().contains("unknown field `extra`"));
    }

    #[test]
    fn nested_struct_field() {
        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Envelope {
            version: u32,
            body: Node,
        }

        let envelope = Envelope {
            version: 1,
            body: sample(),
        };
        let text = serde_json::to_string(&envelope).unwrap();
        let back: Envelope = serde_json::from_str(&text).unwrap();
        assert_eq!(back, envelope);
    }
}
