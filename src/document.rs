//! Reading parsed response documents when an object repeats a key.
//!
//! `sonic_rs::Value` keeps every member it parsed, so `{"a":1,"a":2}` holds
//! two `a` entries and `get` answers with the first. The probe reads such
//! documents with the last occurrence winning, and prints each key once, at
//! the position where it first appeared.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use sonic_rs::{JsonContainerTrait, Object, Value};

/// Last member named `key`, or `None` when `value` is not an object or has no
/// such member.
pub fn last_member<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value
        .as_object()?
        .iter()
        .filter(|(name, _)| *name == key)
        .last()
        .map(|(_, member)| member)
}

fn unique_members(object: &Object) -> Vec<(&str, &Value)> {
    let mut members: Vec<(&str, &Value)> = Vec::with_capacity(object.len());
    let mut slots: HashMap<&str, usize> = HashMap::with_capacity(object.len());
    for (name, member) in object.iter() {
        match slots.get(name) {
            Some(&slot) => members[slot].1 = member,
            None => {
                slots.insert(name, members.len());
                members.push((name, member));
            }
        }
    }
    members
}

/// Serializes a document with repeated keys collapsed, at any depth.
#[derive(Clone, Copy, Debug)]
pub struct LastWins<'a>(pub &'a Value);

impl Serialize for LastWins<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(object) = self.0.as_object() {
            let members = unique_members(object);
            let mut map = serializer.serialize_map(Some(members.len()))?;
            for (name, member) in members {
                map.serialize_entry(name, &LastWins(member))?;
            }
            map.end()
        } else if let Some(array) = self.0.as_array() {
            let mut seq = serializer.serialize_seq(Some(array.len()))?;
            for item in array.iter() {
                seq.serialize_element(&LastWins(item))?;
            }
            seq.end()
        } else {
            self.0.serialize(serializer)
        }
    }
}
