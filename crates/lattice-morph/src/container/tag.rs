//! Identity keys pairing a transition with its closed-state host.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A value usable as a tag: comparable, hashable and printable.
pub trait TagKey: Any + Send + Sync + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn TagKey) -> bool;
    fn dyn_hash(&self, state: &mut dyn Hasher);
}

impl<K> TagKey for K
where
    K: Any + Eq + Hash + Send + Sync + fmt::Debug,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn TagKey) -> bool {
        other.as_any().downcast_ref::<K>() == Some(self)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<K>().hash(&mut state);
        self.hash(&mut state);
    }
}

/// Identifies which closed-state host a transition expands from.
///
/// Tags of different key types never compare equal, so `Tag::from(7_u64)`
/// and `Tag::from("7")` are distinct.
#[derive(Clone)]
pub struct Tag(Arc<dyn TagKey>);

impl Tag {
    /// Wrap any hashable key.
    ///
    /// String literals are stored as `String`, so `Tag::new("card")` equals
    /// `Tag::from("card")`.
    pub fn new<K>(key: K) -> Self
    where
        K: Any + Eq + Hash + Send + Sync + fmt::Debug,
    {
        if let Some(s) = (&key as &dyn Any).downcast_ref::<&'static str>() {
            return Self(Arc::new((*s).to_owned()));
        }
        Self(Arc::new(key))
    }

    /// The key, if it has type `K`.
    pub fn downcast_ref<K: Any>(&self) -> Option<&K> {
        self.0.as_any().downcast_ref::<K>()
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(other.0.as_ref())
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.dyn_hash(state);
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({:?})", self.0)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl From<&str> for Tag {
    fn from(key: &str) -> Self {
        Self::new(key.to_owned())
    }
}

impl From<String> for Tag {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl From<u64> for Tag {
    fn from(key: u64) -> Self {
        Self::new(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_equality_by_value() {
        assert_eq!(Tag::from("card"), Tag::from(String::from("card")));
        assert_ne!(Tag::from("card"), Tag::from("other"));
        assert_ne!(Tag::from(7_u64), Tag::from("7"));
    }

    #[test]
    fn test_literal_and_owned_keys_match() {
        assert_eq!(Tag::new("card"), Tag::from("card"));
        assert_eq!(Tag::new("card"), Tag::new(String::from("card")));
        assert_eq!(Tag::new("card").downcast_ref::<String>().map(String::as_str), Some("card"));

        let mut map = HashMap::new();
        map.insert(Tag::new("card"), 1);
        assert_eq!(map.get(&Tag::from("card")), Some(&1));
    }

    #[test]
    fn test_hash_map_lookup() {
        let mut map = HashMap::new();
        map.insert(Tag::from("a"), 1);
        map.insert(Tag::from(2_u64), 2);
        assert_eq!(map.get(&Tag::from("a")), Some(&1));
        assert_eq!(map.get(&Tag::from(2_u64)), Some(&2));
        assert_eq!(map.get(&Tag::from("b")), None);
    }

    #[test]
    fn test_custom_key_type() {
        #[derive(Debug, PartialEq, Eq, Hash)]
        struct ItemId(u32);

        let tag = Tag::new(ItemId(3));
        assert_eq!(tag, Tag::new(ItemId(3)));
        assert_eq!(tag.downcast_ref::<ItemId>(), Some(&ItemId(3)));
        assert_eq!(format!("{tag}"), "ItemId(3)");
    }
}
