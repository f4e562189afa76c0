use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TagId = Uuid;

/// A tag attached to a contact record. Membership only; the store owns tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

impl Tag {
    pub fn new(id: TagId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_new() {
        let tag = Tag::new(Uuid::from_u128(7), "donor");
        assert_eq!(tag.name, "donor");
        assert_eq!(tag.id, Uuid::from_u128(7));
    }
}
