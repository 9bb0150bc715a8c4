//! Repository data models
//!
//! Content items as the OData service returns them. Every field except
//! `Path` may be missing, either because it was not projected or because
//! the item simply has no value.

use serde::Deserialize;

/// OData collection envelope: `{"d": {"__count": n, "results": [...]}}`
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionResponse<T> {
    pub d: CollectionData<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionData<T> {
    #[serde(rename = "__count", default)]
    pub count: Option<u64>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Raw image content item
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageRecord {
    pub id: Option<u64>,
    #[serde(default)]
    pub path: String,
    pub name: Option<String>,
    #[serde(rename = "Type")]
    pub content_type: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub creation_date: Option<String>,
    pub modification_date: Option<String>,
    pub created_by: Option<UserRef>,
    pub size: Option<u64>,
    pub binary: Option<BinaryField>,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// Author reference
///
/// When the reference is expanded this carries the user's fields; a
/// deferred reference only has a `__deferred` link, so every field is
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserRef {
    pub full_name: Option<String>,
    pub avatar: Option<Avatar>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Avatar {
    pub url: Option<String>,
}

/// Binary field, holding a link to the media resource stream
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BinaryField {
    #[serde(rename = "__mediaresource")]
    pub media_resource: Option<MediaResource>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaResource {
    pub media_src: Option<String>,
    pub content_type: Option<String>,
}

impl ImageRecord {
    /// Server-relative URL of the binary stream, if the item has one
    pub fn media_src(&self) -> Option<&str> {
        self.binary
            .as_ref()
            .and_then(|b| b.media_resource.as_ref())
            .and_then(|m| m.media_src.as_deref())
    }

    pub fn author_name(&self) -> Option<&str> {
        self.created_by.as_ref().and_then(|u| u.full_name.as_deref())
    }

    pub fn author_avatar_url(&self) -> Option<&str> {
        self.created_by
            .as_ref()
            .and_then(|u| u.avatar.as_ref())
            .and_then(|a| a.url.as_deref())
    }
}
