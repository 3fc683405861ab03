//! Resource-level traits and the `resourceType` tag

use super::datatypes::{Meta, Narrative};
use super::element::{FhirElement, HasModifierExtensions};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// A resource type with a fixed `resourceType` name
pub trait NamedResource {
    const RESOURCE_TYPE: &'static str;
}

/// Any FHIR resource model
pub trait Resource: NamedResource + FhirElement {
    fn resource_type(&self) -> &'static str {
        Self::RESOURCE_TYPE
    }
}

/// Resource with narrative, contained resources and extensions
pub trait DomainResource: Resource + HasModifierExtensions {
    /// Type stored in `contained`, usually the version's `Resource` enum
    type Contained;

    fn meta(&self) -> Option<&Meta>;

    fn meta_mut(&mut self) -> &mut Option<Meta>;

    fn implicit_rules_mut(&mut self) -> &mut Option<String>;

    fn language_mut(&mut self) -> &mut Option<String>;

    fn text(&self) -> Option<&Narrative>;

    fn text_mut(&mut self) -> &mut Option<Narrative>;

    fn contained(&self) -> &[Self::Contained];

    fn contained_mut(&mut self) -> &mut Option<Vec<Self::Contained>>;
}

/// Zero-sized `resourceType` field.
///
/// Serializes as the resource's fixed name; deserialization rejects any
/// other name. A missing `resourceType` falls back to the default tag.
pub struct ResourceTypeTag<R>(PhantomData<fn() -> R>);

impl<R> ResourceTypeTag<R> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<R: NamedResource> ResourceTypeTag<R> {
    pub fn as_str(&self) -> &'static str {
        R::RESOURCE_TYPE
    }
}

impl<R> Default for ResourceTypeTag<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for ResourceTypeTag<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for ResourceTypeTag<R> {}

impl<R> PartialEq for ResourceTypeTag<R> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<R> Eq for ResourceTypeTag<R> {}

impl<R: NamedResource> fmt::Debug for ResourceTypeTag<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(R::RESOURCE_TYPE)
    }
}

impl<R: NamedResource> Serialize for ResourceTypeTag<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(R::RESOURCE_TYPE)
    }
}

impl<'de, R: NamedResource> Deserialize<'de> for ResourceTypeTag<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        if name == R::RESOURCE_TYPE {
            Ok(Self::new())
        } else {
            Err(D::Error::custom(format!(
                "expected resourceType '{}', found '{}'",
                R::RESOURCE_TYPE,
                name
            )))
        }
    }
}

/// Read the `resourceType` of a raw JSON resource
pub fn resource_type_of(value: &serde_json::Value) -> super::error::Result<&str> {
    value
        .get("resourceType")
        .and_then(|v| v.as_str())
        .ok_or(super::error::Error::MissingResourceType)
}
