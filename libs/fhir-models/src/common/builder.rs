//! Fluent builder substrate
//!
//! A builder owns a draft model and hands out chained setters. `build()`
//! never fails: FHIR cardinality is not checked here. `build_or_throw()`
//! additionally runs a [`Validator`] and rejects outcomes with errors.

use super::element::{FhirElement, HasIdAndExtensions, HasModifierExtensions};
use super::error::Result;
use super::datatypes::{Meta, Narrative};
use super::extension::Extension;
use super::resource::DomainResource;
use super::validation::Validator;
use async_trait::async_trait;

/// Append `value` to an optional list, creating the list on first use.
///
/// Existing entries are kept in insertion order; the list is never replaced.
pub fn add_to_array<T>(slot: &mut Option<Vec<T>>, value: T) {
    slot.get_or_insert_with(Vec::new).push(value);
}

/// Set a choice-type field and drop its primitive shadow.
///
/// The variant enum already guarantees a single populated variant; the
/// shadow belongs to whichever variant was set before, so it is cleared.
pub fn set_choice<T, E>(slot: &mut Option<T>, value: T, shadow: &mut Option<E>) {
    *slot = Some(value);
    *shadow = None;
}

/// Builder over any element type
#[async_trait]
pub trait ElementBuilder: Sized + Send {
    type Output: FhirElement + HasIdAndExtensions;

    /// The current draft
    fn data(&self) -> &Self::Output;

    fn data_mut(&mut self) -> &mut Self::Output;

    /// Materialize the draft without validation
    fn build(self) -> Self::Output;

    /// Apply an arbitrary edit to the draft, e.g. to set a `_field` shadow
    fn with<F>(mut self, edit: F) -> Self
    where
        F: FnOnce(&mut Self::Output),
    {
        edit(self.data_mut());
        self
    }

    fn set_id(mut self, id: impl Into<String>) -> Self {
        self.data_mut().set_id(Some(id.into()));
        self
    }

    fn add_extension(mut self, extension: Extension) -> Self {
        self.data_mut().add_extension(extension);
        self
    }

    /// Build, then validate; fails if any issue has `error` severity
    async fn build_or_throw(self, validator: &dyn Validator) -> Result<Self::Output> {
        let instance = self.build();
        instance.validate_or_throw(validator).await?;
        Ok(instance)
    }
}

/// Setters available on builders of backbone elements and domain resources
pub trait BackboneElementBuilder: ElementBuilder
where
    Self::Output: HasModifierExtensions,
{
    fn add_modifier_extension(mut self, extension: Extension) -> Self {
        self.data_mut().add_modifier_extension(extension);
        self
    }
}

impl<B> BackboneElementBuilder for B
where
    B: ElementBuilder,
    B::Output: HasModifierExtensions,
{
}

/// Setters for the fields every domain resource shares
pub trait DomainResourceBuilder: ElementBuilder
where
    Self::Output: DomainResource,
{
    fn set_meta(mut self, meta: Meta) -> Self {
        *self.data_mut().meta_mut() = Some(meta);
        self
    }

    fn set_implicit_rules(mut self, implicit_rules: impl Into<String>) -> Self {
        *self.data_mut().implicit_rules_mut() = Some(implicit_rules.into());
        self
    }

    fn set_language(mut self, language: impl Into<String>) -> Self {
        *self.data_mut().language_mut() = Some(language.into());
        self
    }

    fn set_text(mut self, text: Narrative) -> Self {
        *self.data_mut().text_mut() = Some(text);
        self
    }

    fn add_contained(mut self, resource: impl Into<<Self::Output as DomainResource>::Contained>) -> Self {
        add_to_array(self.data_mut().contained_mut(), resource.into());
        self
    }
}

impl<B> DomainResourceBuilder for B
where
    B: ElementBuilder,
    B::Output: DomainResource,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_to_array_creates_and_appends() {
        let mut notes: Option<Vec<&str>> = None;
        add_to_array(&mut notes, "n1");
        add_to_array(&mut notes, "n2");
        assert_eq!(notes, Some(vec!["n1", "n2"]));
    }

    #[test]
    fn test_add_to_array_keeps_existing_entries() {
        let mut notes = Some(vec![1]);
        add_to_array(&mut notes, 2);
        assert_eq!(notes, Some(vec![1, 2]));
    }

    #[test]
    fn test_set_choice_clears_shadow() {
        let mut value = Some("a");
        let mut shadow = Some(7);
        set_choice(&mut value, "b", &mut shadow);
        assert_eq!(value, Some("b"));
        assert_eq!(shadow, None);
    }
}
