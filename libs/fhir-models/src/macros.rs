//! Declarative macros that stamp out the per-type trait impls and builders.
//!
//! Every model type follows the same shape, so the element, backbone and
//! domain-resource plumbing plus the fluent builders are generated here
//! rather than written out by hand for each type.

/// Implements `HasIdAndExtensions` and `FhirElement` for types with
/// `id` and `extension` fields.
macro_rules! impl_element {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::common::element::HasIdAndExtensions for $ty {
                fn id(&self) -> Option<&str> {
                    self.id.as_deref()
                }

                fn set_id(&mut self, id: Option<String>) {
                    self.id = id;
                }

                fn extension(&self) -> &[$crate::common::extension::Extension] {
                    self.extension.as_deref().unwrap_or_default()
                }

                fn extension_mut(
                    &mut self,
                ) -> &mut Option<Vec<$crate::common::extension::Extension>> {
                    &mut self.extension
                }
            }

            impl $crate::common::element::FhirElement for $ty {}
        )+
    };
}

/// Adds `HasModifierExtensions` on top of [`impl_element!`].
macro_rules! impl_backbone_element {
    ($($ty:ty),+ $(,)?) => {
        impl_element!($($ty),+);

        $(
            impl $crate::common::element::HasModifierExtensions for $ty {
                fn modifier_extension(&self) -> &[$crate::common::extension::Extension] {
                    self.modifier_extension.as_deref().unwrap_or_default()
                }

                fn modifier_extension_mut(
                    &mut self,
                ) -> &mut Option<Vec<$crate::common::extension::Extension>> {
                    &mut self.modifier_extension
                }
            }
        )+
    };
}

/// Implements the resource traits for a domain resource.
///
/// `$contained` is the type stored in the resource's `contained` list.
macro_rules! impl_domain_resource {
    ($ty:ty, $name:literal, $contained:ty) => {
        impl_backbone_element!($ty);

        impl $crate::common::resource::NamedResource for $ty {
            const RESOURCE_TYPE: &'static str = $name;
        }

        impl $crate::common::resource::Resource for $ty {}

        impl $crate::common::resource::DomainResource for $ty {
            type Contained = $contained;

            fn meta(&self) -> Option<&$crate::common::datatypes::Meta> {
                self.meta.as_ref()
            }

            fn meta_mut(&mut self) -> &mut Option<$crate::common::datatypes::Meta> {
                &mut self.meta
            }

            fn implicit_rules_mut(&mut self) -> &mut Option<String> {
                &mut self.implicit_rules
            }

            fn language_mut(&mut self) -> &mut Option<String> {
                &mut self.language
            }

            fn text(&self) -> Option<&$crate::common::datatypes::Narrative> {
                self.text.as_ref()
            }

            fn text_mut(&mut self) -> &mut Option<$crate::common::datatypes::Narrative> {
                &mut self.text
            }

            fn contained(&self) -> &[$contained] {
                self.contained.as_deref().unwrap_or_default()
            }

            fn contained_mut(&mut self) -> &mut Option<Vec<$contained>> {
                &mut self.contained
            }
        }
    };
}

/// Implements `ChoiceType` for `x[x]` enums, listing each variant's wire key.
macro_rules! impl_choice {
    ($($ty:ident { $($key:literal),+ $(,)? });+ $(;)?) => {
        $(
            impl $crate::common::choice::ChoiceType for $ty {
                const NAME: &'static str = stringify!($ty);
                const KEYS: &'static [&'static str] = &[$($key),+];
            }
        )+
    };
}

/// Generates a fluent builder for a model type.
///
/// Each line declares one generated method:
///
/// - `set name(field: Type);` replaces a single-valued field
/// - `add name(field: Type);` appends to a list field
/// - `choice name(field: Type);` sets a choice field (`value[x]`)
/// - `choice name(field: Type, clears shadow);` also drops the `_value[x]` shadow
///
/// ```ignore
/// fhir_builder! {
///     CodeSystemFilterBuilder => CodeSystemFilter {
///         set set_code(code: String);
///         add add_operator(operator: FilterOperator);
///     }
/// }
/// ```
macro_rules! fhir_builder {
    (@method set $method:ident $field:ident $ty:ty) => {
        pub fn $method(mut self, value: impl Into<$ty>) -> Self {
            self.data.$field = Some(value.into());
            self
        }
    };
    (@method add $method:ident $field:ident $ty:ty) => {
        pub fn $method(mut self, value: impl Into<$ty>) -> Self {
            $crate::common::builder::add_to_array(&mut self.data.$field, value.into());
            self
        }
    };
    (@method choice $method:ident $field:ident $ty:ty) => {
        pub fn $method(mut self, value: impl Into<$ty>) -> Self {
            self.data.$field = Some(value.into());
            self
        }
    };
    (@method choice $method:ident $field:ident $ty:ty, $shadow:ident) => {
        pub fn $method(mut self, value: impl Into<$ty>) -> Self {
            $crate::common::builder::set_choice(
                &mut self.data.$field,
                value.into(),
                &mut self.data.$shadow,
            );
            self
        }
    };
    (
        $(#[$meta:meta])*
        $builder:ident => $model:ty {
            $( $kind:ident $method:ident ( $field:ident : $ty:ty $(, clears $shadow:ident)? ) ; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        pub struct $builder {
            data: $model,
        }

        impl $builder {
            pub fn new() -> Self {
                Self::default()
            }

            $( fhir_builder!(@method $kind $method $field $ty $(, $shadow)?); )*
        }

        impl From<$model> for $builder {
            fn from(data: $model) -> Self {
                Self { data }
            }
        }

        impl $crate::common::builder::ElementBuilder for $builder {
            type Output = $model;

            fn data(&self) -> &$model {
                &self.data
            }

            fn data_mut(&mut self) -> &mut $model {
                &mut self.data
            }

            fn build(self) -> $model {
                self.data
            }
        }
    };
}

/// Declares a version's `Resource` enum over its modelled resource types.
///
/// Serialization is transparent; decoding dispatches on `resourceType` and
/// rejects names the version does not model.
macro_rules! resource_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $variant:ident ( $ty:ty ) ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize)]
        #[serde(untagged)]
        pub enum $name {
            $( $variant(Box<$ty>), )+
        }

        impl $name {
            /// Decode any modelled resource, dispatching on `resourceType`
            pub fn from_json(value: ::serde_json::Value) -> $crate::common::Result<Self> {
                let resource_type =
                    $crate::common::resource::resource_type_of(&value)?.to_string();
                $(
                    if resource_type
                        == <$ty as $crate::common::resource::NamedResource>::RESOURCE_TYPE
                    {
                        return Ok(Self::$variant(Box::new(::serde_json::from_value(value)?)));
                    }
                )+
                Err($crate::common::Error::UnsupportedResourceType(resource_type))
            }

            pub fn resource_type(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => {
                        <$ty as $crate::common::resource::NamedResource>::RESOURCE_TYPE
                    } )+
                }
            }

            pub fn id(&self) -> Option<&str> {
                use $crate::common::element::HasIdAndExtensions;
                match self {
                    $( Self::$variant(r) => r.id(), )+
                }
            }

            /// Names of every resource type this enum models
            pub fn supported_types() -> &'static [&'static str] {
                const TYPES: &[&str] =
                    &[$( <$ty as $crate::common::resource::NamedResource>::RESOURCE_TYPE ),+];
                TYPES
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                let value = ::serde_json::Value::deserialize(deserializer)?;
                Self::from_json(value).map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }

        impl $crate::common::element::FhirElement for $name {}

        $(
            impl From<$ty> for $name {
                fn from(resource: $ty) -> Self {
                    Self::$variant(Box::new(resource))
                }
            }
        )+
    };
}
