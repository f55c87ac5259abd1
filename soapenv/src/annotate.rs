//! Pre-serialization type annotation.
//!
//! Some SOAP services require request elements to carry a discriminator
//! (typically an `xsi:type` attribute) that plain serde derives cannot
//! produce for every nesting of a type. The [`XmlTyped`] capability lets a
//! request type annotate itself; the [`XmlAnnotator`] walks the whole
//! request graph right before serialization and invokes the hook on every
//! reachable occurrence of a registered type.
//!
//! The walk is purely structural: struct, tuple and tuple-struct fields,
//! list and array elements (in order), and enum variant fields are
//! recursed into — which covers `Option` and other union-shaped values.
//! Maps, sets and opaque values are leaves. There is no visited-set, so
//! running the walk twice invokes the hook on exactly the same node set
//! each time.

use bevy_reflect::{
    DynamicTypePath, GetTypeRegistration, PartialReflect, Reflect, ReflectMut, TypePath,
    TypeRegistry, reflect_trait,
};
use tracing::trace;

/// Capability for request types that set their own XML type annotation
/// before serialization.
#[reflect_trait]
pub trait XmlTyped {
    /// Invoked once per reachable occurrence, before the request is
    /// serialized. Mutates the value in place.
    fn set_xml_type(&mut self);
}

/// Walks a request graph and invokes [`XmlTyped::set_xml_type`] on every
/// node whose concrete type has been registered.
#[derive(Default)]
pub struct XmlAnnotator {
    registry: TypeRegistry,
}

impl XmlAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` so the walk invokes its hook.
    pub fn register<T>(&mut self)
    where
        T: Reflect + TypePath + XmlTyped + GetTypeRegistration,
    {
        self.registry.register::<T>();
        self.registry.register_type_data::<T, ReflectXmlTyped>();
    }

    /// Recursively visit `value`, invoking the hook on registered nodes,
    /// then descending into their contents.
    pub fn annotate(&self, value: &mut dyn PartialReflect) {
        self.apply_hook(value);
        match value.reflect_mut() {
            ReflectMut::Struct(s) => {
                for i in 0..s.field_len() {
                    if let Some(field) = s.field_at_mut(i) {
                        self.annotate(field);
                    }
                }
            }
            ReflectMut::TupleStruct(ts) => {
                for i in 0..ts.field_len() {
                    if let Some(field) = ts.field_mut(i) {
                        self.annotate(field);
                    }
                }
            }
            ReflectMut::Tuple(t) => {
                for i in 0..t.field_len() {
                    if let Some(field) = t.field_mut(i) {
                        self.annotate(field);
                    }
                }
            }
            ReflectMut::List(list) => {
                for i in 0..list.len() {
                    if let Some(item) = list.get_mut(i) {
                        self.annotate(item);
                    }
                }
            }
            ReflectMut::Array(array) => {
                for i in 0..array.len() {
                    if let Some(item) = array.get_mut(i) {
                        self.annotate(item);
                    }
                }
            }
            ReflectMut::Enum(e) => {
                for i in 0..e.field_len() {
                    if let Some(field) = e.field_at_mut(i) {
                        self.annotate(field);
                    }
                }
            }
            // Maps, sets and opaque values are leaves.
            _ => {}
        }
    }

    fn apply_hook(&self, value: &mut dyn PartialReflect) {
        let Some(target) = value.try_as_reflect_mut() else {
            return;
        };
        let type_id = target.as_any().type_id();
        let Some(data) = self.registry.get_type_data::<ReflectXmlTyped>(type_id) else {
            return;
        };
        trace!("set_xml_type on {}", DynamicTypePath::reflect_short_type_path(target));
        if let Some(typed) = data.get_mut(target) {
            typed.set_xml_type();
        }
    }
}
