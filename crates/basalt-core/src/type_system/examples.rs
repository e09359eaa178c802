//! Example registration and materialization.
//!
//! Struct examples store only their scalar fields. Composite fields (and
//! lists of composites) are never written inline; when an example is read
//! back with [`TypeRegistry::get_example`] they are filled from the nested
//! type's own example under the same label, falling back to
//! [`DEFAULT_EXAMPLE_LABEL`].

use super::{CompositeTarget, Example, TypeId, TypeKind, TypeRegistry, UnionMember, UserType};
use crate::{Error, Result, Span, Value};
use std::collections::BTreeMap;

/// Label consulted when a nested type has no example under the requested label.
pub const DEFAULT_EXAMPLE_LABEL: &str = "default";

impl TypeRegistry {
    /// Validates `example` against the struct or union `id` and stores it.
    ///
    /// # Errors
    /// - `InvalidSpec` for a duplicate label, unknown field or tag, an inline
    ///   composite value, or a missing required scalar field
    /// - `Validation` when a scalar value fails its field's type check
    pub fn add_example(&mut self, id: TypeId, example: Example) -> Result<()> {
        let Some(user_type) = self.get(id) else {
            return Err(Error::invalid_spec(
                format!("Cannot attach example '{}' to an unknown type", example.label),
                Span::default(),
            ));
        };
        let span = user_type.span();
        if user_type.examples().iter().any(|e| e.label == example.label) {
            return Err(Error::invalid_spec(
                format!(
                    "Example with label '{}' already exists for '{}'",
                    example.label,
                    user_type.name()
                ),
                span,
            ));
        }

        let value = match user_type {
            UserType::Struct(_) => self.validate_struct_example(id, &example, span)?,
            UserType::Union(_) => self.validate_union_example(id, &example, span)?,
        };
        let stored = Example { value, ..example };

        match self.get_mut(id) {
            Some(UserType::Struct(s)) => s.examples.push(stored),
            Some(UserType::Union(u)) => u.examples.push(stored),
            None => {}
        }
        Ok(())
    }

    fn validate_struct_example(&self, id: TypeId, example: &Example, span: Span) -> Result<Value> {
        let name = self.name(id);
        let label = &example.label;
        let Value::Object(entries) = &example.value else {
            return Err(Error::invalid_spec(
                format!("Example '{label}' of struct '{name}' must be an object"),
                span,
            ));
        };

        let fields = self.struct_all_fields(id);
        if let Some(unknown) = entries
            .keys()
            .find(|key| !fields.iter().any(|f| &f.name == *key))
        {
            return Err(Error::invalid_spec(
                format!("Example '{label}' of struct '{name}' has unknown field '{unknown}'"),
                span,
            ));
        }

        for field in fields {
            let target = self.composite_target(&field.data_type);
            match (entries.get(&field.name), target) {
                (Some(value), Some(_)) if value.is_null() && self.is_nullable(&field.data_type) => {}
                (Some(_), Some(target)) => {
                    return Err(Error::invalid_spec(
                        format!(
                            "Example '{label}' of struct '{name}' gives field '{}' inline; \
                             it is taken from the examples of '{}'",
                            field.name,
                            self.name(target.id())
                        ),
                        span,
                    ));
                }
                (Some(value), None) => {
                    field.data_type.check(value, self).map_err(|e| {
                        Error::validation(
                            format!("Example '{label}' of struct '{name}'"),
                            e.within(format!("field '{}'", field.name)),
                            span,
                        )
                    })?;
                }
                (None, None) => {
                    let is_list =
                        matches!(self.unwrap_alias(&field.data_type).kind, TypeKind::List(_));
                    if !field.is_optional() && !is_list {
                        return Err(Error::invalid_spec(
                            format!(
                                "Example '{label}' of struct '{name}' is missing required field '{}'",
                                field.name
                            ),
                            span,
                        ));
                    }
                }
                (None, Some(_)) => {}
            }
        }
        Ok(example.value.clone())
    }

    fn validate_union_example(&self, id: TypeId, example: &Example, span: Span) -> Result<Value> {
        let name = self.name(id);
        let label = &example.label;
        let single_entry = match &example.value {
            Value::Object(map) if map.len() == 1 => map.iter().next(),
            _ => None,
        };
        let (tag, payload) = match (&example.value, single_entry) {
            (Value::String(tag), _) => (tag.as_str(), None),
            (Value::TagRef(tag_ref), _) => (tag_ref.tag.as_str(), None),
            (_, Some((tag, payload))) => (tag.as_str(), Some(payload)),
            _ => {
                return Err(Error::invalid_spec(
                    format!("Example '{label}' of union '{name}' must name exactly one tag"),
                    span,
                ));
            }
        };

        let Some(member) = self.find_union_member(id, tag) else {
            return Err(Error::invalid_spec(
                format!("Example '{label}' of union '{name}' has unknown tag '{tag}'"),
                span,
            ));
        };

        match (member, payload) {
            (UnionMember::Symbol(_), None) => Ok(Value::String(tag.to_string())),
            (UnionMember::Symbol(_), Some(payload)) if payload.is_null() => {
                Ok(Value::String(tag.to_string()))
            }
            (UnionMember::Symbol(_), Some(_)) => Err(Error::invalid_spec(
                format!("Example '{label}' of union '{name}' gives a value for symbol '{tag}'"),
                span,
            )),
            (UnionMember::Field(field), payload) => {
                match (self.composite_target(&field.data_type), payload) {
                    (Some(_), None) => Ok(Value::String(tag.to_string())),
                    (Some(_), Some(payload))
                        if payload.is_null() && self.is_nullable(&field.data_type) =>
                    {
                        Ok(Value::object([(tag, Value::Null)]))
                    }
                    (Some(target), Some(_)) => Err(Error::invalid_spec(
                        format!(
                            "Example '{label}' of union '{name}' gives tag '{tag}' inline; \
                             it is taken from the examples of '{}'",
                            self.name(target.id())
                        ),
                        span,
                    )),
                    (None, None) => Err(Error::invalid_spec(
                        format!("Example '{label}' of union '{name}' needs a value for tag '{tag}'"),
                        span,
                    )),
                    (None, Some(payload)) => {
                        field.data_type.check(payload, self).map_err(|e| {
                            Error::validation(
                                format!("Example '{label}' of union '{name}'"),
                                e.within(format!("tag '{tag}'")),
                                span,
                            )
                        })?;
                        Ok(Value::object([(tag, payload.clone())]))
                    }
                }
            }
        }
    }

    /// Materializes the example stored under `label`.
    ///
    /// Returns `Ok(None)` when the type has no example with that label.
    /// Nothing is cached or mutated, so repeated calls return equal values.
    ///
    /// # Errors
    /// Returns `InvalidSpec` when a required composite field has no nested
    /// example under `label` or [`DEFAULT_EXAMPLE_LABEL`].
    pub fn get_example(&self, id: TypeId, label: &str) -> Result<Option<Value>> {
        self.materialize(id, label, &mut Vec::new())
    }

    /// Labels of all examples attached to a type, in insertion order.
    pub fn example_labels(&self, id: TypeId) -> Vec<&str> {
        self.get(id)
            .map(|t| t.examples().iter().map(|e| e.label.as_str()).collect())
            .unwrap_or_default()
    }

    fn materialize(&self, id: TypeId, label: &str, stack: &mut Vec<TypeId>) -> Result<Option<Value>> {
        match self.get(id) {
            Some(UserType::Struct(s)) => match s.example(label) {
                Some(example) => self.materialize_struct(id, example, stack).map(Some),
                None => Ok(None),
            },
            Some(UserType::Union(u)) => match u.example(label) {
                Some(example) => self.materialize_union(id, example, stack).map(Some),
                None => Ok(None),
            },
            None => Ok(None),
        }
    }

    fn materialize_struct(
        &self,
        id: TypeId,
        example: &Example,
        stack: &mut Vec<TypeId>,
    ) -> Result<Value> {
        let mut entries: BTreeMap<String, Value> =
            example.value.as_object().cloned().unwrap_or_default();

        stack.push(id);
        for field in self.struct_all_fields(id) {
            if entries.contains_key(&field.name) {
                continue;
            }
            let Some(target) = self.composite_target(&field.data_type) else {
                continue;
            };
            match self.nested_example(target, &example.label, stack)? {
                Some(value) => {
                    entries.insert(field.name.clone(), value);
                }
                None if self.is_nullable(&field.data_type) => {}
                None => {
                    stack.pop();
                    return Err(Error::invalid_spec(
                        format!(
                            "Example '{}' of struct '{}': no example of '{}' for required field '{}'",
                            example.label,
                            self.name(id),
                            self.name(target.id()),
                            field.name
                        ),
                        self.get(id).map_or_else(Span::default, UserType::span),
                    ));
                }
            }
        }
        stack.pop();
        Ok(Value::Object(entries))
    }

    fn materialize_union(
        &self,
        id: TypeId,
        example: &Example,
        stack: &mut Vec<TypeId>,
    ) -> Result<Value> {
        let Value::String(tag) = &example.value else {
            // Scalar payloads are stored in their final `{tag: payload}` form.
            return Ok(example.value.clone());
        };
        let member = self.find_union_member(id, tag);
        let Some(UnionMember::Field(field)) = member else {
            return Ok(Value::tag(self.name(id), tag.clone()));
        };
        let Some(target) = self.composite_target(&field.data_type) else {
            return Ok(Value::tag(self.name(id), tag.clone()));
        };

        stack.push(id);
        let nested = self.nested_example(target, &example.label, stack);
        stack.pop();
        match nested? {
            Some(value) => Ok(Value::object([(tag.clone(), value)])),
            None if self.is_nullable(&field.data_type) => {
                Ok(Value::object([(tag.clone(), Value::Null)]))
            }
            None => Err(Error::invalid_spec(
                format!(
                    "Example '{}' of union '{}': no example of '{}' for tag '{tag}'",
                    example.label,
                    self.name(id),
                    self.name(target.id())
                ),
                self.get(id).map_or_else(Span::default, UserType::span),
            )),
        }
    }

    /// Example of a nested composite under `label`, else under the default label.
    /// A type already being materialized yields `None` to break recursion.
    fn nested_example(
        &self,
        target: CompositeTarget,
        label: &str,
        stack: &mut Vec<TypeId>,
    ) -> Result<Option<Value>> {
        let id = target.id();
        if stack.contains(&id) {
            return Ok(None);
        }
        let mut value = self.materialize(id, label, stack)?;
        if value.is_none() && label != DEFAULT_EXAMPLE_LABEL {
            value = self.materialize(id, DEFAULT_EXAMPLE_LABEL, stack)?;
        }
        Ok(value.map(|v| match target {
            CompositeTarget::Direct(_) => v,
            CompositeTarget::ListOf(_) => Value::List(vec![v]),
        }))
    }
}
