use super::data_type::mismatch;
use super::{
    Alias, AliasId, DataType, Struct, StructField, TypeId, TypeKind, Union, UnionMember, UserType,
};
use crate::{Span, ValidationError, Value};

/// A struct or union a field ultimately refers to, seen through aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeTarget {
    /// The field's type is the composite itself.
    Direct(TypeId),
    /// The field's type is a list of the composite.
    ListOf(TypeId),
}

impl CompositeTarget {
    pub const fn id(self) -> TypeId {
        match self {
            Self::Direct(id) | Self::ListOf(id) => id,
        }
    }
}

/// Arena of every user-defined type and alias of an API.
///
/// The registry provides:
/// - Forward declaration of structs and unions (definitions are filled in later)
/// - Alias registration
/// - Inherited field views (`all_fields`)
/// - Alias unwrapping with nullability propagation
/// - Value checking for composite types
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: Vec<UserType>,
    aliases: Vec<Alias>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_type_id(&self) -> TypeId {
        TypeId::new(self.types.len() as u64)
    }

    /// Declares an empty struct and returns its id.
    pub fn declare_struct(
        &mut self,
        name: impl Into<String>,
        namespace: impl Into<String>,
        span: Span,
    ) -> TypeId {
        let id = self.next_type_id();
        self.types
            .push(UserType::Struct(Struct::new(name, namespace, span)));
        id
    }

    /// Declares an empty union and returns its id.
    pub fn declare_union(
        &mut self,
        name: impl Into<String>,
        namespace: impl Into<String>,
        span: Span,
    ) -> TypeId {
        let id = self.next_type_id();
        self.types.push(UserType::Union(Union::new(name, namespace, span)));
        id
    }

    /// Registers an alias and returns its id.
    pub fn add_alias(&mut self, alias: Alias) -> AliasId {
        let id = AliasId::new(self.aliases.len() as u64);
        self.aliases.push(alias);
        id
    }

    pub fn get(&self, id: TypeId) -> Option<&UserType> {
        self.types.get(id.index())
    }

    pub fn get_mut(&mut self, id: TypeId) -> Option<&mut UserType> {
        self.types.get_mut(id.index())
    }

    pub fn struct_type(&self, id: TypeId) -> Option<&Struct> {
        match self.get(id)? {
            UserType::Struct(s) => Some(s),
            UserType::Union(_) => None,
        }
    }

    pub fn struct_type_mut(&mut self, id: TypeId) -> Option<&mut Struct> {
        match self.get_mut(id)? {
            UserType::Struct(s) => Some(s),
            UserType::Union(_) => None,
        }
    }

    pub fn union_type(&self, id: TypeId) -> Option<&Union> {
        match self.get(id)? {
            UserType::Union(u) => Some(u),
            UserType::Struct(_) => None,
        }
    }

    pub fn union_type_mut(&mut self, id: TypeId) -> Option<&mut Union> {
        match self.get_mut(id)? {
            UserType::Union(u) => Some(u),
            UserType::Struct(_) => None,
        }
    }

    pub fn get_alias(&self, id: AliasId) -> Option<&Alias> {
        self.aliases.get(id.index())
    }

    /// Looks up an alias minted by this registry.
    ///
    /// # Panics
    /// Panics if `id` was not returned by [`TypeRegistry::add_alias`].
    pub fn alias(&self, id: AliasId) -> &Alias {
        &self.aliases[id.index()]
    }

    /// Name of a struct or union; empty for unknown ids.
    pub fn name(&self, id: TypeId) -> &str {
        self.get(id).map_or("", UserType::name)
    }

    pub fn types(&self) -> impl Iterator<Item = (TypeId, &UserType)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, t)| (TypeId::new(i as u64), t))
    }

    pub fn aliases(&self) -> impl Iterator<Item = (AliasId, &Alias)> {
        self.aliases
            .iter()
            .enumerate()
            .map(|(i, a)| (AliasId::new(i as u64), a))
    }

    /// The chain of types from the root ancestor down to `id` itself.
    pub fn lineage(&self, id: TypeId) -> Vec<TypeId> {
        let mut chain = vec![id];
        let mut current = self.get(id).and_then(UserType::parent);
        while let Some(parent) = current {
            if chain.contains(&parent) {
                break;
            }
            chain.push(parent);
            current = self.get(parent).and_then(UserType::parent);
        }
        chain.reverse();
        chain
    }

    /// Inherited fields followed by own fields; each level lists required
    /// fields before optional ones.
    pub fn struct_all_fields(&self, id: TypeId) -> Vec<&StructField> {
        let mut fields = Vec::new();
        for level in self.lineage(id) {
            if let Some(s) = self.struct_type(level) {
                fields.extend(s.fields.iter().filter(|f| !f.is_optional()));
                fields.extend(s.fields.iter().filter(|f| f.is_optional()));
            }
        }
        fields
    }

    /// Members of the extended union followed by own members.
    pub fn union_all_fields(&self, id: TypeId) -> Vec<&UnionMember> {
        self.lineage(id)
            .into_iter()
            .filter_map(|level| self.union_type(level))
            .flat_map(|u| u.fields.iter())
            .collect()
    }

    pub fn find_union_member(&self, id: TypeId, tag: &str) -> Option<&UnionMember> {
        self.union_all_fields(id)
            .into_iter()
            .find(|member| member.name() == tag)
    }

    /// Follows alias references down to a non-alias type. The result is
    /// nullable if any reference along the chain was.
    pub fn unwrap_alias(&self, data_type: &DataType) -> DataType {
        let mut current = data_type.clone();
        let mut hops = 0;
        while let TypeKind::Alias(id) = current.kind {
            let Some(alias) = self.get_alias(id) else {
                break;
            };
            if hops > self.aliases.len() {
                break;
            }
            hops += 1;
            current = alias
                .data_type
                .with_nullable(current.nullable || alias.data_type.nullable);
        }
        current
    }

    pub fn is_nullable(&self, data_type: &DataType) -> bool {
        self.unwrap_alias(data_type).nullable
    }

    /// The struct or union behind a reference, directly or as list items.
    pub fn composite_target(&self, data_type: &DataType) -> Option<CompositeTarget> {
        match self.unwrap_alias(data_type).kind {
            TypeKind::Struct(id) | TypeKind::Union(id) => Some(CompositeTarget::Direct(id)),
            TypeKind::List(list) => self
                .unwrap_alias(&list.item_type)
                .user_type_id()
                .map(CompositeTarget::ListOf),
            _ => None,
        }
    }

    pub fn is_composite(&self, data_type: &DataType) -> bool {
        self.unwrap_alias(data_type).user_type_id().is_some()
    }

    /// Human-readable name of a reference, e.g. `List(Account)?`.
    pub fn type_name(&self, data_type: &DataType) -> String {
        let base = match &data_type.kind {
            TypeKind::Struct(id) | TypeKind::Union(id) => match self.get(*id) {
                Some(user_type) => user_type.name().to_string(),
                None => format!("Unknown({})", id.as_u64()),
            },
            TypeKind::Alias(id) => match self.get_alias(*id) {
                Some(alias) => alias.name.clone(),
                None => format!("Unknown({})", id.as_u64()),
            },
            TypeKind::List(list) => format!("List({})", self.type_name(&list.item_type)),
            kind => kind.primitive_name().unwrap_or_default().to_string(),
        };
        if data_type.nullable {
            format!("{base}?")
        } else {
            base
        }
    }

    pub(crate) fn check_struct(&self, id: TypeId, value: &Value) -> Result<(), ValidationError> {
        let name = self.name(id);
        let Value::Object(map) = value else {
            return Err(mismatch(&format!("struct '{name}'"), value));
        };
        for field in self.struct_all_fields(id) {
            match map.get(&field.name) {
                Some(v) => field
                    .data_type
                    .check(v, self)
                    .map_err(|e| e.within(format!("field '{}'", field.name)))?,
                None if field.is_optional() => {}
                None => {
                    return Err(ValidationError::new(format!(
                        "missing required field '{}' of struct '{name}'",
                        field.name
                    )));
                }
            }
        }
        Ok(())
    }

    pub(crate) fn check_union(&self, id: TypeId, value: &Value) -> Result<(), ValidationError> {
        let name = self.name(id);
        let (tag, payload) = match value {
            Value::TagRef(tag_ref) => {
                let known_union = self
                    .lineage(id)
                    .into_iter()
                    .any(|level| self.name(level) == tag_ref.union_name);
                if !known_union {
                    return Err(ValidationError::new(format!(
                        "tag of union '{}' is not a value of union '{name}'",
                        tag_ref.union_name
                    )));
                }
                (tag_ref.tag.as_str(), None)
            }
            Value::Object(map) if map.len() == 1 => match map.iter().next() {
                Some((tag, payload)) => (tag.as_str(), Some(payload)),
                None => return Err(mismatch(&format!("tag of union '{name}'"), value)),
            },
            other => return Err(mismatch(&format!("tag of union '{name}'"), other)),
        };

        match (self.find_union_member(id, tag), payload) {
            (None, _) => Err(ValidationError::new(format!(
                "unknown tag '{tag}' for union '{name}'"
            ))),
            (Some(UnionMember::Symbol(_)), None) => Ok(()),
            (Some(UnionMember::Symbol(_)), Some(payload)) if payload.is_null() => Ok(()),
            (Some(UnionMember::Symbol(_)), Some(_)) => Err(ValidationError::new(format!(
                "tag '{tag}' of union '{name}' carries no value"
            ))),
            (Some(UnionMember::Field(_)), None) => Err(ValidationError::new(format!(
                "tag '{tag}' of union '{name}' requires a value"
            ))),
            (Some(UnionMember::Field(field)), Some(payload)) => field
                .data_type
                .check(payload, self)
                .map_err(|e| e.within(format!("tag '{tag}'"))),
        }
    }
}
