//! Registration-time type schema.
//!
//! Replaces runtime reflection: each entity type lists its members in
//! declaration order, each enum lists its member names. Duplicate member
//! names may be registered; lookups report them as ambiguous instead of
//! picking one.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::TypeRef;

/// Member of an entity type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDescriptor {
    pub name: String,
    pub ty: TypeRef,
}

impl MemberDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Result of a by-name member lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberLookup<'a> {
    Found(&'a MemberDescriptor),
    Missing,
    /// More than one member carries the name.
    Ambiguous(usize),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    entities: IndexMap<String, Vec<MemberDescriptor>>,
    #[serde(default)]
    enums: IndexMap<String, Vec<String>>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity type, replacing any previous registration.
    pub fn with_entity<N, M>(mut self, name: N, members: M) -> Self
    where
        N: Into<String>,
        M: IntoIterator<Item = (&'static str, TypeRef)>,
    {
        self.add_entity(
            name,
            members
                .into_iter()
                .map(|(n, ty)| MemberDescriptor::new(n, ty))
                .collect(),
        );
        self
    }

    pub fn with_enum<N, M>(mut self, name: N, members: M) -> Self
    where
        N: Into<String>,
        M: IntoIterator<Item = &'static str>,
    {
        self.enums.insert(
            name.into(),
            members.into_iter().map(str::to_owned).collect(),
        );
        self
    }

    pub fn add_entity(&mut self, name: impl Into<String>, members: Vec<MemberDescriptor>) {
        self.entities.insert(name.into(), members);
    }

    pub fn entity(&self, name: &str) -> Option<&[MemberDescriptor]> {
        self.entities.get(name).map(Vec::as_slice)
    }

    pub fn enum_members(&self, name: &str) -> Option<&[String]> {
        self.enums.get(name).map(Vec::as_slice)
    }

    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    /// Look up `member` on `ty` by exact name.
    ///
    /// Only entity types have members; any other type yields `Missing`.
    pub fn lookup_member(&self, ty: &TypeRef, member: &str) -> MemberLookup<'_> {
        let TypeRef::Entity(name) = ty.non_nullable() else {
            return MemberLookup::Missing;
        };
        let Some(members) = self.entities.get(name) else {
            return MemberLookup::Missing;
        };

        let mut matches = members.iter().filter(|m| m.name == member);
        match (matches.next(), matches.count()) {
            (None, _) => MemberLookup::Missing,
            (Some(found), 0) => MemberLookup::Found(found),
            (Some(_), rest) => MemberLookup::Ambiguous(rest + 1),
        }
    }

    /// Type of `member` on `ty` when it resolves unambiguously.
    pub fn member_type(&self, ty: &TypeRef, member: &str) -> Option<&TypeRef> {
        match self.lookup_member(ty, member) {
            MemberLookup::Found(m) => Some(&m.ty),
            _ => None,
        }
    }
}
