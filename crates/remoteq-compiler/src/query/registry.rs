use std::sync::Arc;

use dashmap::DashMap;
use remoteq_core::TypeRef;

use super::QueryTranslator;
use crate::TranslatorConfig;
use crate::emit::MethodWriters;
use crate::literal::LiteralWriters;

/// Writer sets and configuration used to translate queries of one type.
#[derive(Clone, Debug, Default)]
pub struct TranslatorProfile {
    pub literals: LiteralWriters,
    pub methods: MethodWriters,
    pub config: TranslatorConfig,
}

/// Translator profiles keyed by element type.
///
/// Entries are immutable once added: registering a type again returns the
/// profile already in place.
#[derive(Debug, Default)]
pub struct TranslatorRegistry {
    profiles: DashMap<TypeRef, Arc<TranslatorProfile>>,
    fallback: Arc<TranslatorProfile>,
}

impl TranslatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose unregistered types use `fallback`.
    pub fn with_fallback(fallback: TranslatorProfile) -> Self {
        Self {
            profiles: DashMap::new(),
            fallback: Arc::new(fallback),
        }
    }

    /// Register `profile` for `element` unless one exists; returns the
    /// profile in effect.
    pub fn register(&self, element: TypeRef, profile: TranslatorProfile) -> Arc<TranslatorProfile> {
        self.profiles
            .entry(element)
            .or_insert_with(|| Arc::new(profile))
            .value()
            .clone()
    }

    pub fn profile_for(&self, element: &TypeRef) -> Arc<TranslatorProfile> {
        self.profiles
            .get(element)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| self.fallback.clone())
    }

    /// A fresh translator for queries over `element`.
    pub fn translator_for(&self, element: &TypeRef) -> QueryTranslator {
        QueryTranslator::new(self.profile_for(element))
    }

    pub fn contains(&self, element: &TypeRef) -> bool {
        self.profiles.contains_key(element)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
