use std::sync::Arc;

use remoteq_core::TypeRef;

use super::*;
use crate::TranslatorConfig;
use crate::test_utils::{contact, customer, customers};

fn profile(limit: usize) -> TranslatorProfile {
    TranslatorProfile {
        config: TranslatorConfig::new().recursion_limit(limit),
        ..TranslatorProfile::default()
    }
}

#[test]
fn register_is_insert_once() {
    let registry = TranslatorRegistry::new();
    let first = registry.register(customer(), profile(10));
    let second = registry.register(customer(), profile(20));

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.config.get_recursion_limit(), 10);
    assert_eq!(registry.len(), 1);
}

#[test]
fn unregistered_types_use_fallback() {
    let registry = TranslatorRegistry::with_fallback(profile(7));
    registry.register(customer(), profile(10));

    assert!(registry.contains(&customer()));
    assert!(!registry.contains(&contact()));
    assert_eq!(registry.profile_for(&contact()).config.get_recursion_limit(), 7);
    assert_eq!(registry.translator_for(&customer()).config().get_recursion_limit(), 10);
}

#[test]
fn concurrent_registration_agrees() {
    let registry = TranslatorRegistry::new();
    let profiles: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = &registry;
                scope.spawn(move || registry.register(customer(), profile(100 + i)))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(profiles.iter().all(|p| Arc::ptr_eq(p, &profiles[0])));
    assert_eq!(registry.len(), 1);
}

#[test]
fn translator_uses_profile_config() {
    let registry = TranslatorRegistry::new();
    registry.register(customer(), profile(2));

    let chain = customers().take(1).take(2).take(3).build();
    let err = registry.translator_for(&customer()).translate(&chain).unwrap_err();
    assert!(matches!(err, crate::Error::RecursionLimitExceeded));

    let ok = registry.translator_for(&TypeRef::entity("Other")).translate(&chain);
    assert!(ok.is_ok());
}

#[test]
fn translator_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<QueryTranslator>();
    assert_send_sync::<TranslatorRegistry>();
}
