//! Descriptor factories for the payment methods offered at checkout.

use super::registry::PaymentMethodRegistry;
use super::submission::RedirectSubmitter;
use crate::domain::payment_method::{
    AriaLabelProvider, Content, FormField, Logo, PaymentMethodDescriptor, PaymentMethodId,
};
use crate::domain::ports::{ProcessorCredentials, StateContainer, Translate};
use crate::domain::store::{
    CUSTOMER_BANK, CUSTOMER_NAME, MethodStore, create_eps_store, create_wechat_store,
};
use crate::error::{CheckoutError, Result};
use std::sync::Arc;

fn customer_name_field() -> FormField {
    FormField {
        name: CUSTOMER_NAME,
        label: "Your name",
        autocomplete: "cc-name",
    }
}

/// Builds a redirect-confirmed method whose form and summary read `store`.
fn redirect_method(
    store: &MethodStore,
    credentials: &ProcessorCredentials,
    id: &str,
    label: Content,
    aria_label: AriaLabelProvider,
) -> PaymentMethodDescriptor {
    let id = PaymentMethodId::from(id);
    let namespace = store.namespace().to_string();

    PaymentMethodDescriptor {
        label,
        active_form: Content::Form {
            namespace: namespace.clone(),
            fields: vec![customer_name_field()],
        },
        submit_control: Content::PayButton {
            namespace: namespace.clone(),
        },
        inactive_summary: Content::Summary {
            namespace: namespace.clone(),
            field: CUSTOMER_NAME,
        },
        aria_label,
        submitter: Some(Arc::new(RedirectSubmitter::new(
            id.clone(),
            namespace,
            credentials.clone(),
        ))),
        id,
    }
}

pub fn create_eps_method(
    store: &MethodStore,
    credentials: &ProcessorCredentials,
) -> PaymentMethodDescriptor {
    redirect_method(
        store,
        credentials,
        "eps",
        Content::Label {
            text: "EPS e-Pay",
            translatable: true,
            logo: Some(Logo::Eps),
        },
        Arc::new(|translator: &dyn Translate| translator.translate("EPS e-Pay")),
    )
}

pub fn create_wechat_method(
    store: &MethodStore,
    credentials: &ProcessorCredentials,
) -> PaymentMethodDescriptor {
    // The brand name is never localized.
    redirect_method(
        store,
        credentials,
        "wechat",
        Content::Label {
            text: "WeChat Pay",
            translatable: false,
            logo: Some(Logo::WeChat),
        },
        Arc::new(|_: &dyn Translate| "WeChat Pay".to_string()),
    )
}

/// A method listed at checkout whose submit does nothing yet.
pub fn create_placeholder_method(id: &str, label: &'static str) -> PaymentMethodDescriptor {
    PaymentMethodDescriptor {
        id: PaymentMethodId::from(id),
        label: Content::Label {
            text: label,
            translatable: false,
            logo: None,
        },
        active_form: Content::Empty,
        submit_control: Content::Empty,
        inactive_summary: Content::Empty,
        aria_label: Arc::new(move |_: &dyn Translate| label.to_string()),
        submitter: None,
    }
}

/// Creates the stores and descriptors for `methods` and registers them in
/// the given order.
pub async fn load_payment_methods(
    registry: &mut PaymentMethodRegistry,
    stores: &dyn StateContainer,
    methods: &[PaymentMethodId],
    credentials: &ProcessorCredentials,
) -> Result<()> {
    for id in methods {
        // Checked before the store exists so a duplicate leaves no trace.
        if registry.contains(id) {
            return Err(CheckoutError::DuplicateIdError(id.clone()));
        }
        let descriptor = match id.as_str() {
            "eps" => {
                let store = create_eps_store();
                let descriptor = create_eps_method(&store, credentials);
                stores.register(store).await?;
                descriptor
            }
            "wechat" => {
                let store = create_wechat_store();
                let descriptor = create_wechat_method(&store, credentials);
                stores.register(store).await?;
                descriptor
            }
            "apple-pay" => create_placeholder_method("apple-pay", "Apple Pay"),
            "card" => create_placeholder_method("card", "Credit Card"),
            "paypal" => create_placeholder_method("paypal", "Paypal"),
            _ => return Err(CheckoutError::NotFoundError(id.clone())),
        };
        registry.register(descriptor)?;
    }
    tracing::debug!(count = registry.len(), "payment methods loaded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::InMemoryStateContainer;
    use crate::infrastructure::translator::CatalogTranslator;
    use std::collections::HashMap;

    #[test]
    fn test_eps_descriptor_binds_store() {
        let store = create_eps_store();
        let eps = create_eps_method(&store, &ProcessorCredentials::default());

        assert_eq!(eps.id.as_str(), "eps");
        assert!(eps.submitter.is_some());
        assert_eq!(
            eps.inactive_summary,
            Content::Summary {
                namespace: "eps".into(),
                field: CUSTOMER_NAME
            }
        );
        match &eps.active_form {
            Content::Form { namespace, fields } => {
                assert_eq!(namespace, "eps");
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].name, CUSTOMER_NAME);
            }
            other => panic!("unexpected form content {:?}", other),
        }
        // The bank field exists in the store even though the form omits it.
        assert!(store.get_field(CUSTOMER_BANK).is_ok());
    }

    #[test]
    fn test_aria_labels() {
        let german = CatalogTranslator::new(HashMap::from([(
            "EPS e-Pay".to_string(),
            "EPS Überweisung".to_string(),
        )]));
        let credentials = ProcessorCredentials::default();

        let eps = create_eps_method(&create_eps_store(), &credentials);
        assert_eq!(eps.aria_label(&german), "EPS Überweisung");

        let wechat = create_wechat_method(&create_wechat_store(), &credentials);
        assert_eq!(wechat.aria_label(&german), "WeChat Pay");

        let card = create_placeholder_method("card", "Credit Card");
        assert_eq!(card.aria_label(&german), "Credit Card");
        assert!(card.submitter.is_none());
    }

    #[tokio::test]
    async fn test_load_payment_methods_in_order() {
        let mut registry = PaymentMethodRegistry::new();
        let stores = InMemoryStateContainer::new();
        let methods: Vec<PaymentMethodId> = ["paypal", "wechat", "eps"]
            .into_iter()
            .map(PaymentMethodId::from)
            .collect();

        load_payment_methods(
            &mut registry,
            &stores,
            &methods,
            &ProcessorCredentials::default(),
        )
        .await
        .unwrap();

        let ids: Vec<&str> = registry.list().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["paypal", "wechat", "eps"]);
        assert!(stores.get_state("eps").await.is_ok());
        assert!(stores.get_state("wechat").await.is_ok());
    }

    #[tokio::test]
    async fn test_load_unknown_method_fails() {
        let mut registry = PaymentMethodRegistry::new();
        let stores = InMemoryStateContainer::new();
        let err = load_payment_methods(
            &mut registry,
            &stores,
            &[PaymentMethodId::from("bitcoin")],
            &ProcessorCredentials::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CheckoutError::NotFoundError(_)));
    }

    #[tokio::test]
    async fn test_load_repeated_eps_is_duplicate_id() {
        let mut registry = PaymentMethodRegistry::new();
        let stores = InMemoryStateContainer::new();
        let err = load_payment_methods(
            &mut registry,
            &stores,
            &[PaymentMethodId::from("eps"), PaymentMethodId::from("eps")],
            &ProcessorCredentials::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CheckoutError::DuplicateIdError(id) if id.as_str() == "eps"));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_id_leaves_stores_untouched() {
        let mut registry = PaymentMethodRegistry::new();
        let credentials = ProcessorCredentials::default();
        registry
            .register(create_eps_method(&create_eps_store(), &credentials))
            .unwrap();
        let stores = InMemoryStateContainer::new();

        let err = load_payment_methods(
            &mut registry,
            &stores,
            &[PaymentMethodId::from("eps")],
            &credentials,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CheckoutError::DuplicateIdError(_)));
        assert!(matches!(
            stores.get_state("eps").await,
            Err(CheckoutError::StoreNotFoundError(_))
        ));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_load_twice_rejects_duplicates() {
        let mut registry = PaymentMethodRegistry::new();
        let stores = InMemoryStateContainer::new();
        let methods = [PaymentMethodId::from("card")];
        let credentials = ProcessorCredentials::default();

        load_payment_methods(&mut registry, &stores, &methods, &credentials)
            .await
            .unwrap();
        let err = load_payment_methods(&mut registry, &stores, &methods, &credentials)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::DuplicateIdError(_)));
        assert_eq!(registry.len(), 1);
    }
}
