use paymethods::domain::line_item::Total;
use paymethods::domain::ports::{
    PaymentRequest, ProcessorCredentials, StateContainerBox, TransactionProcessorBox,
};
use paymethods::domain::store::{CUSTOMER_NAME, StoreAction, create_wechat_store};
use paymethods::infrastructure::in_memory::InMemoryStateContainer;
use paymethods::infrastructure::scripted::{ScriptedProcessor, ScriptedResponse};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

#[tokio::test]
async fn test_ports_as_trait_objects() {
    let stores: StateContainerBox = Arc::new(InMemoryStateContainer::new());
    let processor: TransactionProcessorBox = Arc::new(ScriptedProcessor::new(HashMap::from([(
        "wechat".to_string(),
        ScriptedResponse {
            redirect_url: Some("https://pay.example/w".into()),
            ..Default::default()
        },
    )])));

    // Verify Send + Sync by spawning tasks
    let store_handle = tokio::spawn({
        let stores = Arc::clone(&stores);
        async move {
            stores.register(create_wechat_store()).await.unwrap();
            stores
                .dispatch("wechat", StoreAction::set(CUSTOMER_NAME, "Jane"))
                .await
                .unwrap();
            stores.get_state("wechat").await.unwrap()
        }
    });

    let processor_handle = tokio::spawn(async move {
        processor
            .submit(PaymentRequest {
                payment_method_id: "wechat".into(),
                credentials: ProcessorCredentials::default(),
                customer_fields: BTreeMap::new(),
                items: Vec::new(),
                total: Total::from_items(&[], "EUR").unwrap(),
            })
            .await
            .unwrap()
    });

    let state = store_handle.await.unwrap();
    assert_eq!(state[CUSTOMER_NAME].value, "Jane");

    let response = processor_handle.await.unwrap();
    assert_eq!(response.redirect_url.as_deref(), Some("https://pay.example/w"));

    // The spawned task and this handle share one container.
    assert!(stores.get_state("wechat").await.unwrap()[CUSTOMER_NAME].is_touched);
}
