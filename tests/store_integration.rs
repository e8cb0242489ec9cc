//! Integration tests for the strategy store REST client and the list
//! controller, against a mock store.

mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{
    data_envelope, legacy_strategy_record, list_envelope, orders_envelope, stats_envelope,
    strategy_record,
};
use strategy_console::common::types::ListFilter;
use strategy_console::console::StrategyList;
use strategy_console::editor::session::SaveOutcome;
use strategy_console::store::RestStrategyStore;
use strategy_console::strategy::types::{OrderType, StrategyStatus};
use strategy_console::{ConsoleError, StrategyStore};

async fn test_store(server: &MockServer) -> RestStrategyStore {
    RestStrategyStore::new(&server.uri())
        .expect("failed to create store client")
        .with_auth_token("test-token")
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_list_sends_bearer_token_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/strategies"))
        .and(header("authorization", "Bearer test-token"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .and(query_param("status", "active"))
        .and(query_param("search", "straddle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_envelope(
            vec![strategy_record("s1", "Weekly Short Straddle", "active")],
            2,
            3,
            25,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let store = test_store(&server).await;
    let filter = ListFilter {
        page: 2,
        limit: 10,
        status: Some(StrategyStatus::Active),
        search: Some("straddle".to_string()),
    };
    let page = store.list_strategies(&filter).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, "s1");
    assert_eq!(page.page, 2);
    assert_eq!(page.pages, 3);
    assert_eq!(page.total, 25);
}

#[tokio::test]
async fn test_list_repairs_legacy_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/strategies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_envelope(
            vec![legacy_strategy_record("legacy1")],
            1,
            1,
            1,
        )))
        .mount(&server)
        .await;

    let store = test_store(&server).await;
    let page = store.list_strategies(&ListFilter::default()).await.unwrap();

    let strategy = &page.items[0];
    // populated fields survive, missing ones come from the new-leg template
    let leg = &strategy.order_legs[0];
    assert_eq!(leg.order_type, OrderType::Buy);
    assert_eq!(leg.quantity, 25);
    assert_eq!(leg.strike_value, "150");
    assert_eq!(leg.stop_loss.value, dec!(1500));
    // the condition without a threshold is repaired, not dropped
    assert_eq!(strategy.long_entry_conditions.len(), 1);
    assert_eq!(strategy.long_entry_conditions[0].value, "0");
    assert_eq!(strategy.square_off_time, "15:15");
}

#[tokio::test]
async fn test_user_scoped_listing_uses_user_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/u1/strategies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_envelope(
            vec![strategy_record("s1", "User Strategy", "active")],
            1,
            1,
            1,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let store = test_store(&server).await;
    let page = store
        .list_user_strategies("u1", &ListFilter::default())
        .await
        .unwrap();
    assert_eq!(page.items[0].name, "User Strategy");
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/strategies"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let store = test_store(&server).await;
    let err = store
        .list_strategies(&ListFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::Authentication(_)));
}

// ============================================================================
// Stats and orders
// ============================================================================

#[tokio::test]
async fn test_strategy_stats() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/strategies/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_envelope()))
        .mount(&server)
        .await;

    let store = test_store(&server).await;
    let stats = store.strategy_stats().await.unwrap();
    assert_eq!(stats.total_strategies, 42);
    assert_eq!(stats.active_strategies, 30);
    assert_eq!(stats.indicator_based_strategies, 17);
}

#[tokio::test]
async fn test_strategy_orders() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/strategies/s1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(orders_envelope()))
        .mount(&server)
        .await;

    let store = test_store(&server).await;
    let orders = store.strategy_orders("s1").await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].transaction_type, OrderType::Sell);
    assert_eq!(orders[1].order_status, "PENDING");
}

#[tokio::test]
async fn test_orders_for_unknown_strategy_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/strategies/missing/orders"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = test_store(&server).await;
    let err = store.strategy_orders("missing").await.unwrap_err();
    assert!(matches!(err, ConsoleError::StrategyNotFound(id) if id == "missing"));
}

// ============================================================================
// Saving through an editor session
// ============================================================================

#[tokio::test]
async fn test_save_submits_reconciled_payload() {
    let server = MockServer::start().await;

    // the three condition arrays travel reconciled under one key, alongside
    // the legs and scalars
    Mock::given(method("PUT"))
        .and(path("/strategies/s1"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "name": "Renamed Straddle",
            "type": "indicator_based",
            "entry_conditions": {
                "long": [{"indicator": "RSI", "comparator": "<", "value": "25"}],
                "short": [],
                "exit": [{"indicator": "RSI", "comparator": ">", "value": "70"}]
            },
            "order_legs": [
                {"orderType": "SELL", "quantity": 50},
                {"orderType": "SELL", "quantity": 50}
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(data_envelope(strategy_record("s1", "Renamed Straddle", "active"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = test_store(&server).await;
    let mut session = strategy_console::EditorSession::open(common::sample_strategy("s1"));
    session.set_name("Renamed Straddle");
    session.add_leg();
    session
        .update_condition(
            strategy_console::ConditionKind::LongEntry,
            0,
            strategy_console::ConditionField::Value,
            "25",
        )
        .unwrap();

    let outcome = session.save(&store).await.unwrap();
    match outcome {
        SaveOutcome::Committed(updated) => assert_eq!(updated.name, "Renamed Straddle"),
        other => panic!("unexpected outcome: {:?}", other),
    }
    // the committed response became the new source
    assert_eq!(session.source().name, "Renamed Straddle");
    assert!(!session.is_saving());
}

#[tokio::test]
async fn test_failed_save_leaves_session_editable() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/strategies/s1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("store exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let store = test_store(&server).await;
    let mut session = strategy_console::EditorSession::open(common::sample_strategy("s1"));
    session.set_name("Doomed Edit");

    let err = session.save(&store).await.unwrap_err();
    assert!(matches!(err, ConsoleError::InvalidResponse(_)));
    // working state preserved for retry, source untouched
    assert_eq!(session.name(), "Doomed Edit");
    assert_eq!(session.source().name, "Weekly Short Straddle");
    assert!(!session.is_saving());
}

#[tokio::test]
async fn test_save_of_deleted_strategy_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/strategies/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = test_store(&server).await;
    let mut session = strategy_console::EditorSession::open(common::sample_strategy("gone"));
    let err = session.save(&store).await.unwrap_err();
    assert!(matches!(err, ConsoleError::StrategyNotFound(id) if id == "gone"));
}

// ============================================================================
// Status changes and deletion through the list controller
// ============================================================================

#[tokio::test]
async fn test_pause_issues_one_status_call_and_one_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/strategies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_envelope(
            vec![strategy_record("s1", "Weekly Short Straddle", "active")],
            1,
            1,
            1,
        )))
        .expect(2) // initial load plus the one post-pause refresh
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/strategies/s1/status"))
        .and(body_json(json!({"status": "paused"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(test_store(&server).await);
    let mut list = StrategyList::new(store);
    list.refresh().await.unwrap();
    list.pause("s1").await.unwrap();

    assert_eq!(list.items().len(), 1);
}

#[tokio::test]
async fn test_failed_status_change_leaves_list_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/strategies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_envelope(
            vec![strategy_record("s1", "Weekly Short Straddle", "active")],
            1,
            1,
            1,
        )))
        .expect(1) // only the initial load; a failed action must not refresh
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/strategies/s1/status"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(test_store(&server).await);
    let mut list = StrategyList::new(store);
    list.refresh().await.unwrap();

    let err = list.activate("s1").await.unwrap_err();
    assert!(matches!(err, ConsoleError::InvalidResponse(_)));
    assert_eq!(list.items()[0].status, StrategyStatus::Active);
}

#[tokio::test]
async fn test_delete_then_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/strategies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_envelope(vec![], 1, 1, 0)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/strategies/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(test_store(&server).await);
    let mut list = StrategyList::new(store);
    list.delete("s1").await.unwrap();
    assert!(list.items().is_empty());
    assert_eq!(list.total(), 0);
}
