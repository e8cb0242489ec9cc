//! Shared fixtures for integration tests
#![allow(dead_code)]

use serde_json::{json, Value};
use strategy_console::strategy::types::{
    ChartInterval, ChartType, Condition, InstrumentRef, OrderLeg, Strategy, StrategyStatus,
    StrategyType,
};

/// A fully-populated strategy record as the store returns it
pub fn strategy_record(id: &str, name: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "type": "indicator_based",
        "status": status,
        "created_by": {
            "_id": "u1",
            "username": "trader1",
            "email": "trader1@example.com"
        },
        "instruments": ["NIFTY50", {"symbol": "BANKNIFTY", "name": "Bank Nifty"}],
        "order_legs": [
            {
                "orderType": "SELL",
                "optionType": "PE",
                "expiryType": "Weekly",
                "strikeType": "OTM",
                "strikeValue": "150",
                "quantity": 50,
                "stopLoss": {"type": "points", "value": 1500, "trigger": "price"},
                "target": {"type": "points", "value": 800, "trigger": "price"}
            }
        ],
        "trading_days": ["Monday", "Wednesday"],
        "square_off_time": "15:15",
        "longEntryConditions": [
            {"indicator": "RSI", "comparator": "<", "value": "30"}
        ],
        "shortEntryConditions": [],
        "exitConditions": [
            {"indicator": "RSI", "comparator": ">", "value": "70"}
        ],
        "chartType": "Candlestick",
        "interval": "5m",
        "useCombinedChart": false,
        "createdAt": "2024-05-01T09:30:00Z",
        "updatedAt": "2024-05-02T10:00:00Z"
    })
}

/// A record persisted before the nested risk rules existed: the leg carries
/// no stop-loss, the condition no threshold
pub fn legacy_strategy_record(id: &str) -> Value {
    json!({
        "_id": id,
        "name": "Legacy Momentum",
        "type": "time_based",
        "status": "paused",
        "instruments": ["SENSEX"],
        "order_legs": [
            {"orderType": "BUY", "quantity": 25}
        ],
        "trading_days": ["Friday"],
        "longEntryConditions": [
            {"indicator": "EMA", "comparator": ">"}
        ]
    })
}

/// Wrap records in the standard list envelope with pagination
pub fn list_envelope(records: Vec<Value>, page: u32, pages: u32, total: u64) -> Value {
    json!({
        "success": true,
        "data": records,
        "pagination": {"page": page, "pages": pages, "total": total, "limit": 10}
    })
}

/// Wrap a single payload in the standard envelope
pub fn data_envelope(data: Value) -> Value {
    json!({"success": true, "data": data})
}

pub fn stats_envelope() -> Value {
    json!({
        "success": true,
        "data": {
            "totalStrategies": 42,
            "activeStrategies": 30,
            "pausedStrategies": 8,
            "totalUsers": 12,
            "timeBasedStrategies": 25,
            "indicatorBasedStrategies": 17
        }
    })
}

pub fn orders_envelope() -> Value {
    json!({
        "success": true,
        "data": [
            {
                "_id": "ord1",
                "tradingSymbol": "NIFTY2451822500PE",
                "transactionType": "SELL",
                "quantity": 50,
                "orderStatus": "COMPLETE",
                "createdAt": "2024-05-01T09:30:00Z"
            },
            {
                "_id": "ord2",
                "tradingSymbol": "NIFTY2451822500PE",
                "transactionType": "BUY",
                "quantity": 50,
                "orderStatus": "PENDING",
                "createdAt": "2024-05-01T15:10:00Z"
            }
        ]
    })
}

/// A complete domain aggregate for tests that skip the wire
pub fn sample_strategy(id: &str) -> Strategy {
    Strategy {
        id: id.to_string(),
        name: "Weekly Short Straddle".to_string(),
        strategy_type: StrategyType::IndicatorBased,
        status: StrategyStatus::Active,
        created_by: None,
        instruments: vec![InstrumentRef::symbol("NIFTY50")],
        order_legs: vec![OrderLeg::default()],
        trading_days: vec!["Monday".to_string()],
        square_off_time: "15:15".to_string(),
        long_entry_conditions: vec![Condition::new("RSI", "<", "30")],
        short_entry_conditions: vec![],
        exit_conditions: vec![Condition::new("RSI", ">", "70")],
        chart_type: ChartType::Candlestick,
        interval: ChartInterval::Min5,
        use_combined_chart: false,
        created_at: None,
        updated_at: None,
    }
}
