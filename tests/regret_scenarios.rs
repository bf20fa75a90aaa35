//! Scenario tests for the regret engine.
//!
//! Each test drives the public API end to end: capture a signal, build an
//! order and a history, evaluate, and check the presentation contract.

use chrono::{FixedOffset, TimeZone};

use regret_engine::domain::emotion::{Emotion, EmotionalSignal};
use regret_engine::domain::foundation::{CafeId, ItemId, OrderId, Timestamp};
use regret_engine::domain::history::{HistoricalOrderRecord, OrderOutcome};
use regret_engine::domain::order::{OrderCandidate, OrderLine};
use regret_engine::domain::regret::{Feature, RegretEngine, RegretEngineConfig, RiskLevel};

// =============================================================================
// Fixtures
// =============================================================================

fn line(name: &str, calories: i32, price: f64, quantity: u32) -> OrderLine {
    OrderLine {
        item_id: ItemId::new(),
        name: name.to_string(),
        category: "mains".to_string(),
        calories,
        price,
        quantity,
    }
}

/// Captures a signal at a local time in UTC+2.
fn capture(emotion: Emotion, intensity: u8, hour: u32, minute: u32) -> EmotionalSignal {
    let tz = FixedOffset::east_opt(2 * 3600).unwrap();
    let local = tz.with_ymd_and_hms(2025, 3, 8, hour, minute, 0).unwrap();
    EmotionalSignal::capture(emotion, intensity, &local).unwrap()
}

/// One order per day going back from 2025-03-07, newest first.
fn daily_history(
    count: i64,
    calories: i32,
    price: f64,
    outcome_for: impl Fn(i64) -> OrderOutcome,
    emotion: Option<EmotionalSignal>,
) -> Vec<HistoricalOrderRecord> {
    let latest = Timestamp::from_rfc3339("2025-03-07T19:00:00Z").unwrap();
    (0..count)
        .map(|day| {
            let record = HistoricalOrderRecord::new(
                OrderId::new(),
                CafeId::new(),
                latest.minus_days(day),
                calories,
                price,
                outcome_for(day),
            );
            match &emotion {
                Some(signal) => record.with_emotion(signal.clone()),
                None => record,
            }
        })
        .collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn sad_late_night_binge_with_regretful_history_is_high_risk() {
    let engine = RegretEngine::default();
    let signal = capture(Emotion::Sadness, 5, 1, 20);
    assert_eq!(signal.hour, 1);

    // 1800 kcal over the user's 600 kcal daily average.
    let order = OrderCandidate::from_lines(
        CafeId::new(),
        vec![
            line("Large Pepperoni Pizza", 1600, 9.0, 1),
            line("Garlic Knots", 400, 2.5, 2),
        ],
    )
    .unwrap();
    assert_eq!(order.total_calories, 2400);

    let history = daily_history(
        10,
        600,
        order.total_price,
        |day| {
            if day < 6 {
                OrderOutcome::NegativeReview
            } else {
                OrderOutcome::Neutral
            }
        },
        Some(signal.clone()),
    );

    let assessment = engine.assess(&order, Some(&signal), &history).unwrap();
    let prediction = &assessment.prediction;

    assert_eq!(prediction.risk_level(), RiskLevel::High);
    assert!(prediction.risk_score().value() >= 65);
    assert_eq!(assessment.features.relevant_history_count, 10);
    assert_eq!(assessment.features.negative_outcome_count, 6);
    assert_eq!(prediction.confidence().value(), 80);

    assert!(prediction
        .reasons()
        .iter()
        .any(|r| r.contains("calories")));
    assert!(prediction
        .reasons()
        .iter()
        .any(|r| r.contains("You regretted 6 of your last 10")));
    assert!(prediction
        .suggestions()
        .iter()
        .any(|s| s.contains("wait") || s.contains("lighter option")));
    assert!(prediction.is_actionable());
}

#[test]
fn cold_start_at_average_order_is_suppressed() {
    let engine = RegretEngine::default();
    let order =
        OrderCandidate::from_lines(CafeId::new(), vec![line("Chicken Wrap", 650, 11.0, 1)])
            .unwrap();

    let prediction = engine.evaluate(&order, None, &[]).unwrap();

    assert_eq!(prediction.risk_level(), RiskLevel::Low);
    assert!(prediction.confidence().value() <= 40);
    assert!(prediction.reasons().is_empty());
    assert!(!prediction.is_actionable());
}

#[test]
fn usual_order_with_calm_history_is_low_but_confident() {
    let engine = RegretEngine::default();
    let signal = capture(Emotion::Happiness, 3, 12, 30);
    let order =
        OrderCandidate::from_lines(CafeId::new(), vec![line("Poke Bowl", 700, 14.0, 1)]).unwrap();
    let history = daily_history(12, 700, 14.0, |_| OrderOutcome::Reordered, Some(signal.clone()));

    let prediction = engine.evaluate(&order, Some(&signal), &history).unwrap();

    assert_eq!(prediction.risk_level(), RiskLevel::Low);
    assert_eq!(prediction.confidence().value(), 88);
    assert!(prediction.reasons().is_empty());
    // Low but well-evidenced results are still shown.
    assert!(prediction.is_actionable());
}

#[test]
fn high_score_without_history_has_capped_confidence() {
    let engine = RegretEngine::default();
    let signal = capture(Emotion::Anger, 5, 23, 45);
    let order =
        OrderCandidate::from_lines(CafeId::new(), vec![line("Family Bucket", 3200, 45.0, 1)])
            .unwrap();

    let prediction = engine.evaluate(&order, Some(&signal), &[]).unwrap();

    // 32 emotional + 15 time; no history means no deviation.
    assert_eq!(prediction.risk_score().value(), 47);
    assert_eq!(prediction.risk_level(), RiskLevel::Medium);
    assert!(prediction.confidence().value() <= 40);
    assert!(!prediction.reasons().is_empty());
}

#[test]
fn regret_under_a_different_emotion_is_not_counted() {
    let engine = RegretEngine::default();
    let now = capture(Emotion::Fear, 3, 19, 0);
    let then = capture(Emotion::Disgust, 3, 19, 0);
    let order =
        OrderCandidate::from_lines(CafeId::new(), vec![line("Ramen", 800, 16.0, 1)]).unwrap();
    let history = daily_history(8, 800, 16.0, |_| OrderOutcome::Cancelled, Some(then));

    let assessment = engine.assess(&order, Some(&now), &history).unwrap();

    assert_eq!(assessment.features.relevant_history_count, 0);
    assert_eq!(assessment.features.past_negative_outcome_rate, 0.0);
    assert_eq!(assessment.prediction.confidence().value(), 40);
}

#[test]
fn only_the_configured_window_is_considered() {
    let config = RegretEngineConfig {
        history_window_size: 5,
        ..Default::default()
    };
    let engine = RegretEngine::new(config).unwrap();
    let order =
        OrderCandidate::from_lines(CafeId::new(), vec![line("Salad", 500, 12.0, 1)]).unwrap();
    // Five recent good orders, then older cancellations.
    let history = daily_history(
        15,
        500,
        12.0,
        |day| {
            if day < 5 {
                OrderOutcome::Reordered
            } else {
                OrderOutcome::Cancelled
            }
        },
        None,
    );

    let assessment = engine.assess(&order, None, &history).unwrap();

    assert_eq!(assessment.features.relevant_history_count, 5);
    assert_eq!(assessment.features.past_negative_outcome_rate, 0.0);
    assert_eq!(assessment.breakdown.points(Feature::PastNegativeOutcomes), 0.0);
}

#[test]
fn prediction_serializes_to_presentation_contract() {
    let engine = RegretEngine::default();
    let signal = capture(Emotion::Sadness, 4, 0, 10);
    let order =
        OrderCandidate::from_lines(CafeId::new(), vec![line("Brownie Sundae", 900, 8.0, 2)])
            .unwrap();

    let prediction = engine.evaluate(&order, Some(&signal), &[]).unwrap();
    let json = serde_json::to_value(&prediction).unwrap();

    let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(
        keys,
        vec!["confidence", "reasons", "riskLevel", "riskScore", "suggestions"]
    );
    assert_eq!(json["riskLevel"], "medium");
    assert!(json["riskScore"].is_u64());
}
