//! Integration tests for signal classification

use card_fair_value::{classify, DecisionConfig, PricingError, Signal};
use rust_decimal_macros::dec;

fn cfg() -> DecisionConfig {
    DecisionConfig::new(dec!(0.10), dec!(0.15)).unwrap()
}

#[test]
fn test_classification_boundaries() {
    let cases = [
        (dec!(90), Signal::Buy),
        (dec!(90.01), Signal::Hold),
        (dec!(115), Signal::Sell),
        (dec!(114.99), Signal::Hold),
    ];

    for (market_price, expected) in cases {
        let decision = classify(market_price, dec!(100), &cfg()).unwrap();
        assert_eq!(
            decision.signal, expected,
            "market_price={} deviation={}",
            market_price, decision.deviation_pct
        );
    }
}

#[test]
fn test_deviation_sign() {
    let under = classify(dec!(95), dec!(100), &cfg()).unwrap();
    assert_eq!(under.deviation_pct, dec!(-0.05));

    let over = classify(dec!(105), dec!(100), &cfg()).unwrap();
    assert_eq!(over.deviation_pct, dec!(0.05));
}

#[test]
fn test_invalid_fair_value() {
    assert_eq!(
        classify(dec!(100), dec!(0), &cfg()),
        Err(PricingError::InvalidFairValue(dec!(0)))
    );
}

#[test]
fn test_decision_serializes_like_api_response() {
    let decision = classify(dec!(90), dec!(100), &cfg()).unwrap();
    let json = serde_json::to_value(decision).unwrap();
    assert_eq!(json["signal"], "BUY");
}
