/// Property-based tests using proptest
/// Tests invariants that should hold for all inputs
use card_purchase_bridge::models::envelope::{EnvelopeSettings, ResponseEnvelope};
use card_purchase_bridge::models::purchase::{PurchaseRequest, mask_pan};
use card_purchase_bridge::services::normalizer::{normalize, parse_gateway_error};
use proptest::prelude::*;

fn settings() -> EnvelopeSettings {
    EnvelopeSettings {
        currency: "USD".to_string(),
        fee: 1.5,
    }
}

// Property: a PAN never appears in full in an envelope
proptest! {
    #[test]
    fn envelope_never_contains_full_pan(pan in "[0-9]{13,19}", code in prop_oneof![Just(0), Just(600)]) {
        let request = PurchaseRequest {
            pan: pan.clone(),
            terminal_id: "18000377".to_string(),
            ..Default::default()
        };
        let envelope = ResponseEnvelope::for_purchase(&request, 1, &settings(), "Failed", "msg", code);
        let json = serde_json::to_string(&envelope).unwrap();

        prop_assert!(!json.contains(&pan));
        prop_assert_eq!(envelope.pan.as_deref(), Some(&pan[pan.len() - 4..]));
    }

    #[test]
    fn masked_pan_is_absent_or_last_four(pan in "\\PC{0,25}") {
        match mask_pan(&pan) {
            None => prop_assert!(pan.chars().count() <= 4),
            Some(masked) => {
                prop_assert_eq!(masked.chars().count(), 4);
                prop_assert!(pan.ends_with(&masked));
                prop_assert_ne!(masked, pan);
            }
        }
    }
}

// Property: gateway error extraction never panics and leaves separator-free text alone
proptest! {
    #[test]
    fn parse_gateway_error_never_panics(raw in "\\PC*") {
        let _ = parse_gateway_error(&raw);
    }

    #[test]
    fn parse_gateway_error_without_separator_is_identity(raw in "[^:]*") {
        prop_assert_eq!(parse_gateway_error(&raw), raw.as_str());
    }

    #[test]
    fn parse_gateway_error_returns_tail(id in "[a-zA-Z0-9_]{1,20}", reason in "[a-zA-Z .]{0,40}") {
        let raw = format!("Request {}: {}", id, reason);
        prop_assert_eq!(parse_gateway_error(&raw), reason.as_str());
    }

    #[test]
    fn normalize_never_panics(body in proptest::collection::vec(any::<u8>(), 0..256), status in 100u16..600) {
        let _ = normalize(&body, status);
    }
}
