use mail_hopper::aggregator::{calculate_delay, generate_trail, total_delay};
use mail_hopper::parser::normalize::cleanup_text;
use mail_hopper::parser::{extract_protocol, extract_timestring, get_timestamp};
use proptest::prelude::*;

proptest! {
    #[test]
    fn cleanup_text_is_idempotent(s in "\\PC*") {
        let once = cleanup_text(&s);
        prop_assert_eq!(cleanup_text(&once), once.clone());
    }

    #[test]
    fn cleanup_text_with_folding(s in "[a-z \\t\\r\\n]{0,64}") {
        let cleaned = cleanup_text(&s);
        prop_assert!(!cleaned.contains("  "));
        prop_assert!(!cleaned.contains('\n'));
        prop_assert_eq!(cleaned.trim(), cleaned.as_str());
    }

    #[test]
    fn delay_is_clamped(current in any::<i64>(), previous in any::<i64>()) {
        let delay = calculate_delay(Some(current), Some(previous));
        if current <= previous {
            prop_assert_eq!(delay, 0);
        } else {
            prop_assert!(delay > 0);
        }
        prop_assert_eq!(calculate_delay(None, Some(previous)), 0);
        prop_assert_eq!(calculate_delay(Some(current), None), 0);
    }

    #[test]
    fn protocol_needs_with_or_via(host in "[a-z]{1,12}\\.example", id in "[A-Z0-9]{4,10}") {
        let header = format!("from {} by mx.example id {}; Thu, 5 Jan 2023 10:00:00 +0000", host, id);
        prop_assert_eq!(extract_protocol(&header), "");
    }

    #[test]
    fn timestamp_is_deterministic(
        offset in -1200i32..=1400,
        seconds in 0u32..60,
        tail in "[A-Za-z ;]{0,8}",
    ) {
        let header = format!(
            "by mx.example; Thu, 5 Jan 2023 10:00:{:02} {:+05}{}",
            seconds, offset, tail
        );
        let first = get_timestamp(extract_timestring(&header).as_deref());
        let second = get_timestamp(extract_timestring(&header).as_deref());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn total_delay_is_sum_of_delays(stamps in prop::collection::vec(0i64..2_000_000_000, 0..8)) {
        let received: Vec<String> = stamps
            .iter()
            .map(|ts| {
                let stamp = chrono::DateTime::from_timestamp(*ts, 0).unwrap();
                format!("by h.example; {}", stamp.to_rfc2822())
            })
            .collect();

        let trail = generate_trail(Some(received.as_slice())).unwrap();
        let sum: u64 = trail.iter().map(|hop| hop.delay).sum();

        prop_assert_eq!(total_delay(Some(trail.as_slice())), sum);
        if let Some(first) = trail.first() {
            prop_assert_eq!(first.delay, 0);
        }
    }
}
