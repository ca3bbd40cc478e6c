// Host-side tests for the engine slot.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod slot {
    include!("../src/slot.rs");
}

use slot::EngineSlot;

#[test]
fn callbacks_reach_the_value_until_closed() {
    let slot = EngineSlot::default();
    assert!(!slot.with(|v: &mut u32| *v += 1));
    assert!(slot.put(1u32).is_ok());

    assert!(slot.with(|v| *v += 1));
    assert!(slot.close());
    assert!(!slot.close());

    let mut ran = false;
    assert!(!slot.with(|_| ran = true));
    assert!(!ran);
    assert_eq!(slot.take_if_closed(), Some(2));
    assert_eq!(slot.take_if_closed(), None);
}

#[test]
fn close_while_busy_leaves_the_value_for_a_later_take() {
    let slot = EngineSlot::default();
    assert!(slot.put(String::from("engine")).is_ok());

    slot.with(|_| {
        assert!(slot.close());
        assert_eq!(slot.take_if_closed(), None);
        // nested callbacks are refused while the value is borrowed
        assert!(!slot.with(|_| unreachable!()));
    });

    // the slot stays closed even though the value is still stored
    assert!(slot.is_closed());
    assert!(!slot.with(|_| unreachable!()));
    assert_eq!(slot.take_if_closed().as_deref(), Some("engine"));
}

#[test]
fn closed_slot_hands_a_late_value_back() {
    let slot = EngineSlot::default();
    slot.close();
    assert_eq!(slot.put(7u8), Err(7));
    assert!(slot.take_if_closed().is_none());
}
