use super::*;
use crate::clock::ManualClock;
use chrono::{TimeZone, Utc};

fn store_with_clock(ttl_seconds: u64) -> (PayloadStore, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()));
    let store = PayloadStore::with_clock(&StoreConfig { ttl_seconds }, clock.clone());
    (store, clock)
}

fn pdf(platform: Platform) -> Payload {
    Payload::pdf(b"%PDF-1.7".to_vec(), "paper.pdf", "Summarize", platform)
}

#[test]
fn test_write_then_read_consumes() {
    let (store, clock) = store_with_clock(300);
    store.write(Platform::ChatGpt, pdf(Platform::ChatGpt));

    let payload = store.read(Platform::ChatGpt).into_payload().unwrap();
    assert_eq!(payload.created_at, clock.now());
    assert_eq!(payload.prompt, "Summarize");

    assert_eq!(store.read(Platform::ChatGpt), ReadOutcome::Absent);
    assert!(store.is_empty());
}

#[test]
fn test_read_kind_leaves_other_kind_in_place() {
    let (store, _clock) = store_with_clock(300);
    store.write(Platform::Claude, pdf(Platform::Claude));

    assert_eq!(store.read_kind(Platform::Claude, PayloadKind::Transcript), ReadOutcome::Absent);
    assert_eq!(store.peek_kind(Platform::Claude), Some(PayloadKind::Pdf));

    let payload = store.read_kind(Platform::Claude, PayloadKind::Pdf).into_payload().unwrap();
    assert_eq!(payload.kind(), PayloadKind::Pdf);
    assert!(store.is_empty());
}

#[test]
fn test_read_kind_expired_entry_is_removed() {
    let (store, clock) = store_with_clock(300);
    store.write(Platform::ChatGpt, Payload::transcript("captions", "Explain", Platform::ChatGpt));
    clock.advance(TimeDelta::seconds(300));

    assert_eq!(
        store.read_kind(Platform::ChatGpt, PayloadKind::Transcript),
        ReadOutcome::Expired
    );
    assert!(store.is_empty());
}

#[test]
fn test_write_stamps_store_clock() {
    let (store, clock) = store_with_clock(300);
    let stale = pdf(Platform::Claude).with_created_at(Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap());
    store.write(Platform::Claude, stale);

    let payload = store.read(Platform::Claude).into_payload().unwrap();
    assert_eq!(payload.created_at, clock.now());
}

#[test]
fn test_slots_are_per_platform() {
    let (store, _) = store_with_clock(300);
    store.write(Platform::ChatGpt, pdf(Platform::ChatGpt));
    store.write(Platform::Claude, Payload::transcript("hello", "Summarize", Platform::Claude));

    assert_eq!(store.len(), 2);
    assert_eq!(store.peek_kind(Platform::ChatGpt), Some(PayloadKind::Pdf));
    assert_eq!(store.peek_kind(Platform::Claude), Some(PayloadKind::Transcript));

    assert!(store.read(Platform::Claude).into_payload().is_some());
    assert_eq!(store.peek_kind(Platform::Claude), None);
    assert_eq!(store.peek_kind(Platform::ChatGpt), Some(PayloadKind::Pdf));
}

#[test]
fn test_later_write_wins() {
    let (store, _) = store_with_clock(300);
    store.write(Platform::ChatGpt, pdf(Platform::ChatGpt));
    store.write(
        Platform::ChatGpt,
        Payload::transcript("captions", "Key points", Platform::ChatGpt),
    );

    assert_eq!(store.len(), 1);
    let payload = store.read(Platform::ChatGpt).into_payload().unwrap();
    assert_eq!(payload.kind(), PayloadKind::Transcript);
    assert_eq!(payload.prompt, "Key points");
}

#[test]
fn test_expiry_boundary() {
    let (store, clock) = store_with_clock(300);

    store.write(Platform::ChatGpt, pdf(Platform::ChatGpt));
    clock.advance(TimeDelta::seconds(299));
    assert!(matches!(store.read(Platform::ChatGpt), ReadOutcome::Payload(_)));

    store.write(Platform::ChatGpt, pdf(Platform::ChatGpt));
    clock.advance(TimeDelta::seconds(300));
    assert_eq!(store.read(Platform::ChatGpt), ReadOutcome::Expired);
    assert_eq!(store.read(Platform::ChatGpt), ReadOutcome::Absent);
}

#[test]
fn test_purge_expired() {
    let (store, clock) = store_with_clock(60);
    store.write(Platform::ChatGpt, pdf(Platform::ChatGpt));
    clock.advance(TimeDelta::seconds(45));
    store.write(Platform::Claude, pdf(Platform::Claude));
    clock.advance(TimeDelta::seconds(30));

    assert_eq!(store.purge_expired(), 1);
    assert_eq!(store.peek_kind(Platform::ChatGpt), None);
    assert_eq!(store.peek_kind(Platform::Claude), Some(PayloadKind::Pdf));
    assert_eq!(store.purge_expired(), 0);
}

#[test]
fn test_default_ttl_is_five_minutes() {
    assert_eq!(PayloadStore::default().ttl(), TimeDelta::minutes(5));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reads_single_consumer() {
    let store = Arc::new(PayloadStore::default());
    store.write(Platform::Claude, pdf(Platform::Claude));

    let readers: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.read(Platform::Claude) })
        })
        .collect();

    let mut claimed = 0;
    for reader in readers {
        match reader.await.unwrap() {
            ReadOutcome::Payload(_) => claimed += 1,
            ReadOutcome::Absent => {}
            ReadOutcome::Expired => panic!("fresh payload reported expired"),
        }
    }
    assert_eq!(claimed, 1);
}
