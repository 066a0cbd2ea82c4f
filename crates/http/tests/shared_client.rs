//! Cross-thread behavior of the public client surface.

use std::{
    sync::{Arc, Barrier},
    thread,
    time::Duration,
};

use chatwithme_http::ClientProvider;

#[test]
fn simultaneous_first_callers_get_identity_equal_clients() {
    let provider = Arc::new(ClientProvider::new());
    let barrier = Arc::new(Barrier::new(2));

    let mut handles = Vec::new();
    for _ in 0..2 {
        let provider = provider.clone();
        let barrier = barrier.clone();
        handles.push(thread::spawn(move || {
            barrier.wait();
            provider.get()
        }));
    }

    let a = handles.pop().unwrap().join().unwrap().unwrap();
    let b = handles.pop().unwrap().join().unwrap().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn client_reports_deployment_config() {
    let provider = ClientProvider::new();
    let client = provider.get().unwrap();

    assert_eq!(client.config().connect_timeout(), Duration::from_secs(15));
    assert_eq!(client.config().write_timeout(), Duration::from_secs(10));
    assert_eq!(client.config().read_timeout(), Duration::from_secs(10));
    assert_eq!(client.config().max_requests(), 200);
    assert_eq!(client.config().max_requests_per_host(), 200);
    assert_eq!(client.gate().available(), 200);
}

#[tokio::test]
async fn gate_counts_in_flight_requests() {
    let provider = ClientProvider::new();
    let client = provider.get().unwrap();

    let permit = client.gate().acquire(Some("chat.internal")).await.unwrap();
    assert_eq!(client.gate().available(), 199);
    assert_eq!(client.gate().available_for_host("chat.internal"), Some(199));

    drop(permit);
    assert_eq!(client.gate().available(), 200);
    assert_eq!(client.gate().available_for_host("chat.internal"), Some(200));
}
