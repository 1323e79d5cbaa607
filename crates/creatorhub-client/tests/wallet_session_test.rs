use creatorhub_client::{ClientError, ExtensionSigner, InMemorySigner, WalletSession};
use creatorhub_test_utils::{sample_address, ScriptedBridge};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn extension_signer_connects_authorized_wallet() {
    let address = sample_address();
    let session = WalletSession::new(Arc::new(ExtensionSigner::new(ScriptedBridge::authorized(
        &address,
    ))));

    assert!(!session.is_connected().await);
    let connected = session.connect().await.expect("connect");

    assert_eq!(connected, address);
    assert_eq!(session.public_key().await, Some(address.clone()));
    assert_eq!(session.require_address().await.unwrap(), address);
    assert!(!session.is_connecting().await);
}

#[tokio::test]
async fn missing_extension_is_unavailable() {
    let session = WalletSession::new(Arc::new(ExtensionSigner::new(
        ScriptedBridge::not_installed(),
    )));

    let err = session.connect().await.unwrap_err();
    assert!(matches!(err, ClientError::WalletUnavailable(_)));
    assert!(!session.is_connected().await);
    assert!(!session.is_connecting().await);
}

#[tokio::test]
async fn extension_error_is_surfaced() {
    let session = WalletSession::new(Arc::new(ExtensionSigner::new(ScriptedBridge::rejecting(
        "User declined access",
    ))));

    match session.connect().await {
        Err(ClientError::WalletRejected(reason)) => assert_eq!(reason, "User declined access"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_extension_address_is_rejected() {
    let mut bridge = ScriptedBridge::authorized(&sample_address());
    bridge.address.address = "not-an-account".to_string();
    let session = WalletSession::new(Arc::new(ExtensionSigner::new(bridge)));

    assert!(matches!(
        session.connect().await,
        Err(ClientError::InvalidAddress(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn connecting_flag_is_held_while_extension_prompts() {
    let address = sample_address();
    let bridge = ScriptedBridge::authorized(&address).with_latency(Duration::from_secs(10));
    let session = Arc::new(WalletSession::new(Arc::new(ExtensionSigner::new(bridge))));

    let task = {
        let session = session.clone();
        tokio::spawn(async move { session.connect().await })
    };

    tokio::time::sleep(Duration::from_millis(1)).await;
    assert!(session.is_connecting().await);
    assert!(!session.is_connected().await);

    task.await.unwrap().expect("connect");
    assert!(!session.is_connecting().await);
    assert!(session.is_connected().await);
}

#[tokio::test(start_paused = true)]
async fn connecting_flag_survives_overlapping_connects() {
    let address = sample_address();
    let bridge = ScriptedBridge::authorized(&address).with_latency(Duration::from_secs(10));
    let session = Arc::new(WalletSession::new(Arc::new(ExtensionSigner::new(bridge))));

    let first = {
        let session = session.clone();
        tokio::spawn(async move { session.connect().await })
    };
    tokio::time::sleep(Duration::from_secs(5)).await;
    let second = {
        let session = session.clone();
        tokio::spawn(async move { session.connect().await })
    };

    first.await.unwrap().expect("first connect");
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(session.is_connected().await);
    assert!(session.is_connecting().await);

    second.await.unwrap().expect("second connect");
    assert!(!session.is_connecting().await);
}

#[tokio::test(start_paused = true)]
async fn cancelled_connect_clears_connecting_flag() {
    let address = sample_address();
    let bridge = ScriptedBridge::authorized(&address).with_latency(Duration::from_secs(10));
    let session = WalletSession::new(Arc::new(ExtensionSigner::new(bridge)));

    let attempt = tokio::time::timeout(Duration::from_secs(1), session.connect()).await;
    assert!(attempt.is_err());
    assert!(!session.is_connecting().await);
    assert!(!session.is_connected().await);
}

#[tokio::test]
async fn disconnect_clears_address() {
    let session = WalletSession::new(Arc::new(InMemorySigner::new(sample_address())));
    session.connect().await.unwrap();
    session.disconnect().await;

    assert!(!session.is_connected().await);
    assert!(matches!(
        session.require_address().await,
        Err(ClientError::WalletNotConnected)
    ));
}

#[tokio::test]
async fn failing_stub_signer() {
    let session = WalletSession::new(Arc::new(InMemorySigner::failing("locked")));
    assert!(matches!(
        session.connect().await,
        Err(ClientError::WalletRejected(_))
    ));
}

#[tokio::test]
async fn reconnect_replaces_previous_address() {
    let first = sample_address();
    let session = WalletSession::new(Arc::new(InMemorySigner::new(first.clone())));
    session.connect().await.unwrap();
    session.disconnect().await;
    assert_eq!(session.connect().await.unwrap(), first);
    assert_eq!(session.public_key().await, Some(first));
}
