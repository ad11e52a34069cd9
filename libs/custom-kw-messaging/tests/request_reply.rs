use std::time::Duration;

use custom_kw_messaging::{ACKNOWLEDGEMENT, MessageServer, Reporter};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn every_report_is_acknowledged() {
    let mut server = MessageServer::bind("127.0.0.1:0").await.unwrap();
    let addr = server.local_addr().unwrap();
    let mut received = server.subscribe();

    let token = CancellationToken::new();
    let handle = tokio::spawn(server.run(token.clone()));

    let mut reporter = Reporter::connect("simulation", addr).await.unwrap();
    assert_eq!(reporter.name(), "simulation");
    assert_eq!(reporter.report("realization 3 done").await.unwrap(), ACKNOWLEDGEMENT);
    assert_eq!(reporter.report("multi\nline status").await.unwrap(), ACKNOWLEDGEMENT);

    assert_eq!(received.recv().await.unwrap(), "realization 3 done");
    assert_eq!(received.recv().await.unwrap(), "multi\nline status");

    token.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn reporters_are_served_independently() {
    let mut server = MessageServer::bind("127.0.0.1:0").await.unwrap();
    let addr = server.local_addr().unwrap();
    let mut received = server.subscribe();

    let token = CancellationToken::new();
    let handle = tokio::spawn(server.run(token.clone()));

    let mut first = Reporter::connect("a", addr).await.unwrap();
    let mut second = Reporter::connect("b", addr).await.unwrap();
    assert_eq!(second.report("from b").await.unwrap(), ACKNOWLEDGEMENT);
    assert_eq!(first.report("from a").await.unwrap(), ACKNOWLEDGEMENT);

    let mut messages = vec![received.recv().await.unwrap(), received.recv().await.unwrap()];
    messages.sort();
    assert_eq!(messages, vec!["from a", "from b"]);

    token.cancel();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn report_without_server_fails() {
    let server = MessageServer::bind("127.0.0.1:0").await.unwrap();
    let addr = server.local_addr().unwrap();
    drop(server);

    assert!(Reporter::connect("lost", addr).await.is_err());
}
