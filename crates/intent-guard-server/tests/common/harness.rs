//! Serves the real router over a tiny classifier on an ephemeral port.

use intent_guard::BullyingClassifier;
use intent_guard::mock::{tiny_classifier, zero_classifier};
use intent_guard_server::gateway::{HandlerState, create_router_with_state};
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Weights the served classifier is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestWeights {
    /// Every head outputs zero: not bullying, intent 50, severity 0.
    #[default]
    Zero,
    /// Random tiny weights loaded from safetensors on disk.
    Random,
}

pub struct TestServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    _model_dir: Option<TempDir>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn build_classifier(weights: TestWeights) -> (BullyingClassifier, Option<TempDir>) {
    match weights {
        TestWeights::Zero => (
            zero_classifier(5).expect("zero classifier should build"),
            None,
        ),
        TestWeights::Random => {
            let (classifier, dir) = tiny_classifier(5).expect("tiny classifier should load");
            (classifier, Some(dir))
        }
    }
}

/// Binds before spawning, so the server accepts connections as soon as this returns.
pub async fn spawn_test_server(weights: TestWeights) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind an ephemeral port");
    let addr = listener.local_addr().expect("listener has an address");

    let (classifier, model_dir) = build_classifier(weights);
    let app = create_router_with_state(HandlerState::new(Arc::new(classifier)));

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    TestServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        _model_dir: model_dir,
    }
}
