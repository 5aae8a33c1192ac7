use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ServerBuilder;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, warn};

use super::adapter::HyperGatewayAdapter;

/// Accept connections forever, serving each one on its own task.
pub async fn serve(listener: TcpListener, adapter: Arc<HyperGatewayAdapter>) {
    loop {
        let (stream, remote) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("Failed to accept connection: {}", e);
                continue;
            }
        };

        let io = TokioIo::new(stream);
        let adapter = adapter.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req| {
                let adapter = adapter.clone();
                async move { Ok::<_, hyper::Error>(adapter.handle(req).await) }
            });

            if let Err(e) = ServerBuilder::new(TokioExecutor::new())
                .serve_connection(io, service)
                .await
            {
                debug!("Connection from {} closed with error: {}", remote, e);
            }
        });
    }
}
