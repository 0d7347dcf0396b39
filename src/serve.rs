//! Static HTTP serving of the generated site

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::utils::osc8_link;

/// Serve the working directory until the process is killed. There is no
/// shutdown path; the accept loop blocks forever.
pub fn run_serve(bind: &str) -> Result<()> {
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("Invalid bind address: {}", bind))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(serve(addr))
}

async fn serve(addr: SocketAddr) -> Result<()> {
    let router = Router::new()
        .fallback_service(ServeDir::new("."))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    log::info!("Serving current directory on {}", addr);
    let url = format!("http://{}:{}/", reachable_host(&addr), addr.port());
    println!("Serving on {}", osc8_link(&url, &url));

    axum::serve(listener, router)
        .await
        .context("Server error")?;
    Ok(())
}

/// Host to print in the clickable URL; 0.0.0.0 is not browsable.
fn reachable_host(addr: &SocketAddr) -> String {
    if addr.ip().is_unspecified() {
        "127.0.0.1".to_string()
    } else {
        addr.ip().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unspecified_bind_prints_loopback() {
        let addr: SocketAddr = "0.0.0.0:8000".parse().unwrap();
        assert_eq!(reachable_host(&addr), "127.0.0.1");
        let addr: SocketAddr = "192.168.1.5:8000".parse().unwrap();
        assert_eq!(reachable_host(&addr), "192.168.1.5");
    }
}
