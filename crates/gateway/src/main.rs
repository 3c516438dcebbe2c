//! Same-origin gateway for the price monitoring dashboard: serves the built
//! dashboard and relays `/api/proxy/*` and `/api/auth/*` to the price-sync
//! API.

pub mod proxy;
pub mod routes;
pub mod shared;
pub mod system;

#[cfg(test)]
pub(crate) mod test_support;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use tokio::net::TcpListener;

    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    let addr = config.listen_addr()?;
    tracing::info!("Upstream API: {}", config.api_url());

    let state = routes::AppState::new(config)?;
    let app = routes::configure_routes(state);

    tracing::info!("Attempting to bind gateway to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Gateway successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Set GATEWAY_PORT or free the port.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
