use axum::routing::get;
use axum::Router;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::{rest, session, AppState};

#[derive(Clone)]
pub struct BookingApp {
    pub state: AppState,
    pub router: Router<()>,
}

impl BookingApp {
    /// All routes, wrapped in request-id and trace middleware.
    pub fn new(state: AppState) -> Self {
        let routes = Router::new()
            .merge(session::router())
            .merge(rest::bookings_router())
            .merge(rest::notifications_router())
            .route("/health", get(|| async { "ok" }))
            .with_state(state.clone());

        let router = routes.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        );

        Self { state, router }
    }

    pub async fn listen<A>(self, addr: A) -> anyhow::Result<()>
    where
        A: ToSocketAddrs,
    {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "listening");
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
