use axum::{
    Router,
    http::{HeaderValue, Method, header::InvalidHeaderValue, request},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use gatehouse_core::{
    CredentialStore, Notifier, ResetTokenStore, RevokedTokenStore, TokenIssuer, TokenValidator,
};

use crate::{
    routes::{forgot_password, health, login, logout, register, reset_password},
    tracing::{make_span_with_request_id, on_request, on_response},
};

/// CORS allow-list; origins are matched exactly.
#[derive(Debug, Clone, Default)]
pub struct AllowedOrigins(Vec<HeaderValue>);

impl AllowedOrigins {
    pub fn new(origins: Vec<HeaderValue>) -> Self {
        Self(origins)
    }

    pub fn parse(origins: &[String]) -> Result<Self, InvalidHeaderValue> {
        origins
            .iter()
            .map(|origin| origin.parse())
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    fn contains(&self, origin: &HeaderValue) -> bool {
        self.0.contains(origin)
    }
}

/// The assembled authentication surface.
pub struct AuthService {
    router: Router,
}

impl AuthService {
    /// Wire the routes to their collaborators.
    ///
    /// # Note on Architecture
    /// Stores and token components implement Clone via internal `Arc`s for
    /// thread-safe sharing. Each route is given exactly the state it
    /// needs, nothing more.
    pub fn new<C, T, R, N, I, V>(
        credential_store: C,
        reset_token_store: T,
        revoked_token_store: R,
        notifier: N,
        token_issuer: I,
        token_validator: V,
    ) -> Self
    where
        C: CredentialStore + Clone + 'static,
        T: ResetTokenStore + Clone + 'static,
        R: RevokedTokenStore + Clone + 'static,
        N: Notifier + Clone + 'static,
        I: TokenIssuer + Clone + 'static,
        V: TokenValidator + Clone + 'static,
    {
        let router = Router::new()
            .route("/health", get(health))
            // Login and register verify or create credentials, then issue
            .route("/login", post(login::<C, I>))
            .with_state((credential_store.clone(), token_issuer.clone()))
            .route("/register", post(register::<C, I>))
            .with_state((credential_store.clone(), token_issuer.clone()))
            // Logout validates the presented token, then revokes it
            .route("/logout", post(logout::<R, V>))
            .with_state((revoked_token_store, token_validator.clone()))
            // The reset-flow pair
            .route("/forgot-password", post(forgot_password::<C, T, I, N>))
            .with_state((
                credential_store.clone(),
                reset_token_store.clone(),
                token_issuer,
                notifier,
            ))
            .route("/reset-password", post(reset_password::<C, T, V>))
            .with_state((credential_store, reset_token_store, token_validator));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert into a plain Router, optionally fenced by CORS, ready to be
    /// served or nested into a larger application.
    pub fn into_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run as a standalone server until the listener fails.
    pub async fn run(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.into_router(allowed_origins);

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
