#![allow(dead_code)]

use actix_web::{web, App};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use mongodb::options::ClientOptions;
use mongodb::Client;
use std::sync::Arc;
use std::time::Duration;

use weekend_wanderer_api::middleware::auth::{AuthMiddleware, Claims};
use weekend_wanderer_api::routes;

pub const TEST_JWT_SECRET: &str = "weekend-wanderer-test-secret";

pub struct TestApp {
    pub client: Arc<Client>,
}

impl TestApp {
    pub async fn new() -> Self {
        std::env::set_var("JWT_SECRET", TEST_JWT_SECRET);

        let mongo_uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        // Short selection timeout so tests that never reach the database do
        // not wait out the driver default when no MongoDB is running.
        let mut options = ClientOptions::parse(&mongo_uri)
            .await
            .expect("Failed to parse MongoDB URI");
        options.server_selection_timeout = Some(Duration::from_secs(2));
        options.connect_timeout = Some(Duration::from_secs(2));

        let client =
            Client::with_options(options).expect("Failed to create MongoDB client");

        Self {
            client: Arc::new(client),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.client.clone()))
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/auth")
                            .route("/signup", web::post().to(routes::account::signup))
                            .route("/signin", web::post().to(routes::account::signin))
                            .service(web::scope("").wrap(AuthMiddleware).route(
                                "/session",
                                web::get().to(routes::account::user_session),
                            )),
                    )
                    .service(
                        web::scope("/trips")
                            .wrap(AuthMiddleware)
                            .route("/plan", web::post().to(routes::trips::plan_trip))
                            .route("", web::get().to(routes::trips::list_trips))
                            .route("/{id}", web::get().to(routes::trips::get_trip))
                            .route("/{id}", web::delete().to(routes::trips::delete_trip))
                            .route(
                                "/{id}/favorite",
                                web::put().to(routes::trips::toggle_favorite),
                            ),
                    ),
            )
    }
}

/// Resolves the final status for a request, including requests the auth
/// middleware rejects with a service-level error instead of a response.
pub async fn response_status<S, R, B>(app: &S, req: R) -> actix_web::http::StatusCode
where
    S: actix_web::dev::Service<
        R,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
{
    match actix_web::test::try_call_service(app, req).await {
        Ok(resp) => resp.status(),
        Err(err) => err.error_response().status(),
    }
}

/// Signs a bearer token the auth middleware will accept.
pub fn auth_token(user_id: &str) -> String {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: "tester@example.com".to_string(),
        iat: now,
        exp: now + 3600,
        user_id: user_id.to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to sign test token")
}
