use std::env;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use weekend_wanderer_api::{db, middleware, routes};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    let host = env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    let mongo_uri = env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(web::Data::new(client.clone()))
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/auth")
                            // Public routes
                            .route("/signup", web::post().to(routes::account::signup))
                            .route("/signin", web::post().to(routes::account::signin))
                            .service(
                                web::scope("").wrap(middleware::auth::AuthMiddleware).route(
                                    "/session",
                                    web::get().to(routes::account::user_session),
                                ),
                            ),
                    )
                    .service(
                        web::scope("/trips")
                            .wrap(middleware::auth::AuthMiddleware)
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
    })
    .bind((host, port))?
    .run()
    .await
}
