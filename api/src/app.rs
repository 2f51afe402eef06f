//! Application state and factory
//!
//! This module holds the shared service state and builds the Actix-web
//! application with every route, middleware and the static upload mount.

use std::sync::Arc;

use actix_web::{web, App};
use tracing_actix_web::TracingLogger;

use crate::handlers::error::{json_error_handler, path_error_handler};
use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::{auth, cars, health, rentals};

use rr_core::repositories::{CarRepository, RentalRepository, UserRepository};
use rr_core::services::auth::AuthService;
use rr_core::services::catalog::CatalogService;
use rr_core::services::media::MediaStore;
use rr_core::services::rental::RentalService;
use rr_core::services::token::TokenService;
use rr_shared::config::{CorsConfig, MediaConfig};

/// Largest JSON body any route accepts
pub const JSON_BODY_LIMIT: usize = 64 * 1024;

/// Application state that holds shared services
pub struct AppState<U, C, R, M>
where
    U: UserRepository,
    C: CarRepository,
    R: RentalRepository,
    M: MediaStore,
{
    pub auth_service: Arc<AuthService<U, M>>,
    pub catalog_service: Arc<CatalogService<C, M>>,
    pub rental_service: Arc<RentalService<R, M>>,
    pub token_service: Arc<TokenService>,
}

/// Create and configure the application with all dependencies
pub fn create_app<U, C, R, M>(
    app_state: web::Data<AppState<U, C, R, M>>,
    cors: &CorsConfig,
    media: &MediaConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    C: CarRepository + 'static,
    R: RentalRepository + 'static,
    M: MediaStore + 'static,
{
    let jwt = JwtAuth::new(Arc::clone(&app_state.token_service));

    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(
            web::JsonConfig::default()
                .limit(JSON_BODY_LIMIT)
                .error_handler(json_error_handler),
        )
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        // Request spans, then CORS
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/auth")
                .route("/register", web::post().to(auth::register::<U, C, R, M>))
                .route("/login", web::post().to(auth::login::<U, C, R, M>))
                .route(
                    "/user",
                    web::get()
                        .to(auth::get_user::<U, C, R, M>)
                        .wrap(jwt.clone()),
                )
                .route(
                    "/profile",
                    web::put()
                        .to(auth::update_profile::<U, C, R, M>)
                        .wrap(jwt.clone()),
                ),
        )
        .service(
            // Literal segments are registered before `/{car_id}`
            web::scope("/api/cars")
                .service(
                    web::resource("")
                        .route(web::get().to(cars::list_available::<U, C, R, M>))
                        .route(
                            web::post()
                                .to(cars::create_car::<U, C, R, M>)
                                .wrap(jwt.clone()),
                        ),
                )
                .service(
                    web::resource("/mine").route(
                        web::get()
                            .to(cars::list_mine::<U, C, R, M>)
                            .wrap(jwt.clone()),
                    ),
                )
                .service(
                    web::resource("/rentals").route(
                        web::post()
                            .to(rentals::create_rental::<U, C, R, M>)
                            .wrap(jwt.clone()),
                    ),
                )
                .service(
                    web::resource("/rentals/{user_id}").route(
                        web::get()
                            .to(rentals::get_user_rentals::<U, C, R, M>)
                            .wrap(jwt.clone()),
                    ),
                )
                .service(
                    web::resource("/rental/{rental_id}")
                        .route(
                            web::get()
                                .to(rentals::get_rental::<U, C, R, M>)
                                .wrap(jwt.clone()),
                        )
                        .route(
                            web::put()
                                .to(rentals::upload_payment::<U, C, R, M>)
                                .wrap(jwt.clone()),
                        )
                        .route(
                            web::delete()
                                .to(rentals::cancel_rental::<U, C, R, M>)
                                .wrap(jwt.clone()),
                        ),
                )
                .service(
                    web::resource("/rental/{rental_id}/upload").route(
                        web::put()
                            .to(rentals::upload_payment::<U, C, R, M>)
                            .wrap(jwt.clone()),
                    ),
                )
                .service(
                    web::resource("/{car_id}")
                        .route(web::get().to(cars::get_car::<U, C, R, M>))
                        .route(
                            web::delete()
                                .to(cars::delete_car::<U, C, R, M>)
                                .wrap(jwt),
                        ),
                ),
        )
        .service(actix_files::Files::new(
            &media.public_prefix,
            media.upload_dir.clone(),
        ))
        // Default 404 handler
        .default_service(web::route().to(health::not_found))
}
