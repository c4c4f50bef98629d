pub mod application;
pub mod auth;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::OrderService;
use infrastructure::DieselOrderStore;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::place_order,
        handlers::orders::list_orders,
        handlers::orders::update_status,
        handlers::orders::list_order_items,
        handlers::orders::get_order_item,
    ),
    components(schemas(
        handlers::orders::PlaceOrderRequest,
        handlers::orders::OrderResponse,
        handlers::orders::OrderLineResponse,
        handlers::orders::UpdateStatusRequest,
        handlers::orders::StatusUpdateResponse,
        handlers::orders::ListOrdersResponse,
    )),
    tags((name = "orders", description = "Endpoints for managing user orders"))
)]
pub struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let service = web::Data::new(OrderService::new(DieselOrderStore::new(pool)));
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .service(
                web::scope("/orders")
                    .route("", web::post().to(handlers::orders::place_order))
                    .route("", web::get().to(handlers::orders::list_orders))
                    .route("/{id}", web::patch().to(handlers::orders::update_status))
                    .route(
                        "/{order_id}/items",
                        web::get().to(handlers::orders::list_order_items),
                    )
                    .route(
                        "/{order_id}/items/{item_id}",
                        web::get().to(handlers::orders::get_order_item),
                    ),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
