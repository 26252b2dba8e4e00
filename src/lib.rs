pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use application::sales_service::SalesService;
pub use config::Settings;
pub use infrastructure::memory_store::InMemorySalesStore;

/// The service the HTTP handlers are wired to.
pub type AppService = SalesService<InMemorySalesStore>;

/// Registers every `/api` route. Shared by the server and the HTTP tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    use handlers::{customers, order_items, orders, products};

    cfg.service(
        web::scope("/api/customers")
            .route("", web::get().to(customers::list_customers))
            .route("", web::post().to(customers::create_customer))
            .route("/{id}", web::get().to(customers::get_customer))
            .route("/{id}", web::put().to(customers::update_customer))
            .route("/{id}", web::delete().to(customers::delete_customer)),
    )
    .service(
        web::scope("/api/products")
            .route("", web::get().to(products::list_products))
            .route("", web::post().to(products::create_product))
            .route(
                "/price/{max_price}",
                web::get().to(products::list_products_by_price),
            )
            .route("/{id}", web::get().to(products::get_product))
            .route("/{id}", web::put().to(products::update_product))
            .route("/{id}", web::delete().to(products::delete_product)),
    )
    .service(
        web::scope("/api/orders")
            .route("", web::get().to(orders::list_orders))
            .route("", web::post().to(orders::create_order))
            .route(
                "/customer/{customer_id}",
                web::get().to(orders::list_orders_for_customer),
            )
            .route("/{id}", web::get().to(orders::get_order))
            .route("/{id}", web::put().to(orders::update_order))
            .route("/{id}", web::delete().to(orders::delete_order)),
    )
    .service(
        web::scope("/api/orderitems")
            .route("", web::get().to(order_items::list_order_items))
            .route("", web::post().to(order_items::create_order_item))
            .route(
                "/order/{order_id}",
                web::get().to(order_items::list_items_for_order),
            )
            .route("/{id}", web::get().to(order_items::get_order_item))
            .route("/{id}", web::put().to(order_items::update_order_item))
            .route("/{id}", web::delete().to(order_items::delete_order_item)),
    );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server. Every worker shares the same `service`, and so the same
/// store.
pub fn build_server(
    service: web::Data<AppService>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let openapi = openapi::ApiDoc::openapi();
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .configure(configure_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
