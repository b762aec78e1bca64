pub mod application;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::accounts::AccountService;
use application::bookings::BookingService;
use application::cart::CartService;
use application::dashboard::DashboardService;
use application::feedback::FeedbackService;
use application::managers::ManagerService;
use application::tokens::VerificationTokens;
use auth::AdminKey;
use handlers::{accounts, admin, bookings, cart, feedback};
use infrastructure::DieselRepository;

pub use config::Settings;
pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("applied {} pending migration(s)", applied.len());
    Ok(())
}

/// The use-case services, shared by every worker through `web::Data`.
pub struct AppState {
    pub accounts: AccountService<DieselRepository>,
    pub cart: CartService<DieselRepository>,
    pub bookings: BookingService<DieselRepository>,
    pub feedback: FeedbackService<DieselRepository>,
    pub managers: ManagerService<DieselRepository>,
    pub dashboard: DashboardService<DieselRepository>,
}

impl AppState {
    pub fn new(pool: DbPool, settings: &Settings) -> Self {
        let repo = DieselRepository::new(pool);
        Self {
            accounts: AccountService::new(
                repo.clone(),
                VerificationTokens::new(&settings.secret_key),
                settings.salon_name.clone(),
            ),
            cart: CartService::new(repo.clone()),
            bookings: BookingService::new(repo.clone()),
            feedback: FeedbackService::new(repo.clone()),
            managers: ManagerService::new(repo.clone()),
            dashboard: DashboardService::new(repo),
        }
    }
}

/// Register every route under the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/customers")
            .route("/signup", web::post().to(accounts::signup))
            .route("/verify/{uid}/{token}", web::get().to(accounts::verify_email))
            .route("/login", web::post().to(accounts::login))
            .route("/me/profile", web::get().to(accounts::get_profile))
            .route("/me/profile", web::put().to(accounts::update_profile))
            .route("/me/password", web::post().to(accounts::change_password))
            .route("/me/dashboard", web::get().to(accounts::dashboard))
            .route("/me/feedback", web::post().to(feedback::submit_feedback)),
    )
    .service(
        web::scope("/cart")
            .route("", web::get().to(cart::get_cart))
            .route("", web::delete().to(cart::clear_cart))
            .route("/items/{slug}", web::post().to(cart::add_to_cart))
            .route("/items/{slug}", web::delete().to(cart::remove_from_cart))
            .route("/items/{slug}/decrease", web::post().to(cart::decrease_quantity))
            .route("/items/{slug}/increase", web::post().to(cart::increase_quantity)),
    )
    .route("/orders", web::get().to(cart::list_orders))
    .service(
        web::scope("/wishlist")
            .route("", web::get().to(cart::get_wishlist))
            .route("/{slug}", web::post().to(cart::add_to_wishlist))
            .route("/{slug}", web::delete().to(cart::remove_from_wishlist)),
    )
    .service(
        web::scope("/checkout")
            .route("", web::get().to(cart::checkout))
            .route("/pay", web::post().to(cart::pay)),
    )
    .route("/services/{service_id}/book", web::post().to(bookings::book_service))
    .service(
        web::scope("/bookings")
            .route("/current", web::get().to(bookings::current_booking))
            .route("/{booking_id}/pay", web::post().to(bookings::pay_booking)),
    )
    .route("/appointments", web::post().to(bookings::book_appointment))
    .route("/apprenticeships", web::get().to(bookings::list_apprenticeships))
    .service(
        web::scope("/admin")
            .route("/managers", web::post().to(admin::create_manager))
            .route("/managers", web::get().to(admin::list_managers))
            .route("/managers/approve", web::post().to(admin::approve_managers))
            .route("/managers/archive", web::post().to(admin::archive_managers))
            .route("/managers/{id}", web::delete().to(admin::delete_manager))
            .route("/manager-profiles", web::get().to(admin::list_manager_profiles))
            .route("/manager-profiles/activate", web::post().to(admin::activate_profiles))
            .route("/manager-profiles/deactivate", web::post().to(admin::deactivate_profiles))
            .route("/manager-feedback", web::get().to(admin::list_manager_feedback))
            .route("/manager-feedback/{id}", web::delete().to(admin::delete_manager_feedback)),
    );
}

/// Build and return an actix-web `Server` bound to `settings.host:settings.port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(pool: DbPool, settings: &Settings) -> std::io::Result<actix_web::dev::Server> {
    let state = web::Data::new(AppState::new(pool, settings));
    let admin_key = web::Data::new(AdminKey(settings.admin_key.clone()));
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(admin_key.clone())
            .app_data(handlers::json_config())
            .wrap(Logger::default())
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
            )
    })
    .bind((settings.host.clone(), settings.port))?
    .run())
}
