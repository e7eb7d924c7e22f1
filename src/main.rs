pub mod api;
pub mod config;
pub mod health;
pub mod modules;
pub mod shared;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::openapi::ApiDoc;
use crate::config::{load_env_files, AppConfig};
use crate::modules::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::modules::auth::adapter::outgoing::security::Argon2Hasher;
use crate::modules::auth::adapter::outgoing::{
    PasswordResetTokenRepositoryPostgres, RefreshTokenRepositoryPostgres, UserRepositoryPostgres,
};
use crate::modules::auth::application::auth_use_cases::AuthUseCases;
use crate::modules::auth::application::ports::outgoing::TokenProvider;
use crate::modules::auth::application::services::{
    spawn_token_cleanup, CleanupExpiredTokensService, LoginUserService, LogoutUserService,
    PasswordResetService, RefreshTokenService, RegisterUserService, SessionIssuer,
};
use crate::modules::cdn::adapter::outgoing::LocalFileStorage;
use crate::modules::cdn::application::cdn_use_cases::CdnUseCases;
use crate::modules::cdn::application::services::CdnService;
use crate::modules::course::adapter::outgoing::CourseQueryPostgres;
use crate::modules::course::application::course_use_cases::CourseUseCases;
use crate::modules::course::application::services::{CourseCatalogService, LearnerCourseService};
use crate::modules::email::adapter::outgoing::{InMemoryEmailSender, SmtpConfig, SmtpEmailSender};
use crate::modules::email::application::mail_use_cases::MailUseCases;
use crate::modules::email::application::ports::outgoing::EmailSender;
use crate::modules::email::application::services::{ResetLinkMailer, SendMailService};
use crate::modules::payment::adapter::outgoing::{MonobankGateway, PaymentRepositoryPostgres};
use crate::modules::payment::application::domain::CheckoutUrls;
use crate::modules::payment::application::payment_use_cases::PaymentUseCases;
use crate::modules::payment::application::services::{PaymentService, WebhookService};
use crate::modules::progress::adapter::outgoing::ProgressRepositoryPostgres;
use crate::modules::progress::application::progress_use_cases::ProgressUseCases;
use crate::modules::progress::application::services::ProgressService;
use crate::modules::purchase::adapter::outgoing::PurchaseRepositoryPostgres;
use crate::modules::purchase::application::purchase_use_cases::PurchaseUseCases;
use crate::modules::purchase::application::services::{CourseSelector, PurchaseService};
use crate::modules::review::adapter::outgoing::ReviewRepositoryPostgres;
use crate::modules::review::application::review_use_cases::ReviewUseCases;
use crate::modules::review::application::services::ReviewService;
use crate::modules::user::application::services::{ProfileImageService, UserProfileService};
use crate::modules::user::application::user_use_cases::UserUseCases;
use crate::shared::api::{
    custom_json_config, custom_path_config, custom_query_config, route_not_found,
};

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthUseCases,
    pub user: UserUseCases,
    pub course: CourseUseCases,
    pub purchase: PurchaseUseCases,
    pub payment: PaymentUseCases,
    pub progress: ProgressUseCases,
    pub review: ReviewUseCases,
    pub cdn: CdnUseCases,
    pub mail: MailUseCases,
}

fn startup_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(e.to_string())
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let env_name = load_env_files();
    info!(environment = %env_name, "Starting application");

    let config = AppConfig::from_env().map_err(startup_error)?;
    let jwt_config = JwtConfig::from_env().map_err(startup_error)?;
    let smtp_config = SmtpConfig::from_env().map_err(startup_error)?;

    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let db = Arc::new(Database::connect(opt).await.map_err(startup_error)?);

    if config.run_migrations {
        Migrator::up(db.as_ref(), None).await.map_err(startup_error)?;
        info!("Migrations applied");
    }

    // Outgoing adapters
    let storage = Arc::new(LocalFileStorage::new(config.upload_dir.clone()));
    let users = Arc::new(UserRepositoryPostgres::new(db.clone()));
    let refresh_tokens = Arc::new(RefreshTokenRepositoryPostgres::new(db.clone()));
    let reset_tokens = Arc::new(PasswordResetTokenRepositoryPostgres::new(db.clone()));
    let token_provider: Arc<dyn TokenProvider + Send + Sync> =
        Arc::new(JwtTokenService::new(jwt_config));
    let hasher = Arc::new(Argon2Hasher::from_env());
    let course_query = Arc::new(CourseQueryPostgres::new(db.clone()));
    let purchases = Arc::new(PurchaseRepositoryPostgres::new(db.clone()));
    let payments = Arc::new(PaymentRepositoryPostgres::new(db.clone()));
    let gateway = Arc::new(MonobankGateway::new(&config.monobank));

    let sender: Arc<dyn EmailSender + Send + Sync> = match smtp_config {
        Some(smtp) => Arc::new(SmtpEmailSender::from_config(&smtp).map_err(startup_error)?),
        None => {
            warn!("SMTP_HOST not set, outgoing mail is kept in memory");
            Arc::new(InMemoryEmailSender::default())
        }
    };

    // Use cases
    let sessions = SessionIssuer::new(token_provider.clone(), refresh_tokens.clone());
    let password_reset = Arc::new(PasswordResetService::new(
        users.clone(),
        reset_tokens.clone(),
        token_provider.clone(),
        hasher.clone(),
        Arc::new(ResetLinkMailer::new(sender.clone())),
    ));
    let auth = AuthUseCases {
        register: Arc::new(RegisterUserService::new(
            users.clone(),
            hasher.clone(),
            sessions.clone(),
        )),
        login: Arc::new(LoginUserService::new(users.clone(), hasher, sessions.clone())),
        refresh: Arc::new(RefreshTokenService::new(users.clone(), sessions)),
        logout: Arc::new(LogoutUserService::new(refresh_tokens.clone())),
        request_password_reset: password_reset.clone(),
        verify_reset_token: password_reset.clone(),
        reset_password: password_reset,
    };

    let profiles = Arc::new(UserProfileService::new(users.clone()));
    let user = UserUseCases {
        list: profiles.clone(),
        get_profile: profiles.clone(),
        update_profile: profiles,
        upload_image: Arc::new(ProfileImageService::new(users, storage.clone())),
    };

    let catalog = Arc::new(CourseCatalogService::new(course_query.clone()));
    let learner = Arc::new(LearnerCourseService::new(course_query));
    let course = CourseUseCases {
        list: catalog.clone(),
        get: catalog,
        purchased: learner.clone(),
        user_course: learner.clone(),
        user_module: learner.clone(),
        user_lesson: learner,
    };

    let purchase = PurchaseUseCases {
        purchase: Arc::new(PurchaseService::new(purchases.clone())),
    };

    let checkout = Arc::new(PaymentService::new(
        CourseSelector::new(purchases.clone()),
        payments,
        gateway.clone(),
        CheckoutUrls::new(&config.client_url, &config.public_base_url),
    ));
    let payment = PaymentUseCases {
        create: checkout.clone(),
        status: checkout.clone(),
        verify_webhook: Arc::new(WebhookService::new(gateway)),
        apply_update: checkout,
    };

    let progress_service = Arc::new(ProgressService::new(
        Arc::new(ProgressRepositoryPostgres::new(db.clone())),
        purchases.clone(),
    ));
    let progress = ProgressUseCases {
        update_position: progress_service.clone(),
        complete_lesson: progress_service.clone(),
        complete_module: progress_service,
    };

    let reviews = Arc::new(ReviewService::new(
        Arc::new(ReviewRepositoryPostgres::new(db.clone())),
        storage.clone(),
    ));
    let review = ReviewUseCases {
        list: reviews.clone(),
        list_for_course: reviews.clone(),
        get: reviews.clone(),
        create: reviews.clone(),
        update: reviews.clone(),
        delete: reviews,
    };

    let files = Arc::new(CdnService::new(storage, purchases));
    let cdn = CdnUseCases {
        upload: files.clone(),
        serve_public: files.clone(),
        serve_video: files,
    };

    let mail = MailUseCases {
        send: Arc::new(SendMailService::new(sender)),
    };

    spawn_token_cleanup(Arc::new(CleanupExpiredTokensService::new(
        refresh_tokens,
        reset_tokens,
    )));

    let state = AppState {
        auth,
        user,
        course,
        purchase,
        payment,
        progress,
        review,
        cdn,
        mail,
    };

    let bind_address = config.bind_address();
    info!(address = %bind_address, "Server listening");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(custom_json_config())
            .app_data(custom_path_config())
            .app_data(custom_query_config())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider)))
            .app_data(web::Data::new(Arc::clone(&db)))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .configure(init_routes)
            .default_service(web::route().to(route_not_found))
    })
    .bind(bind_address)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(crate::health::health)
        .service(crate::health::readiness);
    crate::modules::auth::adapter::incoming::web::routes::init_routes(cfg);
    crate::modules::user::adapter::incoming::web::routes::init_routes(cfg);
    crate::modules::course::adapter::incoming::web::routes::init_routes(cfg);
    crate::modules::purchase::adapter::incoming::web::routes::init_routes(cfg);
    crate::modules::payment::adapter::incoming::web::routes::init_routes(cfg);
    crate::modules::progress::adapter::incoming::web::routes::init_routes(cfg);
    crate::modules::review::adapter::incoming::web::routes::init_routes(cfg);
    crate::modules::cdn::adapter::incoming::web::routes::init_routes(cfg);
    crate::modules::email::adapter::incoming::web::routes::init_routes(cfg);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
