pub mod health;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};

use crate::applications::handlers as applications;
use crate::auth::handlers as auth_handlers;
use crate::auth::middleware::authenticate;
use crate::catalog::handlers as catalog;
use crate::companies::handlers as companies;
use crate::jobs::handlers as jobs;
use crate::profiles::handlers as profiles;
use crate::saved_jobs::handlers as saved_jobs;
use crate::state::AppState;

/// Assembles the full route table: an open router for reads and auth
/// bootstrap, merged with a token-protected router for writes and
/// ownership-scoped resources.
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health_handler))
        // Account bootstrap
        .route("/api/v1/auth/users", post(auth_handlers::register))
        .route("/api/v1/auth/token/login", post(auth_handlers::login))
        // Open reads
        .route("/api/v1/jobs", get(jobs::list_jobs))
        .route("/api/v1/jobs/:id", get(jobs::get_job))
        .route("/api/v1/companies", get(companies::list_companies))
        .route("/api/v1/companies/:id", get(companies::get_company))
        .route("/api/v1/categories", get(catalog::list_categories))
        .route("/api/v1/categories/:id", get(catalog::get_category))
        .route("/api/v1/industries", get(catalog::list_industries))
        .route("/api/v1/industries/:id", get(catalog::get_industry))
        .route("/api/v1/job-types", get(catalog::list_job_types))
        .route("/api/v1/job-types/:id", get(catalog::get_job_type))
        .route("/api/v1/locations", get(catalog::list_locations))
        .route("/api/v1/locations/:id", get(catalog::get_location))
        // Skill suggestions are open, and creation is get-or-create
        .route(
            "/api/v1/skills",
            get(catalog::list_skills).post(catalog::create_skill),
        )
        .route("/api/v1/skills/:id", get(catalog::get_skill));

    let protected = Router::new()
        .route("/api/v1/auth/token/logout", post(auth_handlers::logout))
        .route("/api/v1/jobs", post(jobs::create_job))
        .route(
            "/api/v1/jobs/:id",
            put(jobs::update_job).delete(jobs::delete_job),
        )
        .route(
            "/api/v1/profiles",
            get(profiles::list_profiles).post(profiles::create_profile),
        )
        .route(
            "/api/v1/profiles/:id",
            get(profiles::get_profile)
                .put(profiles::update_profile)
                .delete(profiles::delete_profile),
        )
        .route(
            "/api/v1/applications",
            get(applications::list_applications).post(applications::create_application),
        )
        .route(
            "/api/v1/applications/:id",
            get(applications::get_application)
                .put(applications::update_application)
                .delete(applications::delete_application),
        )
        .route(
            "/api/v1/saved-jobs",
            get(saved_jobs::list_saved_jobs).post(saved_jobs::create_saved_job),
        )
        .route(
            "/api/v1/saved-jobs/unsave/:job_id",
            delete(saved_jobs::unsave_job),
        )
        .route(
            "/api/v1/saved-jobs/:id",
            get(saved_jobs::get_saved_job).delete(saved_jobs::delete_saved_job),
        )
        .route_layer(from_fn_with_state(state.clone(), authenticate));

    public.merge(protected).with_state(state)
}
