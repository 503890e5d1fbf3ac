use genpass_domain::error::{GpResult, JsonStatus};
use genpass_domain::fixtures::{FixtureApi, Resource};
use genpass_domain::password::PasswordSet;
use genpass_domain::profile::generate::ProfileRequest;
use genpass_domain::profile::Profile;

use axum::extract::{Extension, Query};
use axum::routing::get;
use axum::Json;

pub struct FixtureRoutes<D>(std::marker::PhantomData<D>);

impl<D> FixtureRoutes<D>
where
    D: FixtureApi + Sized + Clone + Send + Sync + 'static,
{
    pub fn router() -> axum::Router {
        axum::Router::new()
            .route("/", get(Self::index))
            .route(&Resource::Profiles.path(), get(Self::profiles))
            .route(&Resource::Passwords.path(), get(Self::passwords))
            .route("/run-passwords", get(Self::run_passwords))
            .route("/run-profiles", get(Self::run_profiles))
    }

    async fn index() -> &'static str {
        "genpass backend is running!"
    }

    async fn profiles(Extension(deps): Extension<D>) -> GpResult<Json<Vec<Profile>>> {
        Ok(Json(deps.published_profiles().await?))
    }

    async fn passwords(Extension(deps): Extension<D>) -> GpResult<Json<PasswordSet>> {
        Ok(Json(deps.published_passwords().await?))
    }

    async fn run_passwords(Extension(deps): Extension<D>) -> GpResult<Json<JsonStatus>> {
        deps.run_passwords().await?;
        Ok(Json(JsonStatus::ok("Passwords generated.")))
    }

    async fn run_profiles(
        Extension(deps): Extension<D>,
        Query(request): Query<ProfileRequest>,
    ) -> GpResult<Json<JsonStatus>> {
        deps.run_profiles(request).await?;
        Ok(Json(JsonStatus::ok("Profiles generated.")))
    }
}
