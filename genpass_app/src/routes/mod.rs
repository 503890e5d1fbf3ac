mod fixture_routes;

use crate::app::App;

use entrait::Impl;

/// Axum router for the real app.
pub fn api_router() -> axum::Router {
    fixture_routes::FixtureRoutes::<Impl<App>>::router()
}
