pub mod app;
pub mod commands;
pub mod config;

mod routes;

#[cfg(test)]
mod test_util;

use anyhow::Context;
use axum::extract::Extension;
use entrait::Impl;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

pub fn router(app: app::App) -> axum::Router {
    routes::api_router().layer(
        ServiceBuilder::new()
            .layer(Extension(Impl::new(app)))
            // Enables logging. Use `RUST_LOG=tower_http=debug`
            .layer(tower_http::trace::TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}

/// The fixture store for `cli`. Only the commands that read or write fixtures create its
/// directory.
pub async fn store_for(cli: &config::Cli) -> anyhow::Result<genpass_store::Store> {
    match cli.command {
        config::Command::Demo(_) => Ok(genpass_store::Store::open(&cli.fixtures_dir)),
        config::Command::Serve(_)
        | config::Command::GenerateProfiles(_)
        | config::Command::GeneratePasswords(_) => {
            genpass_store::Store::init(&cli.fixtures_dir).await
        }
    }
}

pub async fn serve(app: app::App, bind: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("could not bind {bind}"))?;

    serve_on(listener, app).await
}

pub async fn serve_on(listener: TcpListener, app: app::App) -> anyhow::Result<()> {
    tracing::info!("genpass backend listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(app))
        .await
        .context("error running HTTP server")
}
