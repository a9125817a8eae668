use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use roomkeeper::{
    AppState, announcer,
    config::Config,
    create_router,
    infrastructure::{ChatworkClient, GithubClient},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    let http = reqwest::Client::new();
    let chat = Arc::new(ChatworkClient::new(
        http.clone(),
        config.chatwork_api_base.clone(),
        config.chatwork_api_token.clone(),
    ));
    let store = Arc::new(GithubClient::new(
        http,
        config.github_api_base.clone(),
        config.github_token.clone(),
        config.github_repo_owner.clone(),
        config.github_repo_name.clone(),
        config.github_branch.clone(),
    ));
    tracing::info!(
        "Watching room {}, storing data in {}/{}@{}",
        config.chatwork_room_id,
        config.github_repo_owner,
        config.github_repo_name,
        config.github_branch
    );

    let state = AppState::new(config.clone(), chat, store);

    if config.announcer_enabled {
        tracing::info!("Clock announcer enabled");
        announcer::spawn(state.chat.clone(), config.chatwork_room_id.clone());
    }

    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        create_router(state),
    )
    .await
    .expect("Failed to start server");
}
