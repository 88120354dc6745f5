/// Patchbay Server - Preset marketplace API server
use clap::{Parser, Subcommand};
use patchbay_core::types::{CreateDesigner, CreatePack, CreatePreset};
use patchbay_server::{config::ServerConfig, create_router, state::AppState};
use std::net::SocketAddr;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "patchbay-server")]
#[command(about = "Patchbay preset marketplace server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Populate the database with sample catalog data
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "patchbay_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            serve().await?;
        }
        Commands::Seed => {
            seed().await?;
        }
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!("Starting Patchbay Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let pool = patchbay_storage::create_pool(&config.storage.database_url).await?;
    patchbay_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    // Build application state and router
    let app_state = AppState::new(pool);
    let app = create_router(app_state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive());

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn seed() -> anyhow::Result<()> {
    use patchbay_storage::catalog;

    let config = ServerConfig::load()?;
    let pool = patchbay_storage::create_pool(&config.storage.database_url).await?;
    patchbay_storage::run_migrations(&pool).await?;

    let designer = catalog::create_designer(
        &pool,
        CreateDesigner {
            username: "demo-designer".to_string(),
            profile_image_url: None,
        },
    )
    .await?;

    let techno = catalog::create_genre(&pool, "Techno").await?;
    let house = catalog::create_genre(&pool, "House").await?;
    let serum = catalog::create_vst(&pool, "Serum").await?;
    let vital = catalog::create_vst(&pool, "Vital").await?;

    for (title, preset_type, genre, vst, price) in [
        ("Acid Lead", "lead", techno.id, serum.id, 499),
        ("Deep Sub", "bass", house.id, serum.id, 299),
        ("Rolling Pluck", "pluck", techno.id, vital.id, 0),
    ] {
        catalog::create_preset(
            &pool,
            CreatePreset {
                title: title.to_string(),
                description: Some(format!("{title} demo preset")),
                price_cents: price,
                preset_type: preset_type.to_string(),
                preview_url: None,
                designer_id: Some(designer.id.clone()),
                genre_id: Some(genre),
                vst_id: Some(vst),
                pack_id: None,
                pack_position: None,
            },
        )
        .await?;
    }

    let pack = catalog::create_pack(
        &pool,
        CreatePack {
            title: "Warehouse Essentials".to_string(),
            description: Some("Demo pack".to_string()),
            price_cents: 1999,
            designer_id: Some(designer.id.clone()),
            genre_id: Some(techno.id),
        },
    )
    .await?;

    for (position, title) in ["Kick Tool", "Stab One", "Hat Loop Lead"].iter().enumerate() {
        catalog::create_preset(
            &pool,
            CreatePreset {
                title: (*title).to_string(),
                description: None,
                price_cents: 0,
                preset_type: "fx".to_string(),
                preview_url: None,
                designer_id: Some(designer.id.clone()),
                genre_id: Some(techno.id),
                vst_id: Some(serum.id),
                pack_id: Some(pack.id.clone()),
                pack_position: Some(position as i64),
            },
        )
        .await?;
    }

    tracing::info!("Seeded sample catalog data");
    Ok(())
}
