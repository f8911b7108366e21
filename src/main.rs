use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use miningniti::application::ports::{DocumentStore, OcrEngine};
use miningniti::application::services::{
    AnswerGenerator, ChatService, ConversationHistory, IngestionService,
};
use miningniti::infrastructure::llm::LlmClientFactory;
use miningniti::infrastructure::observability::init_tracing;
use miningniti::infrastructure::persistence::{
    InMemoryDocumentStore, PgDocumentStore, create_pool, run_migrations,
};
use miningniti::infrastructure::text_processing::{OcrPdfLoader, TesseractOcrEngine};
use miningniti::presentation::config::{DocumentStoreProvider, DocumentStoreSettings};
use miningniti::presentation::{AppState, Environment, PromptConfig, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;
    settings.validate()?;

    init_tracing(&settings.logging, environment, settings.server.port);

    let prompt = PromptConfig::load(Path::new(&settings.prompt.path))
        .context("Failed to load prompt configuration")?;

    let api_key = settings.llm.api_key()?;
    let llm_client = LlmClientFactory::connect(&settings.llm, &api_key, prompt.temperature)
        .await
        .context("Failed to initialize the language model")?;

    let answer_generator = Arc::new(AnswerGenerator::new(
        llm_client,
        prompt.prompt_template()?,
        Duration::from_secs(settings.llm.timeout_seconds),
    )?);

    tracing::info!(model = answer_generator.model(), "Answer generator ready");

    let document_store = connect_document_store(&settings.document_store).await?;

    let ocr_engine = TesseractOcrEngine::from_settings(&settings.extraction);
    match ocr_engine.health_check().await {
        Ok(version) => tracing::info!(version = %version, "OCR engine available"),
        Err(e) => tracing::warn!(error = %e, "OCR engine unavailable; PDF extraction will fail"),
    }
    let ocr_engine: Arc<dyn OcrEngine> = Arc::new(ocr_engine);
    let file_loader = Arc::new(OcrPdfLoader::new(ocr_engine, &settings.extraction));

    let history = settings
        .history
        .enabled
        .then(|| ConversationHistory::new(settings.history.max_entries));
    match &history {
        Some(history) => tracing::info!(max_entries = history.max_entries(), "Conversation history enabled"),
        None => tracing::info!("Conversation history disabled"),
    }

    let chat_service = Arc::new(ChatService::new(
        Arc::clone(&document_store),
        answer_generator,
        history,
    ));
    let ingestion_service = Arc::new(IngestionService::new(file_loader, document_store));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;

    let router = create_router(AppState::new(chat_service, ingestion_service, settings))?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");
    axum::serve(listener, router).await?;

    Ok(())
}

async fn connect_document_store(
    settings: &DocumentStoreSettings,
) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match settings.provider {
        DocumentStoreProvider::Postgres => {
            let pool = create_pool(&settings.url()?, settings.max_connections).await?;
            if settings.run_migrations {
                run_migrations(&pool).await?;
            }
            Ok(Arc::new(PgDocumentStore::new(pool)))
        }
        DocumentStoreProvider::Memory => {
            tracing::warn!("Using the in-memory document store; extracted text is not persisted");
            Ok(Arc::new(InMemoryDocumentStore::new()))
        }
    }
}
