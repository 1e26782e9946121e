use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;

use crate::{
    ai::{CommentAnalyst, LanguageModel, OpenAiClient, Refiner},
    classifier::{CommentClassifier, InferenceEndpointModel},
    config::AppConfig,
    infrastructure::{directories::ResolvedPaths, shutdown::Shutdown},
    server::{self, AppContext},
    youtube::YouTubeClient,
};

pub struct CommentTriageApp {
    _paths: ResolvedPaths,
    config: Arc<AppConfig>,
    context: Arc<AppContext>,
    shutdown: Shutdown,
}

impl CommentTriageApp {
    pub async fn initialize(
        config: AppConfig,
        paths: ResolvedPaths,
        shutdown: Shutdown,
    ) -> Result<Self> {
        let config = Arc::new(config);

        let http_client = Client::builder()
            .user_agent(format!("yt-comment-triage/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        if config.youtube.api_key.is_none() {
            tracing::warn!(target: "lifecycle", "YOUTUBE_API_KEY is not set; comment requests will fail");
        }
        if config.openai.api_key.is_none() {
            tracing::warn!(target: "lifecycle", "OPENAI_API_KEY is not set; refinement and analysis will fail");
        }

        let model = InferenceEndpointModel::new(http_client.clone(), &config.classifier.endpoint);
        model.probe().await;
        let classifier = CommentClassifier::new(Arc::new(model), &config.classifier);

        let llm: Arc<dyn LanguageModel> =
            Arc::new(OpenAiClient::new(http_client.clone(), config.openai.clone()));
        let refiner = config
            .triage
            .refine_comments
            .then(|| Refiner::new(llm.clone()));
        let analyst = CommentAnalyst::new(llm, config.triage.analysis_max_comments);

        let context = Arc::new(AppContext {
            comments: Arc::new(YouTubeClient::new(http_client, config.youtube.clone())),
            classifier,
            refiner,
            analyst,
        });

        Ok(Self {
            _paths: paths,
            config,
            context,
            shutdown,
        })
    }

    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;

        tracing::info!(
            target: "lifecycle",
            addr = %addr,
            refine = self.context.refiner.is_some(),
            "comment triage service listening"
        );

        let stop = self.shutdown.subscribe();
        axum::serve(listener, server::router(self.context))
            .with_graceful_shutdown(stop.notified())
            .await?;

        tracing::info!(target: "lifecycle", "comment triage service stopped");
        Ok(())
    }
}
