//! Models API surface.

use std::sync::Arc;

use serde_json::Value;
use story_weaver_types::content::Content;
use story_weaver_types::models::{
    GenerateContentConfig, GenerateContentRequest, ListModelsConfig, ListModelsResponse, Model,
    GENERATE_CONTENT_METHOD,
};
use story_weaver_types::response::GenerateContentResponse;

use crate::client::ClientInner;
use crate::error::Result;

mod http;

use http::{build_model_method_url, build_models_list_url};

#[derive(Clone)]
pub struct Models {
    pub(crate) inner: Arc<ClientInner>,
}

impl Models {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// 生成内容（默认配置）。
    pub async fn generate_content(
        &self,
        model: impl Into<String>,
        contents: Vec<Content>,
    ) -> Result<GenerateContentResponse> {
        self.generate_content_with_config(model, contents, GenerateContentConfig::default())
            .await
    }

    /// 生成内容（自定义配置）。
    pub async fn generate_content_with_config(
        &self,
        model: impl Into<String>,
        contents: Vec<Content>,
        config: GenerateContentConfig,
    ) -> Result<GenerateContentResponse> {
        let model = model.into();
        let request = GenerateContentRequest::new(contents, config);
        let url = build_model_method_url(&self.inner, &model, GENERATE_CONTENT_METHOD);

        let request = self.inner.http.post(url).json(&request);
        let response = self.inner.send(request).await?;
        let value = response.json::<Value>().await?;
        let result = serde_json::from_value::<GenerateContentResponse>(value).inspect_err(|err| {
            tracing::debug!(error = %err, "GenerateContentResponse parse failed");
        })?;
        tracing::debug!(
            model = %model,
            candidates = result.candidates.len(),
            "generateContent completed"
        );
        Ok(result)
    }

    /// 列出模型（单页）。
    pub async fn list(&self) -> Result<ListModelsResponse> {
        self.list_with_config(ListModelsConfig::default()).await
    }

    /// 列出模型（带配置，单页）。
    pub async fn list_with_config(&self, config: ListModelsConfig) -> Result<ListModelsResponse> {
        let url = build_models_list_url(&self.inner, &config)?;
        let request = self.inner.http.get(url);
        let response = self.inner.send(request).await?;
        Ok(response.json::<ListModelsResponse>().await?)
    }

    /// 列出所有模型（自动翻页）。
    pub async fn all(&self) -> Result<Vec<Model>> {
        self.all_with_config(ListModelsConfig::default()).await
    }

    /// 列出所有模型（带配置，自动翻页）。
    pub async fn all_with_config(&self, mut config: ListModelsConfig) -> Result<Vec<Model>> {
        let mut models = Vec::new();
        loop {
            let response = self.list_with_config(config.clone()).await?;
            if let Some(items) = response.models {
                models.extend(items);
            }
            match response.next_page_token {
                Some(token) if !token.is_empty() => {
                    tracing::debug!(fetched = models.len(), "following models page token");
                    config.page_token = Some(token);
                }
                _ => break,
            }
        }
        Ok(models)
    }
}
