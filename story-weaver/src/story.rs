//! Story paragraph generation with a fixed model, sampling setup and safety policy.

use std::fmt;

use story_weaver_types::config::{GenerationConfig, SafetySetting};
use story_weaver_types::content::Content;
use story_weaver_types::enums::{HarmBlockThreshold, HarmCategory};
use story_weaver_types::models::GenerateContentConfig;
use story_weaver_types::response::GenerateContentResponse;

use crate::client::Client;
use crate::error::Error;
use crate::models::Models;

/// 生成故事使用的模型。
pub const STORY_MODEL: &str = "gemini-1.5-flash-latest";

pub const TEMPERATURE: f32 = 0.8;
pub const TOP_P: f32 = 0.9;
pub const TOP_K: f32 = 40.0;
pub const MAX_OUTPUT_TOKENS: i32 = 200;

/// 四个伤害类别统一使用 “中等及以上拦截”。
pub const SAFETY_SETTINGS: [SafetySetting; 4] = [
    SafetySetting::new(
        HarmCategory::HarmCategoryHarassment,
        HarmBlockThreshold::BlockMediumAndAbove,
    ),
    SafetySetting::new(
        HarmCategory::HarmCategoryHateSpeech,
        HarmBlockThreshold::BlockMediumAndAbove,
    ),
    SafetySetting::new(
        HarmCategory::HarmCategorySexuallyExplicit,
        HarmBlockThreshold::BlockMediumAndAbove,
    ),
    SafetySetting::new(
        HarmCategory::HarmCategoryDangerousContent,
        HarmBlockThreshold::BlockMediumAndAbove,
    ),
];

pub const NO_CANDIDATES_MESSAGE: &str =
    "The model could not generate a response, possibly due to safety filters or other issues.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "Received an empty or malformed response from the API.";
pub const ERROR_PREFIX: &str = "An error occurred:";

/// 故事生成使用的采样参数。
#[must_use]
pub fn generation_config() -> GenerationConfig {
    GenerationConfig {
        temperature: Some(TEMPERATURE),
        top_p: Some(TOP_P),
        top_k: Some(TOP_K),
        max_output_tokens: Some(MAX_OUTPUT_TOKENS),
        ..Default::default()
    }
}

/// 完整请求配置：采样参数 + 安全设置。
#[must_use]
pub fn story_config() -> GenerateContentConfig {
    GenerateContentConfig {
        generation_config: Some(generation_config()),
        safety_settings: Some(SAFETY_SETTINGS.to_vec()),
    }
}

/// 将用户的故事创意包装成指令。
#[must_use]
pub fn story_prompt(idea: &str) -> String {
    format!(
        "Write a short, imaginative story paragraph (about 3-5 sentences) based on this idea: '{idea}'"
    )
}

/// 一次生成请求的结果。
///
/// `Display` 输出即用户看到的文本；`Failed` 保留原始错误以便区分失败原因。
#[derive(Debug)]
pub enum StoryOutcome {
    /// 第一个候选的首段文本（已去除首尾空白）。
    Story(String),
    /// 响应中没有候选，通常是被安全策略拦截。
    NoCandidates,
    /// 第一个候选没有内容或内容为空。
    EmptyResponse,
    /// 请求过程中出现的任何错误。
    Failed(Error),
}

impl StoryOutcome {
    /// 按固定规则解读生成响应。
    #[must_use]
    pub fn from_response(response: &GenerateContentResponse) -> Self {
        let Some(candidate) = response.candidates.first() else {
            if let Some(reason) = response.block_reason() {
                tracing::info!(?reason, "prompt blocked");
            }
            return Self::NoCandidates;
        };
        match candidate
            .content
            .as_ref()
            .and_then(|content| content.parts.first())
        {
            Some(part) => Self::Story(part.text_value().unwrap_or_default().trim().to_string()),
            None => {
                tracing::debug!(finish_reason = ?candidate.finish_reason, "candidate has no parts");
                Self::EmptyResponse
            }
        }
    }

    /// 是否成功得到故事文本。
    #[must_use]
    pub const fn is_story(&self) -> bool {
        matches!(self, Self::Story(_))
    }
}

impl fmt::Display for StoryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Story(text) => f.write_str(text),
            Self::NoCandidates => f.write_str(NO_CANDIDATES_MESSAGE),
            Self::EmptyResponse => f.write_str(EMPTY_RESPONSE_MESSAGE),
            Self::Failed(err) => write!(f, "{ERROR_PREFIX} {err}"),
        }
    }
}

/// 绑定固定模型与配置的故事生成器。
#[derive(Clone)]
pub struct StoryWeaver {
    models: Models,
    model: String,
    config: GenerateContentConfig,
}

impl StoryWeaver {
    /// 使用默认模型与配置。
    #[must_use]
    pub fn new(client: &Client) -> Self {
        Self {
            models: client.models(),
            model: STORY_MODEL.to_string(),
            config: story_config(),
        }
    }

    /// 当前绑定的模型。
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// 根据故事创意生成一段故事。错误不会向上传播，而是折叠进 [`StoryOutcome::Failed`]。
    pub async fn weave(&self, idea: &str) -> StoryOutcome {
        let contents = vec![Content::user(story_prompt(idea))];
        match self
            .models
            .generate_content_with_config(&self.model, contents, self.config.clone())
            .await
        {
            Ok(response) => StoryOutcome::from_response(&response),
            Err(err) => {
                tracing::warn!(error = %err, model = %self.model, "story generation failed");
                StoryOutcome::Failed(err)
            }
        }
    }
}
