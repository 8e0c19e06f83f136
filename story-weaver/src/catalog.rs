//! Model listing: keep the models that can generate content and print them.

use std::io::Write;

use story_weaver_types::models::Model;

use crate::error::Result;
use crate::models::Models;

pub const LISTING_HEADER: &str = "Available models:";

/// 过滤出支持 `generateContent` 的模型，保持服务端返回顺序。
pub fn generation_models(models: impl IntoIterator<Item = Model>) -> Vec<Model> {
    models
        .into_iter()
        .filter(Model::supports_generate_content)
        .collect()
}

/// 单个模型的输出行。
#[must_use]
pub fn format_model_line(model: &Model) -> String {
    format!(
        "- {} (Display Name: {})",
        model.name.as_deref().unwrap_or_default(),
        model.display_name.as_deref().unwrap_or_default()
    )
}

/// 拉取全部模型并写出可生成内容的模型列表，返回写出的模型数。
///
/// # Errors
/// 当请求失败或写出失败时返回错误。
pub async fn write_generation_models(models: &Models, out: &mut impl Write) -> Result<usize> {
    writeln!(out, "{LISTING_HEADER}")?;
    let all = models.all().await?;
    let total = all.len();
    let matching = generation_models(all);
    for model in &matching {
        writeln!(out, "{}", format_model_line(model))?;
    }
    out.flush()?;
    tracing::debug!(total, matching = matching.len(), "listed models");
    Ok(matching.len())
}
