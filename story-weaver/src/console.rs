//! Terminal interaction for the two binaries. Everything user-facing goes to the given writer.

use std::io::{self, BufRead, Write};

use crate::client::Client;
use crate::error::{Error, Result};
use crate::settings::Settings;
use crate::story::{StoryOutcome, StoryWeaver};

pub const BANNER: &str = "--- Mini Story Weaver ---";
pub const INSTRUCTIONS: &str = "Enter a starting sentence or a few keywords for your story.";
pub const IDEA_PROMPT: &str = "Story idea: ";
pub const NO_INPUT_MESSAGE: &str = "No input provided. Exiting.";
pub const WEAVING_MESSAGE: &str = "\nWeaving your story...\n";
pub const STORY_HEADER: &str = "--- Your Story Paragraph ---";
pub const STORY_FOOTER: &str = "--------------------------";
pub const ENV_FILE_HINT: &str =
    "Please ensure your GOOGLE_API_KEY is set in a .env file in the project root.";

/// 输出配置错误（以及可选的提示）。
pub fn write_config_error(out: &mut impl Write, err: &Error, hint: Option<&str>) -> io::Result<()> {
    writeln!(out, "Error: {err}")?;
    if let Some(hint) = hint {
        writeln!(out, "{hint}")?;
    }
    out.flush()
}

/// 加载 `.env` 与环境变量并创建客户端。
///
/// 配置无效时输出错误（以及可选的提示）并返回 `None`，此时不会发起任何网络请求。
pub fn load_client(out: &mut impl Write, hint: Option<&str>) -> io::Result<Option<Client>> {
    client_or_report(out, Settings::load(), hint)
}

/// 根据已加载的配置创建客户端；失败时输出错误并返回 `None`。
pub fn client_or_report(
    out: &mut impl Write,
    settings: Result<Settings>,
    hint: Option<&str>,
) -> io::Result<Option<Client>> {
    match settings.and_then(|settings| Client::from_settings(&settings)) {
        Ok(client) => Ok(Some(client)),
        Err(err) => {
            write_config_error(out, &err, hint)?;
            Ok(None)
        }
    }
}

/// 提示并读取一行故事创意。去掉行尾换行；空行或 EOF 返回 `None`。
pub fn read_story_idea(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<Option<String>> {
    write!(out, "{IDEA_PROMPT}")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let idea = line.trim_end_matches(['\n', '\r']);
    if idea.is_empty() {
        Ok(None)
    } else {
        Ok(Some(idea.to_string()))
    }
}

/// 输出带边框的故事段落。
pub fn write_story(out: &mut impl Write, outcome: &StoryOutcome) -> io::Result<()> {
    writeln!(out, "{STORY_HEADER}")?;
    writeln!(out, "{outcome}")?;
    writeln!(out, "{STORY_FOOTER}")?;
    out.flush()
}

/// 一次完整的交互：横幅、读取创意、生成、输出。
///
/// 没有输入时不会发起请求，返回 `None`。
pub async fn run_story_session(
    weaver: &StoryWeaver,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<Option<StoryOutcome>> {
    writeln!(out, "{BANNER}")?;
    writeln!(out, "{INSTRUCTIONS}")?;

    let Some(idea) = read_story_idea(input, out)? else {
        writeln!(out, "{NO_INPUT_MESSAGE}")?;
        out.flush()?;
        return Ok(None);
    };

    writeln!(out, "{WEAVING_MESSAGE}")?;
    out.flush()?;
    let outcome = weaver.weave(&idea).await;
    write_story(out, &outcome)?;
    Ok(Some(outcome))
}
