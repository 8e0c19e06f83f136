use std::io;
use std::process::ExitCode;

use story_weaver::{console, logging, StoryWeaver};

#[tokio::main]
async fn main() -> story_weaver::Result<ExitCode> {
    logging::init();

    let Some(client) =
        console::load_client(&mut io::stdout().lock(), Some(console::ENV_FILE_HINT))?
    else {
        return Ok(ExitCode::FAILURE);
    };

    let weaver = StoryWeaver::new(&client);
    tracing::debug!(model = weaver.model(), "story weaver ready");
    console::run_story_session(&weaver, &mut io::stdin().lock(), &mut io::stdout().lock())
        .await?;
    Ok(ExitCode::SUCCESS)
}
