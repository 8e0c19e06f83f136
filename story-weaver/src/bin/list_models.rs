use std::io;
use std::process::ExitCode;

use story_weaver::{catalog, console, logging};

#[tokio::main]
async fn main() -> story_weaver::Result<ExitCode> {
    logging::init();

    let Some(client) = console::load_client(&mut io::stdout().lock(), None)? else {
        return Ok(ExitCode::FAILURE);
    };

    catalog::write_generation_models(&client.models(), &mut io::stdout().lock()).await?;
    Ok(ExitCode::SUCCESS)
}
