use std::env;
use std::fs;

use recipe_lens::{identify, AppConfig, ImageInput};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Accept a file path or a data:image/... string as the argument
    let args: Vec<String> = env::args().collect();
    let arg = args
        .get(1)
        .ok_or("Please provide an image path or data URL as an argument")?;

    let input = if arg.starts_with("data:image") {
        ImageInput::DataUrl(arg.clone())
    } else {
        ImageInput::Bytes(fs::read(arg)?)
    };

    let config = AppConfig::load()?;
    let response = identify(input, &config).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
