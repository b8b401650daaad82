//! Searches images and tags, reading the API key from `DERPI_KEY` if set.

use derpi::{api, Client};
use simple_logger::SimpleLogger;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<()> {
    SimpleLogger::new().with_level(log::LevelFilter::Info).init()?;

    let mut builder = Client::builder().user_agent("derpi-search-demo");
    if let Ok(key) = std::env::var("DERPI_KEY") {
        builder = builder.key(key);
    }
    let client = builder.build()?;

    let images = api::search_images(
        &client,
        "safe, cute",
        None,
        Some(1),
        Some(5),
        Some("desc"),
        Some("score"),
        None,
    )
    .await?;
    println!("{} images match, showing {}:", images.total, images.len());
    for image in images.iter() {
        println!("  #{} ({} faves) {}", image.id(), image.faves(), image.view_url());
    }

    let tags = api::search_tags(&client, "analyzed_name:wing", None).await?;
    for tag in tags.iter().take(5) {
        println!("{} is on {} images", tag.name(), tag.images());
    }

    Ok(())
}
