//! Fetches today's featured image and prints where to download it.

use derpi::{api, Client};
use simple_logger::SimpleLogger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // setting up logging.
    SimpleLogger::new().init()?;

    // A client with no key sees what a logged out visitor sees.
    let client = Client::new();

    let image = api::featured_image(&client).await?;
    println!("featured: #{} by {}", image.id(), image.uploader().unwrap_or("Background Pony"));
    println!("{} x {}, score {}", image.width(), image.height(), image.score());
    println!("full size: {}", image.representations().full);

    // The same image by ID, with the everything filter (56027).
    let same = api::image(&client, image.id(), Some(56027), None).await?;
    println!("tags: {}", same.tags().join(", "));

    Ok(())
}
