/*
 * Responsibility
 * - tokio runtime entry
 * - app::run() does the work
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    birdworld_console::app::run().await
}
