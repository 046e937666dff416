//! End-to-end harvest of an Omeka S item set
//!
//! Usage: API_BASE_URL=https://example.org/api/ KEY_IDENTITY=... \
//!        KEY_CREDENTIAL=... ITEM_SET_ID=7 cargo run --example harvest

use omeka_harvest::{Config, Harvester};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    println!("═══════════════════════════════════════════════════════════");
    println!("  omeka-harvest");
    println!("═══════════════════════════════════════════════════════════");
    println!("  API: {}", config.api_base_url);
    println!("  Item set: {}", config.item_set_id);
    println!("  Export: {}", config.csv_path.display());
    println!("═══════════════════════════════════════════════════════════");

    let harvester = Harvester::new(config)?;
    let csv_path = harvester.run_to_csv().await?;

    println!("CSV file has been saved to {}", csv_path.display());
    Ok(())
}
