use std::io;
use std::sync::Arc;

use log::{info, warn};

use mtg_price_checker::batch_dispatcher::BatchDispatcher;
use mtg_price_checker::card_list::{read_card_list, read_interactive, write_results};
use mtg_price_checker::cards::card_query::CardQuery;
use mtg_price_checker::cards::price_result::{total_price, PriceResult};
use mtg_price_checker::page_fetcher::{build_client, HttpPageFetcher};
use mtg_price_checker::price_extractor::MetaTagPriceExtractor;
use mtg_price_checker::price_resolver::PriceResolver;
use mtg_price_checker::set_resolver::{ScryfallSetCatalog, SetResolver};
use mtg_price_checker::utilities::config::CONFIG;
use mtg_price_checker::utilities::constants::EXPORT_FILE_PREFIX;
use mtg_price_checker::utilities::string_manipulators::date_time_as_string;

fn get_card_list() -> Result<Vec<CardQuery>, Box<dyn std::error::Error>> {
    if CONFIG.card_list_path.is_empty() {
        let stdin = io::stdin();
        Ok(read_interactive(stdin.lock(), io::stdout())?)
    } else {
        Ok(read_card_list(&CONFIG.card_list_path)?)
    }
}

async fn price_cards(
    queries: &[CardQuery],
) -> Result<Vec<PriceResult>, Box<dyn std::error::Error>> {
    let start_time = chrono::prelude::Local::now();
    info!("Starting at {}", start_time);

    let client = build_client(CONFIG.request_timeout())?;
    let catalog = ScryfallSetCatalog::new(Some(CONFIG.scryfall_api_url.as_str()), client.clone());
    let sets = SetResolver::new(Arc::new(catalog), CONFIG.catalog_retry_policy());
    let resolver = PriceResolver::new(
        &CONFIG.store_base_url,
        Arc::new(HttpPageFetcher::new(client)),
        sets,
        Arc::new(MetaTagPriceExtractor::new()),
    )
    .with_missing_price_policy(CONFIG.missing_price_policy());

    let dispatcher = BatchDispatcher::new(resolver, CONFIG.workers);
    let results = dispatcher.resolve_all(queries).await?;

    let end_time = chrono::prelude::Local::now();
    info!(
        "Pricing started at: {}. Finished at: {}. Took: {} seconds for {} cards",
        start_time,
        end_time,
        (end_time - start_time).num_seconds(),
        results.len()
    );
    Ok(results)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting");

    let queries = get_card_list()?;
    if queries.is_empty() {
        println!("No cards to price");
        return Ok(());
    }

    let results = price_cards(&queries).await?;

    let missing: Vec<&PriceResult> = results.iter().filter(|r| !r.found).collect();
    if !missing.is_empty() {
        warn!("{} cards could not be found in the store", missing.len());
    }

    println!("\ntotal price: {}", total_price(&results));

    if CONFIG.export {
        let path = if CONFIG.export_path.is_empty() {
            format!("{}{}.csv", EXPORT_FILE_PREFIX, date_time_as_string(None, None))
        } else {
            CONFIG.export_path.clone()
        };
        write_results(&path, &results)?;
    }

    Ok(())
}
