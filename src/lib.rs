pub mod batch_dispatcher;
pub mod card_list;
pub mod cards;
pub mod error;
pub mod page_fetcher;
pub mod price_extractor;
pub mod price_resolver;
pub mod set_resolver;
pub mod url_candidates;
pub mod utilities;

#[cfg(test)]
mod test;
