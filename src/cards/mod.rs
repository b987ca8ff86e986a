pub mod card_query;
pub mod price;
pub mod price_result;
