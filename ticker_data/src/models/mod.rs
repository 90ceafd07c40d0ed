pub mod balance_sheet;
pub mod news;
pub mod price;
pub mod snapshot;
pub mod ticker;
