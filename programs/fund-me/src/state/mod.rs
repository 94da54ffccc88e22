pub mod funder;
pub mod ledger;
pub mod price_feed;

pub use funder::*;
pub use ledger::*;
pub use price_feed::*;
