pub mod initialize;
pub mod feed_admin;
pub mod fund;
pub mod withdraw;
pub mod queries;

pub use initialize::*;
pub use feed_admin::*;
pub use fund::*;
pub use withdraw::*;
pub use queries::*;
