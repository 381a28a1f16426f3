//! Feed provider trait definitions.

pub mod eastmoney;
mod traits;

pub use eastmoney::{EastmoneyConfig, EastmoneyProvider};
pub use traits::FeedProvider;
