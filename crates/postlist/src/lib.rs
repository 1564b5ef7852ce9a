pub mod logic;
pub mod source;

pub use logic::{initial_listing, load_more, ListingState, PAGE_SIZE};
pub use source::{DocumentSource, PrismicSource, SourceConfig};
