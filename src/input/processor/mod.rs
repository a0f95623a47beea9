mod browse;
mod query_edit;

pub use browse::BrowseProcessor;
pub use query_edit::QueryEditProcessor;
