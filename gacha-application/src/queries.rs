pub mod history_queries;
pub mod import_queries;
pub mod server_queries;
pub mod statistics_queries;
