pub mod group_queries;
pub mod draw_queries;
