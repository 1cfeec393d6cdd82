pub mod add_or_update_book_cmd;
pub mod get_stats_cmd;
pub mod list_books_cmd;
pub mod load_catalog_cmd;
pub mod remove_book_cmd;
pub mod save_catalog_cmd;
pub mod search_books_cmd;
