pub mod add_book_cmd;
pub mod find_books_cmd;
pub mod update_book_cmd;
