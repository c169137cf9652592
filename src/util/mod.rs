pub mod unicode;
pub mod url_input;
