pub mod output;
pub mod request;
