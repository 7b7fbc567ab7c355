pub mod login;
pub mod members;
pub mod results;
pub mod validate;
pub mod vote;
