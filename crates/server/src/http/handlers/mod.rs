pub mod admin;
pub mod analysis;
pub mod comments;
pub mod gbairais;
pub mod health;
