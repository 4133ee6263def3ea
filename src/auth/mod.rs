//! Authentication: session tokens, password hashing, request guards

pub mod middleware;
pub mod password;
pub mod token;
