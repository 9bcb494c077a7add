pub mod email;
pub mod factory;
pub mod repositories;
pub mod storage;
