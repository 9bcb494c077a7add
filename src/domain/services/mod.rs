pub mod auth_service;
pub mod invite;
pub mod placeholder;
pub mod qr;
pub mod roster;
