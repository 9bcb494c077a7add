pub mod auth;
pub mod checkin;
pub mod communication;
pub mod event;
pub mod guest;
pub mod health;
pub mod rsvp;
