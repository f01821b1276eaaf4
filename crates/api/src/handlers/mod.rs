pub mod admin;
pub mod auth;
pub mod contact;
pub mod contact_submissions;
pub mod content;
pub mod roles;
pub mod settings;
