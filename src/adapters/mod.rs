//! Concrete delivery channel adapters.

pub mod whatsapp;
