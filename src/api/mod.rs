pub mod birds;
pub mod client;
pub mod dto;
pub mod error;
pub mod habitats;
pub mod regions;
