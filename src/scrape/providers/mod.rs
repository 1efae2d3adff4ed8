//! Concrete source providers.

pub mod azmto;
pub mod dreamfilm;
pub mod filecdn;
pub mod frembed;
pub mod meinecloud;
pub mod twoembed;
pub mod vidsrc;

pub use azmto::AzmTo;
pub use dreamfilm::DreamFilm;
pub use filecdn::FileCdn;
pub use frembed::FrEmbed;
pub use meinecloud::MeineCloud;
pub use twoembed::TwoEmbed;
pub use vidsrc::VidSrc;
