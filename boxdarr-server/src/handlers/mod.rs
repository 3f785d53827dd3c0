pub mod auth;
pub mod letterboxd;
pub mod radarr;
pub mod system;
