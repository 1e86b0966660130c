pub mod portfolio;
pub mod projection;
