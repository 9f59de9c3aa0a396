pub mod service;
pub mod wmm;

pub use service::MagneticService;
