pub mod call_service;

pub use call_service::CallService;
