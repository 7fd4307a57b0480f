mod default_pin_collector;
pub mod negotiate;

pub use default_pin_collector::DefaultPinCollector;
