pub mod display;
pub mod net;

pub use net::NetIncomeCommand;
