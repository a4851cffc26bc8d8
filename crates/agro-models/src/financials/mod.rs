pub mod employees;
pub mod interest;
pub mod main;
pub mod population_fed;

pub use employees::FinancialsEmployees;
pub use interest::FinancialsInterest;
pub use main::FinancialsMain;
pub use population_fed::FinancialsPopulationFed;
