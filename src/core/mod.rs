pub mod crm;
pub mod log;
pub mod observer;
pub mod payroll;
