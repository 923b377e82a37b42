pub mod appointment;
pub mod person;
pub mod role;

pub use appointment::{Appointment, NewAppointment};
pub use person::{full_name_of, Person};
pub use role::PersonRole;
