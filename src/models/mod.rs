pub mod clinic;
pub mod doctor;
pub mod enums;
pub mod review;
pub mod schedule;
pub mod specialty;
pub mod turn;

pub use clinic::Clinic;
pub use doctor::Doctor;
pub use review::Review;
pub use schedule::Schedule;
pub use specialty::Specialty;
pub use turn::{SessionSummary, Turn};
