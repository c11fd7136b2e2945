pub mod session;
pub mod slots;
pub mod volunteers;

pub use session::{SessionCheck, SessionRepo};
pub use slots::SlotsRepo;
pub use volunteers::VolunteersRepo;
