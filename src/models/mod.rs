pub mod movie;
pub mod ticket;
pub mod user;

pub use movie::Movie;
pub use ticket::Ticket;
pub use user::User;
