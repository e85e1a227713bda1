pub mod auth;
pub mod cpf;
pub mod health;
pub mod rooms;
pub mod schedules;
pub mod subjects;
pub mod users;
