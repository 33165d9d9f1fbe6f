pub mod accounts;
pub mod attendance;
pub mod auth;
pub mod grades;
pub mod parents;
pub mod professors;
pub mod shared;
pub mod students;
pub mod subjects;
