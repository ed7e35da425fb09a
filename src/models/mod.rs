pub mod credentials;
pub mod fcm;
pub mod response;
pub mod validation;
