pub mod advisor;
pub mod amortization;
pub mod property;
pub mod request;
