pub mod booking;
pub mod catalog;
pub mod coupon;
pub mod destination;
pub mod guide;
pub mod hotel;
pub mod loyalty;
pub mod package;
pub mod payment;
pub mod transport;
pub mod user;
