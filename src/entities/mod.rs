//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod account;
pub mod booking;
pub mod contact_message;
pub mod coupon;
pub mod coupon_redemption;
pub mod merchandise;
pub mod merchandise_redemption;
pub mod product;

// Re-export specific types to avoid conflicts
pub use account::{Column as AccountColumn, Entity as Account, Model as AccountModel, Role};
pub use booking::{Column as BookingColumn, Entity as Booking, Model as BookingModel};
pub use contact_message::{
    Column as ContactMessageColumn, Entity as ContactMessage, Model as ContactMessageModel,
};
pub use coupon::{Column as CouponColumn, Entity as Coupon, Model as CouponModel};
pub use coupon_redemption::{
    Column as CouponRedemptionColumn, Entity as CouponRedemption, Model as CouponRedemptionModel,
};
pub use merchandise::{Column as MerchandiseColumn, Entity as Merchandise, Model as MerchandiseModel};
pub use merchandise_redemption::{
    Column as MerchandiseRedemptionColumn, Entity as MerchandiseRedemption,
    Model as MerchandiseRedemptionModel,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
