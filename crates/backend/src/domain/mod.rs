pub mod a001_product;
pub mod a002_customer;
pub mod a003_staff;
pub mod a004_inquiry;
