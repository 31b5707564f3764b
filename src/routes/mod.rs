pub mod average_price;
pub mod index;
