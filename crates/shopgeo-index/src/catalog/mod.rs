//! Catalogs built once from load rows and read-only afterwards.

mod products;
mod shops;
mod tags;

pub use products::{ProductCatalog, ProductHit};
pub use shops::{ShopCatalog, ShopHit};
pub use tags::TagCatalog;
