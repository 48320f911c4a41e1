//! Domain entities - Core business objects with no external dependencies

pub mod cart;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{Cart, CartItem};
pub use product::{Product, ProductDraft, ProductPatch, Rating};
pub use session::SessionIdentity;
pub use user::{Address, Company, Geolocation, User, UserDraft, UserPatch};

/// Entities addressable by an integer identifier
pub trait Identified {
    fn id(&self) -> u64;
}
