pub mod ids;
pub mod user;
pub mod friend;
pub mod group;
pub mod member;
pub mod assignment;
pub mod wishlist;
pub mod gift_idea;

// Re-exports for convenience
pub use ids::Id;
pub use user::User;
pub use friend::Friend;
pub use group::Group;
pub use member::Member;
pub use assignment::Assignment;
pub use wishlist::{Priority, WishlistItem};
pub use gift_idea::{GiftIdea, PriceRange, PurchaseFilter};
