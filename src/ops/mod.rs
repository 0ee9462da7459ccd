pub mod friend_ops;
pub mod group_ops;
pub mod member_ops;
pub mod draw_ops;
pub mod wishlist_ops;
pub mod gift_idea_ops;
