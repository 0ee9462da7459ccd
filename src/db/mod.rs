pub mod schema;
pub mod user_repo;
pub mod friend_repo;
pub mod group_repo;
pub mod member_repo;
pub mod assignment_repo;
pub mod wishlist_repo;
pub mod gift_idea_repo;
