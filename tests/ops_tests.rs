use santa::db::*;
use santa::error::SantaError;
use santa::model::*;
use santa::ops::*;
use santa::session::Session;

fn setup() -> (rusqlite::Connection, Session) {
    let conn = schema::test_connection();
    let session = Session::register(&conn, "Marta", Some("marta@example.com")).unwrap();
    (conn, session)
}

fn other_session(conn: &rusqlite::Connection) -> Session {
    Session::register(conn, "Intruder", None).unwrap()
}

fn group_of(conn: &rusqlite::Connection, session: &Session, names: &[&str]) -> Group {
    let group = group_ops::create_group(conn, session, "Christmas", None, None, None, None, None).unwrap();
    for name in names {
        member_ops::add_member(conn, session, group.id, name, None).unwrap();
    }
    group
}

// ==========================================================================
// FRIEND OPS TESTS
// ==========================================================================

#[test]
fn add_friend_trims_and_validates() {
    let (conn, session) = setup();
    let friend = friend_ops::add_friend(&conn, &session, "  Rui ", Some(" rui@example.com "), None, Some("  ")).unwrap();
    assert_eq!(friend.name, "Rui");
    assert_eq!(friend.email.as_deref(), Some("rui@example.com"));
    assert_eq!(friend.notes, None);
}

#[test]
fn add_friend_rejects_blank_name_and_bad_email() {
    let (conn, session) = setup();
    assert!(matches!(
        friend_ops::add_friend(&conn, &session, " ", None, None, None),
        Err(SantaError::BlankField { .. })
    ));
    assert!(matches!(
        friend_ops::add_friend(&conn, &session, "Rui", Some("nope"), None, None),
        Err(SantaError::InvalidEmail(_))
    ));
}

#[test]
fn update_friend_clears_email() {
    let (conn, session) = setup();
    let friend = friend_ops::add_friend(&conn, &session, "Rui", Some("rui@example.com"), None, None).unwrap();
    let updated = friend_ops::update_friend(&conn, &session, friend.id, None, Some(None), None, None).unwrap();
    assert_eq!(updated.email, None);
    assert_eq!(updated.name, "Rui");
}

#[test]
fn other_user_cannot_touch_friend() {
    let (conn, session) = setup();
    let friend = friend_ops::add_friend(&conn, &session, "Rui", None, None, None).unwrap();
    let intruder = other_session(&conn);
    assert!(matches!(
        friend_ops::delete_friend(&conn, &intruder, friend.id),
        Err(SantaError::NotOwner { .. })
    ));
}

#[test]
fn delete_friend_unlinks_group_members() {
    let (conn, session) = setup();
    let group = group_of(&conn, &session, &[]);
    let friend = friend_ops::add_friend(&conn, &session, "Rui", None, None, None).unwrap();
    let member = member_ops::add_friend_to_group(&conn, &session, group.id, friend.id).unwrap();

    friend_ops::delete_friend(&conn, &session, friend.id).unwrap();

    let found = member_repo::find_by_id(&conn, member.id).unwrap().unwrap();
    assert_eq!(found.name, "Rui");
    assert_eq!(found.friend_id, None);
}

#[test]
fn delete_friend_removes_their_gift_ideas() {
    let (conn, session) = setup();
    let rui = friend_ops::add_friend(&conn, &session, "Rui", None, None, None).unwrap();
    let ana = friend_ops::add_friend(&conn, &session, "Ana", None, None, None).unwrap();
    gift_idea_ops::add_idea(&conn, &session, rui.id, "Mug", None, None, None, Priority::Low).unwrap();
    let kept = gift_idea_ops::add_idea(&conn, &session, ana.id, "Book", None, None, None, Priority::Low).unwrap();

    friend_ops::delete_friend(&conn, &session, rui.id).unwrap();

    let left = gift_idea_ops::list_ideas(&conn, &session, None, PurchaseFilter::All).unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].id, kept.id);
}

#[test]
fn failed_friend_delete_changes_nothing() {
    let (conn, session) = setup();
    let group = group_of(&conn, &session, &[]);
    let friend = friend_ops::add_friend(&conn, &session, "Rui", None, None, None).unwrap();
    let member = member_ops::add_friend_to_group(&conn, &session, group.id, friend.id).unwrap();
    gift_idea_ops::add_idea(&conn, &session, friend.id, "Mug", None, None, None, Priority::Low).unwrap();

    conn.execute_batch(
        "CREATE TRIGGER fail_friend_delete BEFORE DELETE ON friends
         BEGIN SELECT RAISE(ABORT, 'locked'); END;",
    )
    .unwrap();

    assert!(friend_ops::delete_friend(&conn, &session, friend.id).is_err());

    let found = member_repo::find_by_id(&conn, member.id).unwrap().unwrap();
    assert_eq!(found.friend_id, Some(friend.id));
    assert_eq!(gift_idea_repo::find_by_friend(&conn, friend.id).unwrap().len(), 1);
    assert!(friend_repo::find_by_id(&conn, friend.id).unwrap().is_some());
}

// ==========================================================================
// GROUP OPS TESTS
// ==========================================================================

#[test]
fn create_group_rejects_infinite_budget() {
    let (conn, session) = setup();
    let err = group_ops::create_group(&conn, &session, "Christmas", None, Some(1.0), Some(f64::INFINITY), None, None)
        .unwrap_err();
    assert!(matches!(err, SantaError::NotFinite { .. }));
    assert!(group_ops::list_groups(&conn, &session).unwrap().is_empty());
}

#[test]
fn create_group_validates_budget() {
    let (conn, session) = setup();
    let err = group_ops::create_group(&conn, &session, "Office", None, Some(50.0), Some(10.0), None, None).unwrap_err();
    assert!(matches!(err, SantaError::InvalidBudget { .. }));

    let err = group_ops::create_group(&conn, &session, "Office", None, Some(-1.0), None, None, None).unwrap_err();
    assert!(matches!(err, SantaError::Negative { .. }));
}

#[test]
fn create_group_starts_undrawn() {
    let (conn, session) = setup();
    let group = group_ops::create_group(&conn, &session, " Office ", Some("Team"), Some(10.0), Some(20.0), None, None).unwrap();
    assert_eq!(group.name, "Office");
    assert_eq!(group.owner_id, session.owner_id());
    assert!(!group.is_drawn);
}

#[test]
fn update_group_checks_budget_against_existing_bound() {
    let (conn, session) = setup();
    let group = group_ops::create_group(&conn, &session, "Office", None, Some(10.0), Some(20.0), None, None).unwrap();

    let err = group_ops::update_group(&conn, &session, group.id, None, None, Some(Some(30.0)), None, None, None).unwrap_err();
    assert!(matches!(err, SantaError::InvalidBudget { .. }));

    let updated = group_ops::update_group(&conn, &session, group.id, None, None, None, Some(None), None, None).unwrap();
    assert_eq!(updated.budget_min, Some(10.0));
    assert_eq!(updated.budget_max, None);
}

#[test]
fn update_unknown_group_is_not_found() {
    let (conn, session) = setup();
    let err = group_ops::update_group(&conn, &session, Id::generate(), Some("X"), None, None, None, None, None).unwrap_err();
    assert!(matches!(err, SantaError::NotFound { .. }));
}

#[test]
fn delete_group_removes_members_and_results() {
    let (conn, session) = setup();
    let group = group_of(&conn, &session, &["A", "B", "C"]);
    draw_ops::draw_group(&conn, &session, group.id, &mut rand::thread_rng()).unwrap();
    let item = wishlist_ops::add_item(&conn, &session, "Book", None, None, None, Priority::High, Some(group.id)).unwrap();

    group_ops::delete_group(&conn, &session, group.id).unwrap();

    assert!(group_repo::find_by_id(&conn, group.id).unwrap().is_none());
    assert!(member_repo::find_by_group(&conn, group.id).unwrap().is_empty());
    assert!(assignment_repo::find_by_group(&conn, group.id).unwrap().is_empty());
    let kept = wishlist_repo::find_by_id(&conn, item.id).unwrap().unwrap();
    assert_eq!(kept.group_id, None);
}

#[test]
fn other_user_cannot_delete_group() {
    let (conn, session) = setup();
    let group = group_of(&conn, &session, &["A"]);
    let intruder = other_session(&conn);
    assert!(matches!(
        group_ops::delete_group(&conn, &intruder, group.id),
        Err(SantaError::NotOwner { .. })
    ));
    assert!(group_repo::find_by_id(&conn, group.id).unwrap().is_some());
}

// ==========================================================================
// MEMBER OPS TESTS
// ==========================================================================

#[test]
fn import_friend_copies_details() {
    let (conn, session) = setup();
    let group = group_of(&conn, &session, &[]);
    let friend = friend_ops::add_friend(&conn, &session, "Rui", Some("rui@example.com"), None, None).unwrap();

    let member = member_ops::add_friend_to_group(&conn, &session, group.id, friend.id).unwrap();
    assert_eq!(member.name, "Rui");
    assert_eq!(member.email.as_deref(), Some("rui@example.com"));
    assert_eq!(member.friend_id, Some(friend.id));
}

#[test]
fn import_same_friend_twice_is_rejected() {
    let (conn, session) = setup();
    let group = group_of(&conn, &session, &[]);
    let friend = friend_ops::add_friend(&conn, &session, "Rui", None, None, None).unwrap();
    member_ops::add_friend_to_group(&conn, &session, group.id, friend.id).unwrap();

    let err = member_ops::add_friend_to_group(&conn, &session, group.id, friend.id).unwrap_err();
    assert!(matches!(err, SantaError::AlreadyExists { .. }));
    assert_eq!(member_repo::count_by_group(&conn, group.id).unwrap(), 1);
}

#[test]
fn join_group_links_user_once() {
    let (conn, session) = setup();
    let group = group_of(&conn, &session, &[]);
    let me = member_ops::join_group(&conn, &session, group.id).unwrap();
    assert_eq!(me.user_id, Some(session.owner_id()));
    assert_eq!(me.email.as_deref(), Some("marta@example.com"));
    assert!(member_ops::join_group(&conn, &session, group.id).is_err());
}

#[test]
fn changing_members_of_drawn_group_clears_draw() {
    let (conn, session) = setup();
    let group = group_of(&conn, &session, &["A", "B", "C"]);
    draw_ops::draw_group(&conn, &session, group.id, &mut rand::thread_rng()).unwrap();

    member_ops::add_member(&conn, &session, group.id, "D", None).unwrap();

    let reloaded = group_repo::find_by_id(&conn, group.id).unwrap().unwrap();
    assert!(!reloaded.is_drawn);
    assert!(assignment_repo::find_by_group(&conn, group.id).unwrap().is_empty());
}

#[test]
fn remove_member_after_draw_succeeds() {
    let (conn, session) = setup();
    let group = group_of(&conn, &session, &["A", "B", "C", "D"]);
    draw_ops::draw_group(&conn, &session, group.id, &mut rand::thread_rng()).unwrap();
    let members = member_repo::find_by_group(&conn, group.id).unwrap();

    member_ops::remove_member(&conn, &session, members[0].id).unwrap();

    assert_eq!(member_repo::count_by_group(&conn, group.id).unwrap(), 3);
    assert!(!group_repo::find_by_id(&conn, group.id).unwrap().unwrap().is_drawn);
}

#[test]
fn add_member_rejects_blank_name() {
    let (conn, session) = setup();
    let group = group_of(&conn, &session, &[]);
    assert!(member_ops::add_member(&conn, &session, group.id, "  ", None).is_err());
}

// ==========================================================================
// WISHLIST OPS TESTS
// ==========================================================================

#[test]
fn add_wish_validates_price_and_group() {
    let (conn, session) = setup();
    assert!(matches!(
        wishlist_ops::add_item(&conn, &session, "Book", None, None, Some(-5.0), Priority::Low, None),
        Err(SantaError::Negative { .. })
    ));
    assert!(matches!(
        wishlist_ops::add_item(&conn, &session, "Book", None, None, Some(f64::INFINITY), Priority::Low, None),
        Err(SantaError::NotFinite { .. })
    ));
    assert!(matches!(
        wishlist_ops::add_item(&conn, &session, "Book", None, None, None, Priority::Low, Some(Id::generate())),
        Err(SantaError::NotFound { .. })
    ));
}

#[test]
fn update_and_delete_wish() {
    let (conn, session) = setup();
    let item = wishlist_ops::add_item(&conn, &session, "Book", None, Some(" https://example.com "), Some(12.0), Priority::Medium, None).unwrap();
    assert_eq!(item.url.as_deref(), Some("https://example.com"));

    let updated = wishlist_ops::update_item(&conn, &session, item.id, Some("Novel"), Some(None), Some(Priority::High)).unwrap();
    assert_eq!(updated.title, "Novel");
    assert_eq!(updated.price, None);
    assert_eq!(updated.priority, Priority::High);

    wishlist_ops::delete_item(&conn, &session, item.id).unwrap();
    assert!(wishlist_ops::list_items(&conn, &session).unwrap().is_empty());
}

// ==========================================================================
// GIFT IDEA OPS TESTS
// ==========================================================================

#[test]
fn add_idea_trims_and_starts_pending() {
    let (conn, session) = setup();
    let friend = friend_ops::add_friend(&conn, &session, "Rui", None, None, None).unwrap();

    let idea = gift_idea_ops::add_idea(
        &conn,
        &session,
        friend.id,
        "  Board game ",
        Some("  "),
        Some(PriceRange::High),
        Some(" https://example.com/game "),
        Priority::High,
    )
    .unwrap();

    assert_eq!(idea.title, "Board game");
    assert_eq!(idea.description, None);
    assert_eq!(idea.url.as_deref(), Some("https://example.com/game"));
    assert_eq!(idea.price_range, Some(PriceRange::High));
    assert_eq!(idea.owner_id, session.owner_id());
    assert!(!idea.is_purchased);
}

#[test]
fn add_idea_requires_title_and_known_friend() {
    let (conn, session) = setup();
    let friend = friend_ops::add_friend(&conn, &session, "Rui", None, None, None).unwrap();

    assert!(matches!(
        gift_idea_ops::add_idea(&conn, &session, friend.id, "   ", None, None, None, Priority::Low),
        Err(SantaError::BlankField { .. })
    ));
    assert!(matches!(
        gift_idea_ops::add_idea(&conn, &session, Id::generate(), "Mug", None, None, None, Priority::Low),
        Err(SantaError::NotFound { .. })
    ));
}

#[test]
fn cannot_add_idea_for_someone_elses_friend() {
    let (conn, session) = setup();
    let intruder = other_session(&conn);
    let friend = friend_ops::add_friend(&conn, &session, "Rui", None, None, None).unwrap();

    assert!(matches!(
        gift_idea_ops::add_idea(&conn, &intruder, friend.id, "Mug", None, None, None, Priority::Low),
        Err(SantaError::NotOwner { .. })
    ));
}

#[test]
fn update_idea_moves_and_clears_fields() {
    let (conn, session) = setup();
    let rui = friend_ops::add_friend(&conn, &session, "Rui", None, None, None).unwrap();
    let ana = friend_ops::add_friend(&conn, &session, "Ana", None, None, None).unwrap();
    let idea = gift_idea_ops::add_idea(&conn, &session, rui.id, "Mug", Some("Blue"), Some(PriceRange::Low), None, Priority::Low)
        .unwrap();

    let updated = gift_idea_ops::update_idea(
        &conn,
        &session,
        idea.id,
        Some(ana.id),
        Some("Teapot"),
        Some(None),
        Some(None),
        None,
        Some(Priority::High),
    )
    .unwrap();

    assert_eq!(updated.friend_id, ana.id);
    assert_eq!(updated.title, "Teapot");
    assert_eq!(updated.description, None);
    assert_eq!(updated.price_range, None);
    assert_eq!(updated.priority, Priority::High);

    let stored = gift_idea_repo::find_by_id(&conn, idea.id).unwrap().unwrap();
    assert_eq!(stored.friend_id, ana.id);
    assert_eq!(stored.title, "Teapot");
}

#[test]
fn toggle_purchased_and_filter() {
    let (conn, session) = setup();
    let friend = friend_ops::add_friend(&conn, &session, "Rui", None, None, None).unwrap();
    let mug = gift_idea_ops::add_idea(&conn, &session, friend.id, "Mug", None, None, None, Priority::Low).unwrap();
    gift_idea_ops::add_idea(&conn, &session, friend.id, "Scarf", None, None, None, Priority::Low).unwrap();

    let bought = gift_idea_ops::toggle_purchased(&conn, &session, mug.id).unwrap();
    assert!(bought.is_purchased);

    let purchased = gift_idea_ops::list_ideas(&conn, &session, None, PurchaseFilter::Purchased).unwrap();
    assert_eq!(purchased.len(), 1);
    assert_eq!(purchased[0].title, "Mug");

    let pending = gift_idea_ops::list_ideas(&conn, &session, Some(friend.id), PurchaseFilter::Pending).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].title, "Scarf");

    let again = gift_idea_ops::toggle_purchased(&conn, &session, mug.id).unwrap();
    assert!(!again.is_purchased);
    assert_eq!(
        gift_idea_ops::list_ideas(&conn, &session, None, PurchaseFilter::Pending).unwrap().len(),
        2
    );
}

#[test]
fn list_ideas_by_friend_and_newest_first() {
    let (conn, session) = setup();
    let rui = friend_ops::add_friend(&conn, &session, "Rui", None, None, None).unwrap();
    let ana = friend_ops::add_friend(&conn, &session, "Ana", None, None, None).unwrap();
    gift_idea_ops::add_idea(&conn, &session, rui.id, "Mug", None, None, None, Priority::Low).unwrap();
    gift_idea_ops::add_idea(&conn, &session, rui.id, "Socks", None, None, None, Priority::Low).unwrap();
    gift_idea_ops::add_idea(&conn, &session, ana.id, "Book", None, None, None, Priority::Low).unwrap();

    let for_rui = gift_idea_ops::list_ideas(&conn, &session, Some(rui.id), PurchaseFilter::All).unwrap();
    let titles: Vec<&str> = for_rui.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Socks", "Mug"]);

    assert_eq!(
        gift_idea_ops::list_ideas(&conn, &session, None, PurchaseFilter::All).unwrap().len(),
        3
    );
}

#[test]
fn other_user_cannot_touch_idea() {
    let (conn, session) = setup();
    let intruder = other_session(&conn);
    let friend = friend_ops::add_friend(&conn, &session, "Rui", None, None, None).unwrap();
    let idea = gift_idea_ops::add_idea(&conn, &session, friend.id, "Mug", None, None, None, Priority::Low).unwrap();

    assert!(matches!(
        gift_idea_ops::toggle_purchased(&conn, &intruder, idea.id),
        Err(SantaError::NotOwner { .. })
    ));
    assert!(matches!(
        gift_idea_ops::delete_idea(&conn, &intruder, idea.id),
        Err(SantaError::NotOwner { .. })
    ));
    assert!(gift_idea_ops::list_ideas(&conn, &intruder, None, PurchaseFilter::All).unwrap().is_empty());
}

#[test]
fn delete_idea_removes_it() {
    let (conn, session) = setup();
    let friend = friend_ops::add_friend(&conn, &session, "Rui", None, None, None).unwrap();
    let idea = gift_idea_ops::add_idea(&conn, &session, friend.id, "Mug", None, None, None, Priority::Low).unwrap();

    gift_idea_ops::delete_idea(&conn, &session, idea.id).unwrap();

    assert!(gift_idea_repo::find_by_id(&conn, idea.id).unwrap().is_none());
    assert!(matches!(
        gift_idea_ops::delete_idea(&conn, &session, idea.id),
        Err(SantaError::NotFound { .. })
    ));
}
