use std::collections::HashMap;

use crate::cli::context::CLIContext;
use crate::model::{GiftIdea, Id, PriceRange, Priority, PurchaseFilter};
use crate::ops::{friend_ops, gift_idea_ops};

/// `ideas [pending|purchased] [friend]`. Numbers always refer to the full,
/// unfiltered list so they stay valid for `bought`, `edit-idea` and
/// `delete-idea`.
pub fn list(ctx: &CLIContext, args: &str) {
    let (filter, rest) = match args.split_once(' ').unwrap_or((args, "")) {
        ("pending", rest) => (PurchaseFilter::Pending, rest.trim()),
        ("purchased", rest) => (PurchaseFilter::Purchased, rest.trim()),
        ("all", rest) => (PurchaseFilter::All, rest.trim()),
        _ => (PurchaseFilter::All, args),
    };

    let friend_id = if rest.is_empty() {
        None
    } else {
        match ctx.find_friend(rest) {
            Some(f) => Some(f.id),
            None => return,
        }
    };

    let ideas = match gift_idea_ops::list_ideas(&ctx.conn, &ctx.session, friend_id, filter) {
        Ok(i) => i,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };
    if ideas.is_empty() {
        println!("No gift ideas. Use 'add-idea <friend>' to record one.");
        return;
    }

    let numbers: HashMap<Id<GiftIdea>, usize> = all_ideas(ctx)
        .iter()
        .enumerate()
        .map(|(i, idea)| (idea.id, i + 1))
        .collect();
    let names: HashMap<_, String> = friend_ops::list_friends(&ctx.conn, &ctx.session)
        .unwrap_or_default()
        .into_iter()
        .map(|f| (f.id, f.name))
        .collect();

    println!("Gift ideas ({}):", ideas.len());
    for idea in &ideas {
        let mark = if idea.is_purchased { "x" } else { " " };
        let friend = names.get(&idea.friend_id).map(String::as_str).unwrap_or("?");
        let range = idea.price_range.map(|r| format!(" {}", r.label())).unwrap_or_default();
        println!(
            "  {}. [{}] {} for {} ({}){}",
            numbers.get(&idea.id).copied().unwrap_or(0),
            mark,
            idea.title,
            friend,
            idea.priority.to_db_str(),
            range
        );
    }
}

pub fn add(ctx: &CLIContext, args: &str) {
    let query = if args.is_empty() {
        ctx.prompt("Friend: ").unwrap_or_default()
    } else {
        args.to_string()
    };
    let Some(friend) = ctx.find_friend(&query) else { return };

    let title = match ctx.prompt("Idea: ") {
        Some(s) if !s.is_empty() => s,
        _ => { println!("Title cannot be empty."); return; }
    };
    let description = ctx.prompt_optional("Description (optional): ");
    let Some(price_range) = read_price_range(ctx) else { return };
    let url = ctx.prompt_optional("Link (optional): ");
    let priority = read_priority(ctx).unwrap_or_default();

    match gift_idea_ops::add_idea(
        &ctx.conn,
        &ctx.session,
        friend.id,
        &title,
        description.as_deref(),
        price_range,
        url.as_deref(),
        priority,
    ) {
        Ok(idea) => println!("Saved idea for {}: {}", friend.name, idea.title),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn edit(ctx: &CLIContext, args: &str) {
    let Some(idea) = pick_idea(ctx, args, "edit-idea") else { return };
    println!("Editing: {} (press Enter to keep a value, 'clear' to remove it)", idea.title);

    let title = ctx.prompt_optional(&format!("Title [{}]: ", idea.title));
    let description = ctx
        .prompt_optional(&format!("Description [{}]: ", idea.description.as_deref().unwrap_or("")))
        .map(|s| if s.eq_ignore_ascii_case("clear") { None } else { Some(s) });
    let url = ctx
        .prompt_optional(&format!("Link [{}]: ", idea.url.as_deref().unwrap_or("")))
        .map(|s| if s.eq_ignore_ascii_case("clear") { None } else { Some(s) });
    let priority = read_priority(ctx);

    match gift_idea_ops::update_idea(
        &ctx.conn,
        &ctx.session,
        idea.id,
        None,
        title.as_deref(),
        description.as_ref().map(|d| d.as_deref()),
        None,
        url.as_ref().map(|u| u.as_deref()),
        priority,
    ) {
        Ok(i) => println!("Updated idea: {}", i.title),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn toggle_bought(ctx: &CLIContext, args: &str) {
    let Some(idea) = pick_idea(ctx, args, "bought") else { return };
    match gift_idea_ops::toggle_purchased(&ctx.conn, &ctx.session, idea.id) {
        Ok(i) if i.is_purchased => println!("Marked as bought: {}", i.title),
        Ok(i) => println!("Marked as not bought: {}", i.title),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn delete(ctx: &CLIContext, args: &str) {
    let Some(idea) = pick_idea(ctx, args, "delete-idea") else { return };
    if !ctx.confirm(&format!("Delete idea '{}'?", idea.title)) {
        return;
    }
    match gift_idea_ops::delete_idea(&ctx.conn, &ctx.session, idea.id) {
        Ok(()) => println!("Deleted idea: {}", idea.title),
        Err(e) => ctx.print_error(&e),
    }
}

fn all_ideas(ctx: &CLIContext) -> Vec<GiftIdea> {
    gift_idea_ops::list_ideas(&ctx.conn, &ctx.session, None, PurchaseFilter::All).unwrap_or_default()
}

fn pick_idea(ctx: &CLIContext, args: &str, command: &str) -> Option<GiftIdea> {
    let mut ideas = all_ideas(ctx);
    match args.trim().parse::<usize>() {
        Ok(n) if n >= 1 && n <= ideas.len() => Some(ideas.swap_remove(n - 1)),
        _ => {
            println!("Usage: {} <number from 'ideas'>", command);
            None
        }
    }
}

/// Outer None means the input was invalid and the command should stop.
fn read_price_range(ctx: &CLIContext) -> Option<Option<PriceRange>> {
    match ctx.prompt_optional("Price range low/medium/high/luxury (optional): ") {
        None => Some(None),
        Some(s) => match PriceRange::from_db_str(&s.to_lowercase()) {
            Some(r) => Some(Some(r)),
            None => {
                println!("Unknown price range: {}", s);
                None
            }
        },
    }
}

fn read_priority(ctx: &CLIContext) -> Option<Priority> {
    ctx.prompt_optional("Priority low/medium/high [medium]: ")
        .and_then(|s| Priority::from_db_str(&s.to_lowercase()))
}
