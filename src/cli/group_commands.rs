use chrono::NaiveDate;

use crate::cli::context::CLIContext;
use crate::draw::MIN_PARTICIPANTS;
use crate::model::Group;
use crate::ops::*;
use crate::queries::group_queries;

pub fn list(ctx: &CLIContext) {
    let groups = group_queries::groups_with_members(&ctx.conn, &ctx.session).unwrap_or_default();
    if groups.is_empty() {
        println!("No groups yet. Use 'add-group <name>' to create one.");
        return;
    }
    println!("Groups ({}):", groups.len());
    for g in &groups {
        let status = if g.group.is_drawn { " [drawn]" } else { "" };
        println!("  {} ({} participants){}", g.group.name, g.member_count(), status);
    }
}

pub fn add(ctx: &CLIContext, args: &str) {
    let name = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("Group name: ") {
            Some(s) if !s.is_empty() => s,
            _ => { println!("Name cannot be empty."); return; }
        }
    };
    let description = ctx.prompt_optional("Description (optional): ");
    let Some(budget_min) = read_amount(ctx, "Minimum budget (optional): ") else { return };
    let Some(budget_max) = read_amount(ctx, "Maximum budget (optional): ") else { return };
    let Some(draw_date) = read_date(ctx, "Draw date YYYY-MM-DD (optional): ") else { return };
    let Some(exchange_date) = read_date(ctx, "Exchange date YYYY-MM-DD (optional): ") else { return };

    match group_ops::create_group(
        &ctx.conn,
        &ctx.session,
        &name,
        description.as_deref(),
        budget_min,
        budget_max,
        draw_date,
        exchange_date,
    ) {
        Ok(group) => println!("Created group: {}", group.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn show(ctx: &CLIContext, args: &str) {
    let Some(group) = require_group(ctx, args, "show-group") else { return };
    let details = match group_queries::group_with_members(&ctx.conn, &ctx.session, group.id) {
        Ok(d) => d,
        Err(e) => { ctx.print_error(&e); return; }
    };
    let g = &details.group;

    println!();
    println!("Name: {}", g.name);
    println!("Description: {}", g.description.as_deref().unwrap_or("(none)"));
    println!("Budget: {}", g.budget_label().unwrap_or_else(|| "(none)".into()));
    println!("Draw date: {}", g.draw_date.map(|d| d.to_string()).unwrap_or_else(|| "(none)".into()));
    println!("Exchange date: {}", g.exchange_date.map(|d| d.to_string()).unwrap_or_else(|| "(none)".into()));
    println!("Drawn: {}", if g.is_drawn { "yes" } else { "no" });
    if details.members.is_empty() {
        println!("Participants: (none)");
    } else {
        let names: Vec<&str> = details.members.iter().map(|m| m.name.as_str()).collect();
        println!("Participants ({}): {}", names.len(), names.join(", "));
    }
    if !details.can_draw() {
        println!("Add at least {} participants to run the draw.", MIN_PARTICIPANTS);
    }
    println!();
}

pub fn edit(ctx: &CLIContext, args: &str) {
    let Some(group) = require_group(ctx, args, "edit-group") else { return };
    println!("Editing group: {} (press Enter to keep a value, 'clear' to remove it)", group.name);

    let name = ctx.prompt_optional(&format!("Name [{}]: ", group.name));
    let description = ctx
        .prompt_optional(&format!("Description [{}]: ", group.description.as_deref().unwrap_or("")))
        .map(|s| if s.eq_ignore_ascii_case("clear") { None } else { Some(s) });
    let Some(budget_min) = read_amount_edit(ctx, "Minimum budget", group.budget_min) else { return };
    let Some(budget_max) = read_amount_edit(ctx, "Maximum budget", group.budget_max) else { return };

    match group_ops::update_group(
        &ctx.conn,
        &ctx.session,
        group.id,
        name.as_deref(),
        description.as_ref().map(|d| d.as_deref()),
        budget_min,
        budget_max,
        None,
        None,
    ) {
        Ok(g) => println!("Updated group: {}", g.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn delete(ctx: &CLIContext, args: &str) {
    let Some(group) = require_group(ctx, args, "delete-group") else { return };
    if !ctx.confirm(&format!("Delete '{}' with its participants and draw? This cannot be undone.", group.name)) {
        return;
    }
    match group_ops::delete_group(&ctx.conn, &ctx.session, group.id) {
        Ok(()) => println!("Deleted group: {}", group.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn add_member(ctx: &CLIContext, args: &str) {
    let Some(group) = require_group(ctx, args, "add-member") else { return };
    let name = match ctx.prompt("Participant name: ") {
        Some(s) if !s.is_empty() => s,
        _ => { println!("Name cannot be empty."); return; }
    };
    let email = ctx.prompt_optional("Email (optional): ");
    warn_if_drawn(&group);

    match member_ops::add_member(&ctx.conn, &ctx.session, group.id, &name, email.as_deref()) {
        Ok(m) => println!("Added {} to {}", m.name, group.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn import_friend(ctx: &CLIContext, args: &str) {
    let Some(group) = require_group(ctx, args, "import-friend") else { return };
    let query = ctx.prompt("Friend name: ").unwrap_or_default();
    let Some(friend) = ctx.find_friend(&query) else { return };
    warn_if_drawn(&group);

    match member_ops::add_friend_to_group(&ctx.conn, &ctx.session, group.id, friend.id) {
        Ok(m) => println!("Added {} to {}", m.name, group.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn join(ctx: &CLIContext, args: &str) {
    let Some(group) = require_group(ctx, args, "join") else { return };
    warn_if_drawn(&group);
    match member_ops::join_group(&ctx.conn, &ctx.session, group.id) {
        Ok(_) => println!("You are now participating in {}", group.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn remove_member(ctx: &CLIContext, args: &str) {
    let Some(group) = require_group(ctx, args, "remove-member") else { return };
    let query = ctx.prompt("Participant name: ").unwrap_or_default();
    let Some(member) = ctx.find_member(&group, &query) else { return };
    warn_if_drawn(&group);

    match member_ops::remove_member(&ctx.conn, &ctx.session, member.id) {
        Ok(()) => println!("Removed {} from {}", member.name, group.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub(crate) fn require_group(ctx: &CLIContext, args: &str, command: &str) -> Option<Group> {
    if args.is_empty() {
        println!("Usage: {} <group>", command);
        return None;
    }
    ctx.find_group(args)
}

fn warn_if_drawn(group: &Group) {
    if group.is_drawn {
        println!("Note: '{}' was already drawn; changing participants clears the draw.", group.name);
    }
}

/// Outer None means the input was invalid and the command should stop.
fn read_amount(ctx: &CLIContext, prompt: &str) -> Option<Option<f64>> {
    match ctx.prompt_optional(prompt) {
        None => Some(None),
        Some(s) => match s.parse::<f64>() {
            Ok(v) => Some(Some(v)),
            Err(_) => { println!("Not a number: {}", s); None }
        },
    }
}

fn read_amount_edit(ctx: &CLIContext, label: &str, current: Option<f64>) -> Option<Option<Option<f64>>> {
    let shown = current.map(|v| v.to_string()).unwrap_or_default();
    match ctx.prompt_optional(&format!("{} [{}]: ", label, shown)) {
        None => Some(None),
        Some(s) if s.eq_ignore_ascii_case("clear") => Some(Some(None)),
        Some(s) => match s.parse::<f64>() {
            Ok(v) => Some(Some(Some(v))),
            Err(_) => { println!("Not a number: {}", s); None }
        },
    }
}

fn read_date(ctx: &CLIContext, prompt: &str) -> Option<Option<NaiveDate>> {
    match ctx.prompt_optional(prompt) {
        None => Some(None),
        Some(s) => match NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            Ok(d) => Some(Some(d)),
            Err(_) => { println!("Invalid date: {} (expected YYYY-MM-DD)", s); None }
        },
    }
}
