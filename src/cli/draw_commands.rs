use crate::cli::context::CLIContext;
use crate::cli::group_commands::require_group;
use crate::draw::RevealState;
use crate::error::{SantaError, SantaResult};
use crate::model::{Group, Id};
use crate::ops::draw_ops;
use crate::queries::draw_queries::{self, DrawResults};

pub fn draw(ctx: &CLIContext, args: &str) {
    let Some(group) = require_group(ctx, args, "draw") else { return };

    if group.is_drawn && !ctx.confirm("This group was already drawn. Run a new draw?") {
        return;
    }

    match draw_ops::draw_group(&ctx.conn, &ctx.session, group.id, &mut rand::thread_rng()) {
        Ok(assignments) => {
            println!("Draw complete for {}: {} pairings.", group.name, assignments.len());
            println!("Use 'results {}' to reveal them.", group.name);
        }
        Err(e @ SantaError::InsufficientParticipants { .. }) => {
            ctx.print_error(&e);
            println!("Add more participants with 'add-member' or 'import-friend'.");
        }
        Err(e) => ctx.print_error(&e),
    }
}

/// Shows a group's results with everything hidden, then lets the viewer
/// reveal entries one by one.
pub fn results(ctx: &CLIContext, args: &str) {
    let Some(group) = require_group(ctx, args, "results") else { return };
    let results = match draw_queries::draw_results(&ctx.conn, &ctx.session, group.id) {
        Ok(r) => r,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };

    if results.entries.is_empty() {
        println!("{} has not been drawn yet.", results.group_name);
        return;
    }
    if !results.complete {
        println!(
            "The stored results for {} are incomplete. Run 'draw {}' again.",
            results.group_name, results.group_name
        );
        return;
    }

    let mut reveal = RevealState::new();
    loop {
        print_results(&results, &reveal);
        let input = match ctx.prompt("Number to toggle, 'all', 'hide' or Enter to finish: ") {
            Some(s) if !s.is_empty() => s,
            _ => break,
        };
        match input.as_str() {
            "all" => reveal.reveal_all(results.assignment_ids()),
            "hide" => reveal.hide_all(),
            "done" | "q" => break,
            other => match other.parse::<usize>().ok().and_then(|i| results.entries.get(i.wrapping_sub(1))) {
                Some(entry) => {
                    reveal.toggle_reveal(entry.assignment.id);
                }
                None => println!("No entry {}", other),
            },
        }
    }
}

fn print_results(results: &DrawResults, reveal: &RevealState) {
    println!();
    println!("{} ({} of {} revealed)", results.group_name, reveal.len(), results.entries.len());
    for (i, entry) in results.entries.iter().enumerate() {
        let receiver = if reveal.is_revealed(entry.assignment.id) {
            entry.receiver_name.as_str()
        } else {
            "???"
        };
        println!("  {}. {} -> {}", i + 1, entry.giver_name, receiver);
    }
}

pub fn my_match(ctx: &CLIContext, args: &str) {
    let Some(group) = require_group(ctx, args, "my-match") else { return };
    let query = ctx.prompt("Your name in the group: ").unwrap_or_default();
    let Some(member) = ctx.find_member(&group, &query) else { return };

    match draw_queries::reveal_for_member(&ctx.conn, &ctx.session, member.id) {
        Ok(reveal) => {
            println!("{}, in {} you give a gift to {}.", reveal.giver_name, reveal.group_name, reveal.receiver_name);
            if !reveal.receiver_wishlist.is_empty() {
                println!("Their wishlist:");
                for item in &reveal.receiver_wishlist {
                    match item.price {
                        Some(p) => println!("  - {} ({})", item.title, p),
                        None => println!("  - {}", item.title),
                    }
                }
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn export(ctx: &CLIContext, args: &str) {
    let Some(group) = require_group(ctx, args, "export") else { return };
    let path = ctx.prompt_optional("File path (Enter to print): ");
    if let Err(e) = export_results(ctx, group.id, path.as_deref()) {
        ctx.print_error(&e);
    }
}

fn export_results(
    ctx: &CLIContext,
    group_id: Id<Group>,
    path: Option<&str>,
) -> SantaResult<()> {
    let results = draw_queries::draw_results(&ctx.conn, &ctx.session, group_id)?;
    let json = serde_json::to_string_pretty(&results)?;
    match path {
        Some(p) => {
            std::fs::write(p, json)?;
            println!("Wrote {} results to {}", results.entries.len(), p);
        }
        None => println!("{}", json),
    }
    Ok(())
}
