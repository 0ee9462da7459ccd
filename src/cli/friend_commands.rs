use crate::cli::context::CLIContext;
use crate::ops::friend_ops;

pub fn list(ctx: &CLIContext) {
    let friends = friend_ops::list_friends(&ctx.conn, &ctx.session).unwrap_or_default();
    if friends.is_empty() {
        println!("No friends yet. Use 'add-friend <name>' to add one.");
        return;
    }
    println!("Friends ({}):", friends.len());
    for friend in &friends {
        match &friend.email {
            Some(email) => println!("  {} <{}>", friend.name, email),
            None => println!("  {}", friend.name),
        }
    }
}

pub fn add(ctx: &CLIContext, args: &str) {
    let name = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("Name: ") {
            Some(s) if !s.is_empty() => s,
            _ => { println!("Name cannot be empty."); return; }
        }
    };
    let email = ctx.prompt_optional("Email (optional): ");
    let phone = ctx.prompt_optional("Phone (optional): ");
    let notes = ctx.prompt_optional("Notes (optional): ");

    match friend_ops::add_friend(&ctx.conn, &ctx.session, &name, email.as_deref(), phone.as_deref(), notes.as_deref()) {
        Ok(friend) => println!("Added friend: {}", friend.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn edit(ctx: &CLIContext, args: &str) {
    let friend = match if args.is_empty() { println!("Usage: edit-friend <name>"); return; } else { ctx.find_friend(args) } {
        Some(f) => f,
        None => return,
    };

    let name = ctx.prompt_optional(&format!("Name [{}]: ", friend.name));
    let email = ctx
        .prompt_optional(&format!("Email [{}] ('clear' to remove): ", friend.email.as_deref().unwrap_or("")))
        .map(|s| if s.eq_ignore_ascii_case("clear") { None } else { Some(s) });

    match friend_ops::update_friend(
        &ctx.conn,
        &ctx.session,
        friend.id,
        name.as_deref(),
        email.as_ref().map(|e| e.as_deref()),
        None,
        None,
    ) {
        Ok(f) => println!("Updated friend: {}", f.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn delete(ctx: &CLIContext, args: &str) {
    let friend = match if args.is_empty() { println!("Usage: delete-friend <name>"); return; } else { ctx.find_friend(args) } {
        Some(f) => f,
        None => return,
    };
    if !ctx.confirm(&format!("Delete {}?", friend.name)) {
        return;
    }
    match friend_ops::delete_friend(&ctx.conn, &ctx.session, friend.id) {
        Ok(()) => println!("Deleted friend: {}", friend.name),
        Err(e) => ctx.print_error(&e),
    }
}
