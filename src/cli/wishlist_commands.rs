use crate::cli::context::CLIContext;
use crate::model::Priority;
use crate::ops::wishlist_ops;

pub fn list(ctx: &CLIContext) {
    let items = wishlist_ops::list_items(&ctx.conn, &ctx.session).unwrap_or_default();
    if items.is_empty() {
        println!("Your wishlist is empty. Use 'add-wish <title>' to add something.");
        return;
    }
    println!("Wishlist ({}):", items.len());
    for (i, item) in items.iter().enumerate() {
        let price = item.price.map(|p| format!(" - {}", p)).unwrap_or_default();
        println!("  {}. [{}] {}{}", i + 1, item.priority.to_db_str(), item.title, price);
    }
}

pub fn add(ctx: &CLIContext, args: &str) {
    let title = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("Title: ") {
            Some(s) if !s.is_empty() => s,
            _ => { println!("Title cannot be empty."); return; }
        }
    };
    let description = ctx.prompt_optional("Description (optional): ");
    let url = ctx.prompt_optional("Link (optional): ");
    let price = match ctx.prompt_optional("Price (optional): ") {
        None => None,
        Some(s) => match s.parse::<f64>() {
            Ok(p) => Some(p),
            Err(_) => { println!("Not a number: {}", s); return; }
        },
    };
    let priority = ctx
        .prompt_optional("Priority low/medium/high [medium]: ")
        .and_then(|s| Priority::from_db_str(&s.to_lowercase()))
        .unwrap_or_default();
    let group_id = match ctx.prompt_optional("For group (optional): ") {
        None => None,
        Some(q) => match ctx.find_group(&q) {
            Some(g) => Some(g.id),
            None => return,
        },
    };

    match wishlist_ops::add_item(
        &ctx.conn,
        &ctx.session,
        &title,
        description.as_deref(),
        url.as_deref(),
        price,
        priority,
        group_id,
    ) {
        Ok(item) => println!("Added to wishlist: {}", item.title),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn delete(ctx: &CLIContext, args: &str) {
    let items = wishlist_ops::list_items(&ctx.conn, &ctx.session).unwrap_or_default();
    let Some(item) = args.trim().parse::<usize>().ok().and_then(|i| items.get(i.wrapping_sub(1))) else {
        println!("Usage: delete-wish <number from 'wishlist'>");
        return;
    };
    match wishlist_ops::delete_item(&ctx.conn, &ctx.session, item.id) {
        Ok(()) => println!("Removed from wishlist: {}", item.title),
        Err(e) => ctx.print_error(&e),
    }
}
