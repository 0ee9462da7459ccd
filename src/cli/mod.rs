pub mod context;
pub mod friend_commands;
pub mod group_commands;
pub mod draw_commands;
pub mod wishlist_commands;
pub mod gift_commands;

use std::path::Path;
use rusqlite::Connection;
use tracing::{error, info};

use crate::db::schema;
use crate::session::Session;
use context::CLIContext;

/// Run the interactive REPL.
pub fn run(db_path: &Path) {
    println!("Secret Santa");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let conn = match Connection::open(db_path) {
        Ok(c) => c,
        Err(e) => {
            error!(path = %db_path.display(), error = %e, "cannot open database");
            eprintln!("Error opening database: {}", e);
            return;
        }
    };

    if let Err(e) = schema::initialize(&conn) {
        eprintln!("Error initializing database: {}", e);
        return;
    }

    let session = match load_or_register(&conn) {
        Some(session) => session,
        None => return,
    };
    info!(user = %session.owner_id(), "session started");

    repl_loop(&CLIContext::new(conn, session));
}

fn load_or_register(conn: &Connection) -> Option<Session> {
    match Session::resume(conn) {
        Ok(Some(session)) => {
            println!("Welcome back, {}!", session.user().name);
            return Some(session);
        }
        Ok(None) => println!("No account found."),
        Err(e) => {
            println!("Error loading account: {}", e);
            return None;
        }
    }

    println!();
    print!("What's your name? ");
    use std::io::Write;
    std::io::stdout().flush().ok();

    let mut name = String::new();
    std::io::stdin().read_line(&mut name).ok()?;
    let name = name.trim().to_string();

    let name_lower = name.to_lowercase();
    if name_lower == "exit" || name_lower == "quit" || name_lower == "q" {
        return None;
    }

    match Session::register(conn, &name, None) {
        Ok(session) => {
            println!("Welcome, {}!", session.user().name);
            println!();
            Some(session)
        }
        Err(e) => {
            println!("Error: {}. Please restart and try again.", e);
            None
        }
    }
}

fn repl_loop(ctx: &CLIContext) {
    loop {
        let input = match ctx.read_line("> ") {
            Some(s) => s,
            None => break,
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, args) = parse_command(input);

        match command {
            "help" | "?" => print_help(),
            "quit" | "exit" | "q" => break,

            // Friends
            "friends" => friend_commands::list(ctx),
            "add-friend" => friend_commands::add(ctx, args),
            "edit-friend" => friend_commands::edit(ctx, args),
            "delete-friend" => friend_commands::delete(ctx, args),

            // Groups and participants
            "groups" | "ls" => group_commands::list(ctx),
            "add-group" => group_commands::add(ctx, args),
            "show-group" | "show" => group_commands::show(ctx, args),
            "edit-group" => group_commands::edit(ctx, args),
            "delete-group" => group_commands::delete(ctx, args),
            "add-member" => group_commands::add_member(ctx, args),
            "import-friend" => group_commands::import_friend(ctx, args),
            "join" => group_commands::join(ctx, args),
            "remove-member" => group_commands::remove_member(ctx, args),

            // Draw
            "draw" => draw_commands::draw(ctx, args),
            "results" => draw_commands::results(ctx, args),
            "my-match" => draw_commands::my_match(ctx, args),
            "export" => draw_commands::export(ctx, args),

            // Wishlist
            "wishlist" => wishlist_commands::list(ctx),
            "add-wish" => wishlist_commands::add(ctx, args),
            "delete-wish" => wishlist_commands::delete(ctx, args),

            // Gift ideas
            "ideas" => gift_commands::list(ctx, args),
            "add-idea" => gift_commands::add(ctx, args),
            "edit-idea" => gift_commands::edit(ctx, args),
            "bought" => gift_commands::toggle_bought(ctx, args),
            "delete-idea" => gift_commands::delete(ctx, args),

            _ => println!("Unknown command: {}. Type 'help' for commands.", command),
        }
    }
}

/// Split input into command and the rest of the line.
fn parse_command(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find(|c: char| c == ' ' || c == '\t') {
        Some(pos) => (&input[..pos], input[pos..].trim()),
        None => (input, ""),
    }
}

fn print_help() {
    println!(r#"
COMMANDS:

  Friends:
    friends                   List your friends
    add-friend [name]         Add a friend
    edit-friend <name>        Edit a friend
    delete-friend <name>      Delete a friend and their gift ideas

  Groups:
    groups                    List your groups
    add-group [name]          Create a group
    show-group <group>        Show group details and participants
    edit-group <group>        Edit name, description or budget
    delete-group <group>      Delete a group with its participants and draw
    add-member <group>        Add a participant by name
    import-friend <group>     Add one of your friends as a participant
    join <group>              Take part in a group yourself
    remove-member <group>     Remove a participant

  Draw:
    draw <group>              Run the draw (needs 3+ participants)
    results <group>           View results, revealing them one at a time
    my-match <group>          Show who one participant gives to
    export <group>            Export results as JSON

  Wishlist:
    wishlist                  List your wishlist
    add-wish [title]          Add an item
    delete-wish <number>      Remove an item

  Gift ideas:
    ideas [pending|purchased] [friend]
                              List ideas for your friends
    add-idea [friend]         Record a gift idea for a friend
    edit-idea <number>        Edit an idea
    bought <number>           Mark an idea as bought (again to undo)
    delete-idea <number>      Remove an idea

  Other:
    help                      Show this help
    exit / quit / q           Exit

TIPS:
  - Names are case-insensitive and partial matches work
  - Adding or removing participants after a draw clears it"#);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_command_splits_on_first_space() {
        assert_eq!(parse_command("draw  Office party "), ("draw", "Office party"));
    }

    #[test]
    fn parse_command_without_args() {
        assert_eq!(parse_command("groups"), ("groups", ""));
    }
}
