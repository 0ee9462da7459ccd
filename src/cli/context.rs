use rusqlite::Connection;
use std::io::{self, Write};

use crate::error::SantaError;
use crate::model::*;
use crate::ops::{friend_ops, member_ops};
use crate::queries::group_queries;
use crate::session::Session;

pub struct CLIContext {
    pub conn: Connection,
    pub session: Session,
}

impl CLIContext {
    pub fn new(conn: Connection, session: Session) -> Self {
        Self { conn, session }
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    /// Read a line, trimmed.
    pub fn prompt(&self, prompt: &str) -> Option<String> {
        self.read_line(prompt).map(|s| s.trim().to_string())
    }

    /// Read an optional value; an empty answer is None.
    pub fn prompt_optional(&self, prompt: &str) -> Option<String> {
        self.prompt(prompt).filter(|s| !s.is_empty())
    }

    /// Ask a yes/no question. Anything but y/yes is no.
    pub fn confirm(&self, question: &str) -> bool {
        matches!(
            self.prompt(&format!("{} [y/N]: ", question)).as_deref(),
            Some("y") | Some("Y") | Some("yes")
        )
    }

    /// Find a group by name query. Prints error if not found or ambiguous.
    pub fn find_group(&self, args: &str) -> Option<Group> {
        let query = args.trim();
        if query.is_empty() {
            return None;
        }
        let groups = group_queries::find_groups_by_name(&self.conn, &self.session, query).unwrap_or_default();
        pick("group", query, groups, |g| g.name.as_str())
    }

    /// Find a friend by name query.
    pub fn find_friend(&self, args: &str) -> Option<Friend> {
        let query = args.trim();
        if query.is_empty() {
            return None;
        }
        let lower = query.to_lowercase();
        let friends: Vec<Friend> = friend_ops::list_friends(&self.conn, &self.session)
            .unwrap_or_default()
            .into_iter()
            .filter(|f| f.name.to_lowercase().contains(&lower))
            .collect();
        pick("friend", query, friends, |f| f.name.as_str())
    }

    /// Find a member of `group` by name query.
    pub fn find_member(&self, group: &Group, args: &str) -> Option<Member> {
        let query = args.trim();
        if query.is_empty() {
            return None;
        }
        let lower = query.to_lowercase();
        let members: Vec<Member> = member_ops::list_members(&self.conn, &self.session, group.id)
            .unwrap_or_default()
            .into_iter()
            .filter(|m| m.name.to_lowercase().contains(&lower))
            .collect();
        pick("member", query, members, |m| m.name.as_str())
    }

    /// Print an error.
    pub fn print_error(&self, e: &SantaError) {
        println!("Error: {}", e);
    }
}

/// Resolve a name query to one match, preferring an exact match.
fn pick<T, F>(kind: &str, query: &str, mut matches: Vec<T>, name: F) -> Option<T>
where
    F: Fn(&T) -> &str,
{
    match matches.len() {
        0 => {
            println!("No {} found matching '{}'", kind, query);
            None
        }
        1 => matches.pop(),
        _ => {
            if let Some(pos) = matches.iter().position(|m| name(m).eq_ignore_ascii_case(query)) {
                return Some(matches.swap_remove(pos));
            }
            println!("Multiple matches found:");
            for m in &matches {
                println!("  {}", name(m));
            }
            println!("Please be more specific.");
            None
        }
    }
}
