//! Loads posts together with the users they reference. Rather than joining
//! in SQL, this loads the posts, looks up the distinct referenced users with
//! a single IN query, and attaches each user to its posts in memory.

use crate::database::Database;
use crate::errdata;
use crate::error::Result;
use crate::model::{Post, Record as _, User};
use crate::sql::{column, NullInt, Select};

use itertools::Itertools as _;
use std::collections::{HashMap, HashSet};
use std::io::Write;

/// Loads all posts and their users, and writes the referenced user ids, the
/// users, and the posts with users attached to out.
pub async fn read(db: &mut Database, out: &mut impl Write) -> Result<(Vec<User>, Vec<Post>)> {
    let mut posts: Vec<Post> = db.load(&Select::all().from(Post::TABLE)).await?;

    let user_ids = unique_ids(posts.iter().map(|post| &post.user_id));
    // The set has no order, sort it for display.
    writeln!(out, "uids = [{}]", user_ids.iter().sorted().join(" "))?;

    let users: Vec<User> = db
        .load(&Select::all().from(User::TABLE).filter(column("id").in_list(user_ids)))
        .await?;
    writeln!(out, "users = {}", serde_json::to_string_pretty(&users)?)?;

    attach_users(&mut posts, &users)?;
    writeln!(out, "posts = {}", serde_json::to_string_pretty(&posts)?)?;

    Ok((users, posts))
}

/// Returns the distinct valid ids, skipping NULLs.
pub fn unique_ids<'a>(ids: impl IntoIterator<Item = &'a NullInt>) -> HashSet<i64> {
    ids.into_iter().filter_map(NullInt::value).collect()
}

/// Attaches users to posts by user_id. Posts without an id are left alone.
/// Errors if a post references a user that isn't in users.
pub fn attach_users(posts: &mut [Post], users: &[User]) -> Result<()> {
    let users_by_id: HashMap<i64, &User> =
        users.iter().filter_map(|user| Some((user.id.value()?, user))).collect();

    for post in posts.iter_mut().filter(|post| post.id.is_valid()) {
        let Some(user_id) = post.user_id.value() else {
            continue;
        };
        let Some(user) = users_by_id.get(&user_id) else {
            return errdata!("post {} references unknown user {user_id}", post.id);
        };
        post.user = Some((*user).clone());
    }
    Ok(())
}
