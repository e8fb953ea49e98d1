use crate::config::SeedConfig;
use crate::database::Database;
use crate::error::Result;
use crate::model::Record as _;

/// Inserts the seed users, then the seed posts, one row at a time. Posts
/// refer to users by id, so the users must get the ids the posts expect.
/// A failed insert leaves earlier rows in place.
pub async fn load(db: &mut Database, seed: &SeedConfig) -> Result<()> {
    for user in &seed.users {
        let result = db.execute(&user.insert()).await?;
        log::debug!("Inserted user {} with id {:?}", user.name, result.last_insert_id);
    }
    for post in &seed.posts {
        let result = db.execute(&post.insert()).await?;
        log::debug!("Inserted post for user {} with id {:?}", post.user_id, result.last_insert_id);
    }
    log::info!("Inserted {} users and {} posts", seed.users.len(), seed.posts.len());
    Ok(())
}
