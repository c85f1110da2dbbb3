//! Mongo adapter tests. They need a running server:
//!
//! ```bash
//! MONGO_TEST_URI=mongodb://localhost:27017 cargo test -p devconnect --test adapters_mongo -- --ignored
//! ```
//!
//! Each test uses its own database, dropped at the end.

mod common;

use backend_test_support::unique_helpers::{unique_email, unique_str};
use devconnect::adapters::posts_mongo::MongoPostStore;
use devconnect::adapters::profiles_mongo::MongoProfileStore;
use devconnect::adapters::users_mongo::MongoUserStore;
use devconnect::domain::posts::{Comment, NewPost};
use devconnect::domain::profiles::{Experience, ProfileFields};
use devconnect::domain::users::NewUser;
use devconnect::errors::domain::{ConflictKind, DomainError};
use devconnect::infra::mongo;
use devconnect::repos::posts::PostStore;
use devconnect::repos::profiles::ProfileStore;
use devconnect::repos::users::UserStore;
use mongodb::Database;
use time::OffsetDateTime;

async fn test_db() -> Database {
    let uri = std::env::var("MONGO_TEST_URI").expect("MONGO_TEST_URI must be set");
    let name = unique_str("devconnect_test").replace('-', "_");
    mongo::connect(&uri, &name)
        .await
        .expect("connect to test database")
}

fn new_user(name: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: unique_email(&name.to_lowercase()),
        password_digest: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
    }
}

#[actix_web::test]
#[ignore = "needs MONGO_TEST_URI"]
async fn test_users_unique_email_and_lookup() {
    let db = test_db().await;
    let users = MongoUserStore::new(&db);

    let jane = new_user("Jane");
    let created = users.insert(jane.clone()).await.unwrap();
    assert_eq!(created.email, jane.email);

    let dup = users.insert(jane.clone()).await.unwrap_err();
    assert!(matches!(dup, DomainError::Conflict(ConflictKind::UniqueEmail, _)));

    let found = users.find_by_email(&jane.email).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert!(users.find_by_id(&created.id).await.unwrap().is_some());
    assert!(users.find_by_id("not-an-object-id").await.unwrap().is_none());

    let names = users
        .find_names(&[created.id.clone(), "bogus".to_string()])
        .await
        .unwrap();
    assert_eq!(names.len(), 1);
    assert_eq!(names[&created.id], "Jane");

    assert!(users.remove(&created.id).await.unwrap());
    assert!(!users.remove(&created.id).await.unwrap());
    users.ping().await.unwrap();

    db.drop().await.unwrap();
}

#[actix_web::test]
#[ignore = "needs MONGO_TEST_URI"]
async fn test_profile_upsert_and_entries() {
    let db = test_db().await;
    let profiles = MongoProfileStore::new(&db);
    let owner = "65a1b2c3d4e5f60718293a4b";

    let fields = ProfileFields {
        company: Some("Acme".into()),
        status: "Developer".into(),
        skills: vec!["rust".into()],
        ..ProfileFields::default()
    };
    let created = profiles.upsert(owner, fields).await.unwrap();

    let replaced = profiles
        .upsert(
            owner,
            ProfileFields {
                status: "Lead".into(),
                skills: vec!["go".into()],
                ..ProfileFields::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(replaced.id, created.id);
    assert_eq!(replaced.fields.company, None);
    assert_eq!(replaced.fields.status, "Lead");

    let entry = |title: &str| Experience {
        id: unique_str("exp"),
        title: title.to_string(),
        company: "Acme".into(),
        location: None,
        from: "2020-01-01".into(),
        to: None,
        current: false,
        description: None,
    };
    let first = entry("first");
    profiles.add_experience(owner, first.clone()).await.unwrap();
    let after = profiles
        .add_experience(owner, entry("second"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.experience[0].title, "second");

    let after = profiles
        .remove_experience(owner, &first.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.experience.len(), 1);

    assert!(profiles
        .add_experience("65a1b2c3d4e5f60718293a4c", entry("nobody"))
        .await
        .unwrap()
        .is_none());

    assert_eq!(profiles.list().await.unwrap().len(), 1);
    assert!(profiles.remove_by_user(owner).await.unwrap());

    db.drop().await.unwrap();
}

#[actix_web::test]
#[ignore = "needs MONGO_TEST_URI"]
async fn test_post_likes_and_comments() {
    let db = test_db().await;
    let posts = MongoPostStore::new(&db);
    let author = "65a1b2c3d4e5f60718293a4b";
    let fan = "65a1b2c3d4e5f60718293a4d";

    let older = posts
        .insert(NewPost {
            user: author.into(),
            text: "older".into(),
            name: "Author".into(),
        })
        .await
        .unwrap();
    // Dates are stored with millisecond precision
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let newer = posts
        .insert(NewPost {
            user: author.into(),
            text: "newer".into(),
            name: "Author".into(),
        })
        .await
        .unwrap();

    let listed: Vec<_> = posts.list().await.unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(listed, vec![newer.id.clone(), older.id.clone()]);

    let likes = posts.add_like(&older.id, fan).await.unwrap().unwrap();
    assert_eq!(likes.len(), 1);
    assert!(posts.add_like(&older.id, fan).await.unwrap().is_none());
    assert!(posts.remove_like(&older.id, fan).await.unwrap().unwrap().is_empty());
    assert!(posts.remove_like(&older.id, fan).await.unwrap().is_none());

    let comment = Comment {
        id: unique_str("c"),
        user: fan.into(),
        text: "nice".into(),
        name: "Fan".into(),
        date: OffsetDateTime::now_utc(),
    };
    let comments = posts
        .add_comment(&older.id, comment.clone())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(comments[0].id, comment.id);

    // Only the comment's author can pull it
    assert!(posts
        .remove_comment(&older.id, &comment.id, author)
        .await
        .unwrap()
        .is_none());
    let comments = posts
        .remove_comment(&older.id, &comment.id, fan)
        .await
        .unwrap()
        .unwrap();
    assert!(comments.is_empty());

    assert_eq!(posts.remove_by_user(author).await.unwrap(), 2);
    assert!(posts.find_by_id("garbage").await.unwrap().is_none());

    db.drop().await.unwrap();
}
