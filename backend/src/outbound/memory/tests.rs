//! Behavioural coverage for the in-memory repositories.

use std::collections::BTreeSet;

use chrono::{Duration, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::{
    AccountRole, ItemName, PasswordHash, RecipeDraft, RecipeLink, RecipeTitle, UserName,
};

#[fixture]
fn store() -> MemoryStore {
    MemoryStore::new()
}

fn account(email: &str) -> StoredUser {
    StoredUser {
        user: User::new(
            UserId::random(),
            Email::new(email).expect("valid email"),
            UserName::default(),
            AccountRole::Regular,
        ),
        password_hash: PasswordHash::from_stored("$2b$04$hash".to_owned()),
    }
}

fn tag(owner: &UserId, name: &str) -> Tag {
    Tag::create(owner.clone(), ItemName::new(name).expect("valid name"))
}

fn ingredient(owner: &UserId, name: &str) -> Ingredient {
    Ingredient::create(owner.clone(), ItemName::new(name).expect("valid name"))
}

fn recipe(
    owner: &UserId,
    minutes_ago: i64,
    tag_ids: &[TagId],
    ingredient_ids: &[IngredientId],
) -> Recipe {
    let base = Utc
        .with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    let draft = RecipeDraft {
        title: RecipeTitle::new("Sample recipe").expect("valid title"),
        time_minutes: 10,
        price: "5.00".parse().expect("valid price"),
        link: RecipeLink::default(),
        tag_ids: tag_ids.iter().copied().collect::<BTreeSet<_>>(),
        ingredient_ids: ingredient_ids.iter().copied().collect::<BTreeSet<_>>(),
    };
    Recipe::from_draft(
        RecipeId::random(),
        owner.clone(),
        draft,
        base - Duration::minutes(minutes_ago),
    )
}

#[rstest]
#[tokio::test]
async fn duplicate_email_is_rejected(store: MemoryStore) {
    UserRepository::insert(&store, &account("test@example.com"))
        .await
        .expect("first insert");
    let err = UserRepository::insert(&store, &account("test@example.com"))
        .await
        .expect_err("duplicate");
    assert_eq!(err, UserPersistenceError::duplicate_email("test@example.com"));
}

#[rstest]
#[tokio::test]
async fn users_are_found_by_id_and_email(store: MemoryStore) {
    let stored = account("cook@example.com");
    UserRepository::insert(&store, &stored).await.expect("insert");

    let by_id = store.find_by_id(stored.user.id()).await.expect("lookup");
    assert_eq!(by_id.as_ref(), Some(&stored.user));

    let email = Email::new("COOK@example.com").expect("valid email");
    let by_email = store.find_by_email(&email).await.expect("lookup");
    assert_eq!(by_email, Some(stored));
}

#[rstest]
#[tokio::test]
async fn tags_list_only_the_owners_by_name_descending(store: MemoryStore) {
    let owner = UserId::random();
    let other = UserId::random();
    for item in [tag(&owner, "Dessert"), tag(&owner, "Vegan"), tag(&other, "Fruity")] {
        TagRepository::insert(&store, &item).await.expect("insert");
    }

    let listed = TagRepository::list_for_owner(&store, &owner, AssignmentFilter::All)
        .await
        .expect("list");
    let names: Vec<&str> = listed.iter().map(|item| item.name().as_ref()).collect();
    assert_eq!(names, ["Vegan", "Dessert"]);
}

#[rstest]
#[tokio::test]
async fn names_sort_bytewise_with_ties_broken_by_id(store: MemoryStore) {
    let owner = UserId::random();
    let items = [
        ingredient(&owner, "Banana"),
        ingredient(&owner, "apple"),
        ingredient(&owner, "Salt"),
        ingredient(&owner, "Salt"),
    ];
    for item in &items {
        IngredientRepository::insert(&store, item).await.expect("insert");
    }

    let listed = IngredientRepository::list_for_owner(&store, &owner, AssignmentFilter::All)
        .await
        .expect("list");
    let names: Vec<&str> = listed.iter().map(|item| item.name().as_ref()).collect();
    assert_eq!(names, ["apple", "Salt", "Salt", "Banana"]);

    let salt_ids: Vec<IngredientId> = listed[1..3].iter().map(Ingredient::id).collect();
    assert!(salt_ids[0] > salt_ids[1], "equal names order by id descending");
}

#[rstest]
#[tokio::test]
async fn assigned_only_tags_are_distinct(store: MemoryStore) {
    let owner = UserId::random();
    let breakfast = tag(&owner, "Breakfast");
    let lunch = tag(&owner, "Lunch");
    let dinner = tag(&owner, "Dinner");
    for item in [&breakfast, &lunch, &dinner] {
        TagRepository::insert(&store, item).await.expect("insert");
    }
    for minutes_ago in [0, 1] {
        RecipeRepository::insert(&store, &recipe(&owner, minutes_ago, &[breakfast.id()], &[]))
            .await
            .expect("insert recipe");
    }
    RecipeRepository::insert(&store, &recipe(&owner, 2, &[lunch.id()], &[]))
        .await
        .expect("insert recipe");

    let listed = TagRepository::list_for_owner(&store, &owner, AssignmentFilter::AssignedOnly)
        .await
        .expect("list");
    let names: Vec<&str> = listed.iter().map(|item| item.name().as_ref()).collect();
    assert_eq!(names, ["Lunch", "Breakfast"]);
}

#[rstest]
#[tokio::test]
async fn assigned_only_ingredients_ignore_other_owners_recipes(store: MemoryStore) {
    let owner = UserId::random();
    let other = UserId::random();
    let salt = ingredient(&owner, "Salt");
    IngredientRepository::insert(&store, &salt).await.expect("insert");
    RecipeRepository::insert(&store, &recipe(&other, 0, &[], &[salt.id()]))
        .await
        .expect("insert recipe");

    let listed =
        IngredientRepository::list_for_owner(&store, &owner, AssignmentFilter::AssignedOnly)
            .await
            .expect("list");
    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test]
async fn find_owned_skips_foreign_ids(store: MemoryStore) {
    let owner = UserId::random();
    let mine = ingredient(&owner, "Kale");
    let theirs = ingredient(&UserId::random(), "Salt");
    for item in [&mine, &theirs] {
        IngredientRepository::insert(&store, item).await.expect("insert");
    }

    let found = IngredientRepository::find_owned(&store, &owner, &[mine.id(), theirs.id()])
        .await
        .expect("lookup");
    assert_eq!(found, vec![mine]);
}

#[rstest]
#[tokio::test]
async fn recipes_list_newest_first_and_filter(store: MemoryStore) {
    let owner = UserId::random();
    let vegan = tag(&owner, "Vegan");
    let older = recipe(&owner, 10, &[vegan.id()], &[]);
    let newer = recipe(&owner, 0, &[], &[]);
    for item in [&older, &newer] {
        RecipeRepository::insert(&store, item).await.expect("insert");
    }

    let all = RecipeRepository::list_for_owner(&store, &owner, &RecipeFilter::default())
        .await
        .expect("list");
    assert_eq!(all, vec![newer, older.clone()]);

    let filter = RecipeFilter {
        tag_ids: vec![vegan.id()],
        ingredient_ids: Vec::new(),
    };
    let tagged = RecipeRepository::list_for_owner(&store, &owner, &filter)
        .await
        .expect("list");
    assert_eq!(tagged, vec![older]);
}

#[rstest]
#[tokio::test]
async fn delete_requires_ownership(store: MemoryStore) {
    let owner = UserId::random();
    let item = recipe(&owner, 0, &[], &[]);
    RecipeRepository::insert(&store, &item).await.expect("insert");

    let stranger = UserId::random();
    assert!(!store.delete_owned(&stranger, item.id()).await.expect("delete"));
    assert!(store.delete_owned(&owner, item.id()).await.expect("delete"));
    let remaining = RecipeRepository::find_owned(&store, &owner, item.id())
        .await
        .expect("lookup");
    assert!(remaining.is_none());
}
