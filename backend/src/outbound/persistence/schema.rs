//! Diesel table definitions mirroring `migrations/`.
//!
//! Keep in sync with the SQL by hand or regenerate with
//! `diesel print-schema` against a migrated database.

diesel::table! {
    /// Registered accounts. `email` is unique and stored normalised.
    users (id) {
        id -> Uuid,
        email -> Varchar,
        name -> Varchar,
        /// bcrypt hash in modular crypt format.
        password_hash -> Text,
        is_active -> Bool,
        is_staff -> Bool,
        is_superuser -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    tags (id) {
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        name -> Varchar,
    }
}

diesel::table! {
    ingredients (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Varchar,
    }
}

diesel::table! {
    /// Recipes; `created_at` drives newest-first listing.
    recipes (id) {
        id -> Uuid,
        user_id -> Uuid,
        title -> Varchar,
        time_minutes -> Int4,
        /// Price in whole cents, `0 ..= 99999`.
        price_cents -> Int4,
        link -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    recipe_tags (recipe_id, tag_id) {
        recipe_id -> Uuid,
        tag_id -> Uuid,
    }
}

diesel::table! {
    recipe_ingredients (recipe_id, ingredient_id) {
        recipe_id -> Uuid,
        ingredient_id -> Uuid,
    }
}

diesel::joinable!(tags -> users (user_id));
diesel::joinable!(ingredients -> users (user_id));
diesel::joinable!(recipes -> users (user_id));
diesel::joinable!(recipe_tags -> recipes (recipe_id));
diesel::joinable!(recipe_tags -> tags (tag_id));
diesel::joinable!(recipe_ingredients -> recipes (recipe_id));
diesel::joinable!(recipe_ingredients -> ingredients (ingredient_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    tags,
    ingredients,
    recipes,
    recipe_tags,
    recipe_ingredients,
);
