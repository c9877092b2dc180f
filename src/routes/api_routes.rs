/**
 * API Route Table
 *
 * All endpoints live under `/api`, split into a public group and a
 * protected group. The protected group carries the auth middleware as a
 * route layer, so a missing or invalid token answers 401 before any
 * handler runs.
 *
 * # Route Matching
 *
 * Static segments win over parameters, so `/api/marks/user` is matched
 * before `/api/marks/{id}` and `/api/club/recommended` before
 * `/api/club/{id}`. Paths shared between the groups (`/api/books/{id}`
 * public GET, protected PUT/DELETE) must spell the parameter the same
 * way in both, or the merge rejects them.
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};

use crate::auth::{get_me, get_profile, login, register, update_profile};
use crate::catalog;
use crate::clubs;
use crate::comments;
use crate::marks;
use crate::middleware::auth::auth_middleware;
use crate::posts;
use crate::replies;
use crate::reviews;
use crate::server::state::AppState;
use crate::taxonomy::handlers as taxonomy;

/// Build the `/api` route table.
pub fn configure_api_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        // auth
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        // books
        .route("/api/books", get(catalog::list_books))
        .route("/api/books/search", get(catalog::search_books))
        .route("/api/books/recommended", get(catalog::recommended_books))
        .route("/api/books/{id}", get(catalog::get_book))
        // taxonomy
        .route(
            "/api/authors",
            get(taxonomy::list_authors).post(taxonomy::create_author),
        )
        .route(
            "/api/authors/{id}",
            put(taxonomy::update_author).delete(taxonomy::delete_author),
        )
        .route(
            "/api/categories",
            get(taxonomy::list_categories).post(taxonomy::create_category),
        )
        .route(
            "/api/categories/{id}",
            put(taxonomy::update_category).delete(taxonomy::delete_category),
        )
        .route(
            "/api/genres",
            get(taxonomy::list_genres).post(taxonomy::create_genre),
        )
        .route(
            "/api/genres/{id}",
            put(taxonomy::update_genre).delete(taxonomy::delete_genre),
        )
        .route(
            "/api/tags",
            get(taxonomy::list_tags).post(taxonomy::create_tag),
        )
        .route(
            "/api/tags/{id}",
            put(taxonomy::update_tag).delete(taxonomy::delete_tag),
        )
        // clubs
        .route("/api/club", get(clubs::list_clubs))
        .route("/api/club/recommended", get(clubs::recommended_clubs))
        .route("/api/club/{id}", get(clubs::get_club))
        // reviews
        .route("/api/reviews/{id}", get(reviews::list_reviews))
        // posts
        .route("/api/post", get(posts::club_posts))
        .route("/api/post/random", get(posts::random_posts))
        // comments
        .route("/api/comment", get(comments::post_comments))
        // replies
        .route(
            "/api/reply/post/{post_id}/replies",
            get(replies::post_replies),
        );

    let protected = Router::new()
        // auth
        .route("/api/auth/me", get(get_me))
        .route("/api/auth/profile", get(get_profile).put(update_profile))
        // books
        .route("/api/books", post(catalog::create_book))
        .route(
            "/api/books/{id}",
            put(catalog::update_book).delete(catalog::delete_book),
        )
        // clubs
        .route("/api/club", post(clubs::create_club))
        .route("/api/club/user", get(clubs::user_clubs))
        .route(
            "/api/club/{id}",
            put(clubs::update_club).delete(clubs::delete_club),
        )
        .route("/api/club/{id}/join", post(clubs::join_club))
        .route("/api/club/{id}/leave", post(clubs::leave_club))
        .route(
            "/api/club/{id}/check-membership",
            get(clubs::check_membership),
        )
        // marks
        .route("/api/marks", post(marks::create_mark))
        .route("/api/marks/user", get(marks::user_marks))
        .route(
            "/api/marks/{id}",
            get(marks::get_mark_by_book)
                .put(marks::update_mark)
                .delete(marks::delete_mark),
        )
        // reviews
        .route("/api/reviews", post(reviews::create_review))
        .route("/api/reviews/user/me", get(reviews::user_reviews))
        .route(
            "/api/reviews/{id}",
            put(reviews::update_review).delete(reviews::delete_review),
        )
        // posts
        .route("/api/post", post(posts::create_post))
        .route("/api/post/{id}", delete(posts::delete_post))
        .route("/api/post/{id}/like", put(posts::toggle_like_post))
        // comments
        .route("/api/comment", post(comments::create_comment))
        .route("/api/comment/{id}", delete(comments::delete_comment))
        .route("/api/comment/{id}/like", put(comments::toggle_like_comment))
        // replies
        .route(
            "/api/reply/post/{post_id}/reply",
            post(replies::create_reply),
        )
        .route("/api/reply/{id}", delete(replies::delete_reply))
        .route("/api/reply/{id}/like", put(replies::toggle_like_reply))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    public.merge(protected)
}
