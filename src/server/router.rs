//! Axum route configuration and API documentation.
//!
//! Unauthenticated routes: registration, login, the password reset flow, the
//! contact form, weather lookups, the site blog reads and the public
//! route-by-token read. Everything else resolves the acting user through the
//! bearer-token guard inside its handler.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        auth, friendship, group, group_blog, group_chat, maps, message, notification, route,
        site_blog, user, weather,
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register,
        auth::login,
        auth::logout,
        auth::forgot_password,
        auth::verify_reset_token,
        auth::reset_password,
        auth::contact,
        user::my_profile,
        user::user_profile,
        user::update_profile,
        user::delete_user,
        friendship::send_request,
        friendship::accept_request,
        friendship::reject_request,
        friendship::remove_friend,
        friendship::block_user,
        friendship::unblock_user,
        friendship::friends,
        friendship::pending_requests,
        friendship::sent_requests,
        friendship::blocked_users,
        friendship::search_users,
        friendship::friendship_status,
        message::send_message,
        message::conversation,
        message::conversations,
        message::unread_messages,
        message::unread_count,
        message::mark_conversation_read,
        message::mark_message_read,
        message::delete_message,
        message::delete_conversation,
        group::list_groups,
        group::search_groups,
        group::my_groups,
        group::group_detail,
        group::create_group,
        group::update_group,
        group::delete_group,
        group::join_group,
        group::leave_group,
        group::group_members,
        group_chat::group_messages,
        group_chat::recent_messages,
        group_chat::send_message,
        group_chat::delete_message,
        group_blog::group_posts,
        group_blog::create_post,
        group_blog::search_posts,
        group_blog::my_posts,
        group_blog::get_post,
        group_blog::update_post,
        group_blog::delete_post,
        route::create_route,
        route::my_routes,
        route::shared_with_me,
        route::search_routes,
        route::statistics,
        route::get_route,
        route::update_route,
        route::delete_route,
        route::share_route,
        route::unshare_route,
        route::generate_share_link,
        route::revoke_share_link,
        route::route_by_token,
        notification::notifications,
        notification::unread,
        notification::unread_count,
        notification::mark_read,
        notification::mark_all_read,
        notification::delete_read,
        notification::delete,
        site_blog::list,
        site_blog::get,
        site_blog::by_author,
        site_blog::create,
        site_blog::update,
        site_blog::delete,
        maps::geocode,
        maps::reverse_geocode,
        maps::directions,
        maps::distance_matrix,
        maps::nearby,
        maps::place_details,
        weather::current,
        weather::by_city,
    ),
    components(schemas(
        crate::model::auth::RegisterDto,
        crate::model::auth::LoginDto,
        crate::model::auth::AuthResponseDto,
        crate::model::auth::AuthUserDto,
        crate::model::auth::ForgotPasswordDto,
        crate::model::auth::VerifyResetTokenDto,
        crate::model::auth::ResetPasswordDto,
        crate::model::auth::ContactDto,
        crate::model::user::UserSummaryDto,
        crate::model::user::UserProfileDto,
        crate::model::user::UpdateProfileDto,
        crate::model::friendship::SendFriendRequestDto,
        crate::model::friendship::FriendRequestDto,
        crate::model::friendship::FriendDto,
        crate::model::friendship::FriendshipStatusDto,
        crate::model::message::SendDirectMessageDto,
        crate::model::message::DirectMessageDto,
        crate::model::message::ConversationDto,
        crate::model::message::UnreadCountDto,
        crate::model::group::CreateGroupDto,
        crate::model::group::UpdateGroupDto,
        crate::model::group::GroupDto,
        crate::model::group::GroupDetailDto,
        crate::model::group::GroupMemberDto,
        crate::model::group_chat::SendGroupMessageDto,
        crate::model::group_chat::GroupChatMessageDto,
        crate::model::group_blog::CreateGroupBlogDto,
        crate::model::group_blog::GroupBlogDto,
        crate::model::route::WaypointDto,
        crate::model::route::SaveRouteDto,
        crate::model::route::RouteDto,
        crate::model::route::ShareRouteDto,
        crate::model::route::ShareLinkDto,
        crate::model::route::RouteStatisticsDto,
        crate::model::notification::NotificationDto,
        crate::model::notification::RelatedEntityDto,
        crate::model::site_blog::CreateSiteBlogDto,
        crate::model::site_blog::SiteBlogDto,
    ))
)]
struct ApiDoc;

pub fn router(state: AppState) -> Router {
    Router::new()
        // auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/forgot-password", post(auth::forgot_password))
        .route("/api/auth/verify-reset-token", post(auth::verify_reset_token))
        .route("/api/auth/reset-password", post(auth::reset_password))
        .route("/api/auth/contact", post(auth::contact))
        // profile
        .route("/api/profile", get(user::my_profile).put(user::update_profile))
        .route(
            "/api/users/{user_id}",
            get(user::user_profile).delete(user::delete_user),
        )
        // friendships
        .route("/api/friends", get(friendship::friends))
        .route(
            "/api/friends/requests",
            get(friendship::pending_requests).post(friendship::send_request),
        )
        .route("/api/friends/requests/sent", get(friendship::sent_requests))
        .route(
            "/api/friends/requests/{request_id}/accept",
            post(friendship::accept_request),
        )
        .route(
            "/api/friends/requests/{request_id}/reject",
            post(friendship::reject_request),
        )
        .route("/api/friends/blocked", get(friendship::blocked_users))
        .route("/api/friends/search", get(friendship::search_users))
        .route(
            "/api/friends/status/{user_id}",
            get(friendship::friendship_status),
        )
        .route("/api/friends/{user_id}", delete(friendship::remove_friend))
        .route("/api/friends/{user_id}/block", post(friendship::block_user))
        .route(
            "/api/friends/{user_id}/unblock",
            post(friendship::unblock_user),
        )
        // direct messages
        .route("/api/messages", post(message::send_message))
        .route("/api/messages/conversations", get(message::conversations))
        .route(
            "/api/messages/conversation/{user_id}",
            get(message::conversation).delete(message::delete_conversation),
        )
        .route(
            "/api/messages/conversation/{user_id}/read",
            post(message::mark_conversation_read),
        )
        .route("/api/messages/unread", get(message::unread_messages))
        .route("/api/messages/unread/count", get(message::unread_count))
        .route(
            "/api/messages/{message_id}/read",
            post(message::mark_message_read),
        )
        .route("/api/messages/{message_id}", delete(message::delete_message))
        // groups
        .route("/api/groups", get(group::list_groups).post(group::create_group))
        .route("/api/groups/search", get(group::search_groups))
        .route("/api/groups/my-groups", get(group::my_groups))
        .route(
            "/api/groups/{group_id}",
            get(group::group_detail)
                .put(group::update_group)
                .delete(group::delete_group),
        )
        .route("/api/groups/{group_id}/join", post(group::join_group))
        .route("/api/groups/{group_id}/leave", post(group::leave_group))
        .route("/api/groups/{group_id}/members", get(group::group_members))
        // group chat
        .route(
            "/api/groups/{group_id}/chat",
            get(group_chat::group_messages).post(group_chat::send_message),
        )
        .route(
            "/api/groups/{group_id}/chat/recent",
            get(group_chat::recent_messages),
        )
        .route(
            "/api/chat/messages/{message_id}",
            delete(group_chat::delete_message),
        )
        .route("/api/ws/groups/{group_id}", get(group_chat::group_chat_ws))
        // group blogs
        .route(
            "/api/groups/{group_id}/blogs",
            get(group_blog::group_posts).post(group_blog::create_post),
        )
        .route(
            "/api/groups/{group_id}/blogs/search",
            get(group_blog::search_posts),
        )
        .route("/api/blogs/my-blogs", get(group_blog::my_posts))
        .route(
            "/api/blogs/{blog_id}",
            get(group_blog::get_post)
                .put(group_blog::update_post)
                .delete(group_blog::delete_post),
        )
        // routes
        .route("/api/routes", post(route::create_route))
        .route("/api/routes/my-routes", get(route::my_routes))
        .route("/api/routes/shared-with-me", get(route::shared_with_me))
        .route("/api/routes/search", get(route::search_routes))
        .route("/api/routes/statistics", get(route::statistics))
        .route("/api/routes/shared/{share_token}", get(route::route_by_token))
        .route(
            "/api/routes/{route_id}",
            get(route::get_route)
                .put(route::update_route)
                .delete(route::delete_route),
        )
        .route("/api/routes/{route_id}/share", post(route::share_route))
        .route(
            "/api/routes/{route_id}/share/{user_id}",
            delete(route::unshare_route),
        )
        .route(
            "/api/routes/{route_id}/share-link",
            post(route::generate_share_link).delete(route::revoke_share_link),
        )
        // notifications
        .route("/api/notifications", get(notification::notifications))
        .route("/api/notifications/unread", get(notification::unread))
        .route(
            "/api/notifications/unread/count",
            get(notification::unread_count),
        )
        .route("/api/notifications/read-all", post(notification::mark_all_read))
        .route("/api/notifications/read", delete(notification::delete_read))
        .route(
            "/api/notifications/{notification_id}/read",
            post(notification::mark_read),
        )
        .route(
            "/api/notifications/{notification_id}",
            delete(notification::delete),
        )
        // site blogs
        .route("/api/site-blogs", get(site_blog::list).post(site_blog::create))
        .route("/api/site-blogs/author/{user_id}", get(site_blog::by_author))
        .route(
            "/api/site-blogs/{blog_id}",
            get(site_blog::get)
                .put(site_blog::update)
                .delete(site_blog::delete),
        )
        // maps
        .route("/api/maps/geocode", get(maps::geocode))
        .route("/api/maps/reverse-geocode", get(maps::reverse_geocode))
        .route("/api/maps/directions", get(maps::directions))
        .route("/api/maps/distance-matrix", get(maps::distance_matrix))
        .route("/api/maps/nearby", get(maps::nearby))
        .route("/api/maps/place/{place_id}", get(maps::place_details))
        // weather
        .route("/api/weather/current", get(weather::current))
        .route("/api/weather/by-city", get(weather::by_city))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
