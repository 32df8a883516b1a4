pub use super::activity_group::Entity as ActivityGroup;
pub use super::direct_message::Entity as DirectMessage;
pub use super::friendship::Entity as Friendship;
pub use super::group_blog_post::Entity as GroupBlogPost;
pub use super::group_chat_message::Entity as GroupChatMessage;
pub use super::group_member::Entity as GroupMember;
pub use super::notification::Entity as Notification;
pub use super::password_reset_token::Entity as PasswordResetToken;
pub use super::route::Entity as Route;
pub use super::route_share::Entity as RouteShare;
pub use super::site_blog::Entity as SiteBlog;
pub use super::user::Entity as User;
