mod direct_message;
mod friendship;
mod group;
mod notification;
mod password_reset_token;
mod route;
mod user;
