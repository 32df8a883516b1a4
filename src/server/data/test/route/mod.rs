use crate::server::data::route::RouteRepository;
use test_utils::{
    builder::TestBuilder,
    factory::{route::RouteFactory, user::create_user},
};

mod share_token;
mod shares;
