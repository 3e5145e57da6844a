use civicwatch_test_utils::prelude::*;

use crate::server::{
    model::auth::{Caller, Role},
    provider::recording::RecordingAuthProvider,
    service::user::UserService,
};

mod handle_user_deleted;

fn admin() -> Caller {
    Caller::new("admin", Some(Role::Admin))
}
